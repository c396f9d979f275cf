//! Beamer Shell Library
//!
//! This library provides the core functionality for beamsh, an
//! interactive shell for building LaTeX Beamer slide decks. It can be
//! used as a standalone library to build deck tooling.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `completion`: Debounced suggestion engine over a text surface
//! - `config`: Configuration management
//! - `deck`: Beamer deck document model
//! - `editor`: Line editor and inline frame composer
//! - `error`: Error types and handling
//! - `kb`: Command knowledge base backing completion
//! - `parser`: Shell line parsing
//! - `session`: Session persistence
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use beamsh::completion::{
//!     CompletionEngine, FrameBuffer, SuggestionCandidate, SuggestionResolver, SuggestionUi,
//! };
//! use beamsh::kb::CommandKnowledgeBase;
//!
//! struct NoUi;
//! impl SuggestionUi for NoUi {
//!     fn on_session_opened(
//!         &mut self,
//!         _candidates: &[SuggestionCandidate],
//!         _highlighted: usize,
//!         _anchor: beamsh::completion::Position,
//!     ) {
//!     }
//!     fn on_session_updated(&mut self, _candidates: &[SuggestionCandidate], _highlighted: usize) {}
//!     fn on_session_closed(&mut self) {}
//! }
//!
//! let resolver = SuggestionResolver::new(Arc::new(CommandKnowledgeBase::builtin()));
//! let mut engine = CompletionEngine::new(Arc::new(resolver), Duration::ZERO);
//! let mut buffer = FrameBuffer::from_text("\\fra");
//! let mut ui = NoUi;
//!
//! engine.notify_change();
//! engine.tick(&buffer, &mut ui);
//! assert!(engine.is_open());
//!
//! engine.commit(&mut buffer, &mut ui);
//! assert_eq!(buffer.text(), "\\frametitle{}");
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod deck;
pub mod editor;
pub mod error;
pub mod kb;
pub mod parser;
pub mod session;

// Re-export commonly used types
pub use completion::{CompletionEngine, SuggestionResolver};
pub use config::Config;
pub use deck::Deck;
pub use editor::{Composer, EditorEngine};
pub use error::{BeamshError, Result};
pub use kb::CommandKnowledgeBase;
pub use parser::{Command, Parser};
pub use session::SessionStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
