//! Command completion engine for LaTeX/Beamer source.
//!
//! Watches a host text buffer for unterminated command tokens (`\fra`,
//! `\begin{ite`), resolves candidates against the knowledge base, and runs
//! the suggestion popup lifecycle: open, refresh while typing, navigate,
//! commit a template, dismiss. The engine is host-agnostic: the frame
//! composer drives it over a [`FrameBuffer`], and the shell's completion
//! menu reuses the detector and resolver directly.
//!
//! # Architecture
//!
//! - **PatternDetector**: finds the partial token before the cursor and
//!   debounces identical detections
//! - **SuggestionResolver**: pure candidate resolution, behind the
//!   [`CandidateSource`] strategy trait
//! - **SuggestionSession**: the Closed/Open state machine with highlight
//!   and anchor tracking
//! - **template**: anchor replacement and `$1`/`$2` cursor placement
//! - **CompletionEngine**: ties the above to a [`TextSurface`] host and
//!   coalesces change-notification bursts
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use beamsh::completion::{CompletionEngine, SuggestionResolver};
//! use beamsh::kb::CommandKnowledgeBase;
//!
//! let kb = Arc::new(CommandKnowledgeBase::builtin());
//! let resolver = Arc::new(SuggestionResolver::new(kb));
//! let engine = CompletionEngine::new(resolver, Duration::from_millis(40));
//! ```

mod engine;
mod pattern;
mod resolver;
mod session;
mod surface;
pub mod template;

pub use engine::CompletionEngine;
pub use pattern::{Detection, PartialToken, PatternDetector, ESCAPE_CHAR};
pub use resolver::{CandidateSource, CompletionContext, SuggestionCandidate, SuggestionResolver};
pub use session::{NavDirection, SuggestionSession, SuggestionUi};
pub use surface::{Anchor, FrameBuffer, Position, TextSurface};
