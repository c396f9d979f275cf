//! Interactive editing layer
//!
//! Two front ends share the completion machinery: the reedline-based
//! shell loop (prompt, completer, highlighter, validator, hinter) and
//! the crossterm-based inline frame composer with its suggestion popup.

mod completer;
mod composer;
mod engine;
mod highlighter;
mod hinter;
mod prompt;
mod shared_state;
mod validator;

pub use completer::LatexCompleter;
pub use composer::{Composer, ComposerEvent};
pub use engine::EditorEngine;
pub use highlighter::LatexHighlighter;
pub use hinter::LatexHinter;
pub use prompt::BeamshPrompt;
pub use shared_state::SharedState;
pub use validator::LatexValidator;
