//! Error handling module for beamsh.
//!
//! All fallible operations in the crate return [`Result`], with
//! [`BeamshError`] wrapping the subsystem-specific kinds. The completion
//! engine itself never surfaces errors through this module: by contract it
//! degrades silently (closing the suggestion session) instead of
//! interrupting typing.

pub mod kinds;

// Re-export commonly used types
pub use kinds::{BeamshError, ConfigError, DeckError, ParseError, Result, SessionError};
