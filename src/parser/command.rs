//! Command type definitions for beamsh
//!
//! This module defines the commands the shell understands. Anything that
//! does not parse as a command is treated as LaTeX content for the
//! current edit target.

use std::path::PathBuf;

/// Where content lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditTarget {
    /// Lines are appended to the deck preamble.
    Preamble,

    /// Lines are appended to the current frame body.
    #[default]
    Frame,
}

/// Represents a parsed shell line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a new deck with the given title
    New { title: String },

    /// Load a deck from a `.tex` file
    Open { path: PathBuf },

    /// Save the deck, optionally to a new path
    Save { path: Option<PathBuf> },

    /// Start a new frame and make it the edit target
    Frame { title: String },

    /// Direct content lines at the preamble
    Preamble,

    /// Direct content lines at a frame (1-based index, or the last frame)
    Body { index: Option<usize> },

    /// Enter the inline frame composer
    Compose,

    /// Show a listing
    Show(ShowTarget),

    /// Delete frame n (1-based)
    Drop { index: usize },

    /// Help command with optional topic
    Help(Option<String>),

    /// Exit/quit command
    Exit,

    /// A LaTeX content line for the current edit target
    Content(String),
}

/// Targets for the `show` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTarget {
    /// Numbered frame titles with line counts
    Outline,

    /// Full frame contents
    Frames,

    /// Known completion commands
    Commands,

    /// Active configuration
    Config,

    /// Recently opened decks
    Recent,
}
