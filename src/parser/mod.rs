//! Shell line parser for beamsh
//!
//! Every input line is either a deck-management command or LaTeX content
//! for the current edit target. Routing is by first word: a line whose
//! first word is a known command word is parsed as a command, everything
//! else passes through untouched as content.
//!
//! # Architecture
//!
//! The parser is split into focused modules:
//! - `command`: Command type definitions (Command, ShowTarget, EditTarget)
//! - `meta`: Parser for deck-management commands (new, open, frame, etc.)
//!
//! # Examples
//!
//! ```
//! use beamsh::parser::{Command, Parser};
//!
//! let mut parser = Parser::new();
//!
//! // A deck-management command
//! let cmd = parser.parse("frame The Problem").unwrap();
//! assert!(matches!(cmd, Command::Frame { .. }));
//!
//! // Anything else is LaTeX content, passed through verbatim
//! let cmd = parser.parse("  \\item first point").unwrap();
//! assert!(matches!(cmd, Command::Content(_)));
//! ```

mod command;
mod meta;

// Re-export public API
pub use command::*;
pub use meta::MetaCommandParser;

use crate::error::Result;

/// Main parser for beamsh input lines
///
/// Commands never collide with LaTeX: command words are bare
/// identifiers, while LaTeX lines lead with `\`, whitespace-significant
/// text, or braces.
pub struct Parser {}

impl Parser {
    /// Create a new parser instance
    pub fn new() -> Self {
        Self {}
    }

    /// Parse an input line into a Command
    ///
    /// This is the main entry point for parsing. Lines that do not start
    /// with a command word come back as `Command::Content` with their
    /// original spacing, so indentation inside environments survives.
    ///
    /// # Arguments
    ///
    /// * `input` - The input line to parse
    ///
    /// # Returns
    ///
    /// * `Result<Command>` - The parsed command or an error
    pub fn parse(&mut self, input: &str) -> Result<Command> {
        let line = input.trim_end_matches(['\r', '\n']);

        if MetaCommandParser::is_meta_command(line) {
            return MetaCommandParser::parse(line);
        }

        Ok(Command::Content(line.to_string()))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_route_to_meta_parser() {
        let mut parser = Parser::new();
        assert!(matches!(parser.parse("exit").unwrap(), Command::Exit));
        assert!(matches!(
            parser.parse("show outline").unwrap(),
            Command::Show(ShowTarget::Outline)
        ));
    }

    #[test]
    fn test_latex_lines_pass_through_verbatim() {
        let mut parser = Parser::new();
        if let Command::Content(line) = parser.parse("  \\item first point").unwrap() {
            assert_eq!(line, "  \\item first point");
        } else {
            panic!("Expected Content command");
        }
    }

    #[test]
    fn test_empty_line_is_blank_content() {
        let mut parser = Parser::new();
        assert!(matches!(parser.parse("").unwrap(), Command::Content(line) if line.is_empty()));
    }

    #[test]
    fn test_known_word_with_bad_argument_is_an_error() {
        let mut parser = Parser::new();
        assert!(parser.parse("drop zero").is_err());
        assert!(parser.parse("open").is_err());
    }

    #[test]
    fn test_prose_starting_with_command_like_word_is_command() {
        // First-word routing is intentional: "new" always parses as the
        // command, even mid-sentence content must be quoted in LaTeX.
        let mut parser = Parser::new();
        assert!(matches!(
            parser.parse("new results on caching").unwrap(),
            Command::New { .. }
        ));
    }
}
