//! Meta command parser
//!
//! This module handles parsing of beamsh's deck-management commands like:
//! - new, open, save
//! - frame, preamble, body, compose
//! - show outline, drop 2
//! - help, exit, quit
//!
//! A line whose first word is none of these is LaTeX content; routing
//! happens before this parser is called.

use std::path::PathBuf;

use crate::error::{ParseError, Result};
use crate::parser::command::{Command, ShowTarget};

/// Command words this parser claims. Everything else is content.
const COMMAND_WORDS: &[&str] = &[
    "new", "open", "save", "frame", "preamble", "body", "compose", "show", "drop", "help", "exit",
    "quit",
];

/// Parser for deck-management commands
pub struct MetaCommandParser;

impl MetaCommandParser {
    /// Check if a line's first word is a command word
    pub fn is_meta_command(input: &str) -> bool {
        match input.trim_start().split_whitespace().next() {
            Some(word) => COMMAND_WORDS.contains(&word),
            None => false,
        }
    }

    /// Parse a meta command
    pub fn parse(input: &str) -> Result<Command> {
        let trimmed = input.trim();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        match word {
            "exit" | "quit" => Ok(Command::Exit),
            "help" => Ok(Self::parse_help(rest)),
            "new" => Self::parse_new(rest),
            "open" => Self::parse_open(rest),
            "save" => Ok(Command::Save {
                path: Self::optional_path(rest),
            }),
            "frame" => Self::parse_frame(rest),
            "preamble" => Ok(Command::Preamble),
            "body" => Self::parse_body(rest),
            "compose" => Ok(Command::Compose),
            "show" => Self::parse_show(rest),
            "drop" => Self::parse_drop(rest),
            _ => Err(ParseError::UnknownCommand(word.to_string()).into()),
        }
    }

    /// Parse help command
    fn parse_help(rest: &str) -> Command {
        let topic = if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        };
        Command::Help(topic)
    }

    /// Parse new command
    fn parse_new(rest: &str) -> Result<Command> {
        if rest.is_empty() {
            return Err(ParseError::MissingArgument {
                command: "new".to_string(),
                argument: "title".to_string(),
            }
            .into());
        }
        Ok(Command::New {
            title: rest.to_string(),
        })
    }

    /// Parse open command
    fn parse_open(rest: &str) -> Result<Command> {
        if rest.is_empty() {
            return Err(ParseError::MissingArgument {
                command: "open".to_string(),
                argument: "path".to_string(),
            }
            .into());
        }
        Ok(Command::Open {
            path: PathBuf::from(rest),
        })
    }

    /// Parse frame command
    fn parse_frame(rest: &str) -> Result<Command> {
        if rest.is_empty() {
            return Err(ParseError::MissingArgument {
                command: "frame".to_string(),
                argument: "title".to_string(),
            }
            .into());
        }
        Ok(Command::Frame {
            title: rest.to_string(),
        })
    }

    /// Parse body command with its optional 1-based frame number
    fn parse_body(rest: &str) -> Result<Command> {
        if rest.is_empty() {
            return Ok(Command::Body { index: None });
        }
        match rest.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Command::Body { index: Some(n) }),
            _ => Err(ParseError::InvalidArgument {
                command: "body".to_string(),
                value: rest.to_string(),
            }
            .into()),
        }
    }

    /// Parse show command
    fn parse_show(rest: &str) -> Result<Command> {
        let target = match rest {
            "outline" => ShowTarget::Outline,
            "frames" => ShowTarget::Frames,
            "commands" => ShowTarget::Commands,
            "config" => ShowTarget::Config,
            "recent" => ShowTarget::Recent,
            _ => {
                return Err(ParseError::InvalidArgument {
                    command: "show".to_string(),
                    value: rest.to_string(),
                }
                .into());
            }
        };
        Ok(Command::Show(target))
    }

    /// Parse drop command
    fn parse_drop(rest: &str) -> Result<Command> {
        if rest.is_empty() {
            return Err(ParseError::MissingArgument {
                command: "drop".to_string(),
                argument: "frame number".to_string(),
            }
            .into());
        }
        match rest.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Command::Drop { index: n }),
            _ => Err(ParseError::InvalidArgument {
                command: "drop".to_string(),
                value: rest.to_string(),
            }
            .into()),
        }
    }

    /// Path argument, or None when absent
    fn optional_path(rest: &str) -> Option<PathBuf> {
        if rest.is_empty() {
            None
        } else {
            Some(PathBuf::from(rest))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_meta_command() {
        assert!(MetaCommandParser::is_meta_command("new My Talk"));
        assert!(MetaCommandParser::is_meta_command("show outline"));
        assert!(MetaCommandParser::is_meta_command("  exit"));
        assert!(!MetaCommandParser::is_meta_command("\\frametitle{Intro}"));
        assert!(!MetaCommandParser::is_meta_command("Some prose line"));
        assert!(!MetaCommandParser::is_meta_command(""));
    }

    #[test]
    fn test_parse_exit() {
        assert!(matches!(
            MetaCommandParser::parse("exit").unwrap(),
            Command::Exit
        ));
        assert!(matches!(
            MetaCommandParser::parse("quit").unwrap(),
            Command::Exit
        ));
    }

    #[test]
    fn test_parse_help() {
        assert!(matches!(
            MetaCommandParser::parse("help").unwrap(),
            Command::Help(None)
        ));
        if let Command::Help(Some(topic)) = MetaCommandParser::parse("help frame").unwrap() {
            assert_eq!(topic, "frame");
        } else {
            panic!("Expected Help command with topic");
        }
    }

    #[test]
    fn test_parse_new_takes_whole_title() {
        if let Command::New { title } = MetaCommandParser::parse("new Intro to Rust").unwrap() {
            assert_eq!(title, "Intro to Rust");
        } else {
            panic!("Expected New command");
        }
        assert!(MetaCommandParser::parse("new").is_err());
    }

    #[test]
    fn test_parse_open_and_save() {
        if let Command::Open { path } = MetaCommandParser::parse("open talk.tex").unwrap() {
            assert_eq!(path, PathBuf::from("talk.tex"));
        } else {
            panic!("Expected Open command");
        }
        assert!(MetaCommandParser::parse("open").is_err());

        assert!(matches!(
            MetaCommandParser::parse("save").unwrap(),
            Command::Save { path: None }
        ));
        if let Command::Save { path: Some(path) } = MetaCommandParser::parse("save out.tex").unwrap()
        {
            assert_eq!(path, PathBuf::from("out.tex"));
        } else {
            panic!("Expected Save command with path");
        }
    }

    #[test]
    fn test_parse_frame_title() {
        if let Command::Frame { title } = MetaCommandParser::parse("frame The Problem").unwrap() {
            assert_eq!(title, "The Problem");
        } else {
            panic!("Expected Frame command");
        }
        assert!(MetaCommandParser::parse("frame").is_err());
    }

    #[test]
    fn test_parse_body_index() {
        assert!(matches!(
            MetaCommandParser::parse("body").unwrap(),
            Command::Body { index: None }
        ));
        assert!(matches!(
            MetaCommandParser::parse("body 2").unwrap(),
            Command::Body { index: Some(2) }
        ));
        assert!(MetaCommandParser::parse("body 0").is_err());
        assert!(MetaCommandParser::parse("body two").is_err());
    }

    #[test]
    fn test_parse_show_targets() {
        assert!(matches!(
            MetaCommandParser::parse("show outline").unwrap(),
            Command::Show(ShowTarget::Outline)
        ));
        assert!(matches!(
            MetaCommandParser::parse("show commands").unwrap(),
            Command::Show(ShowTarget::Commands)
        ));
        assert!(matches!(
            MetaCommandParser::parse("show recent").unwrap(),
            Command::Show(ShowTarget::Recent)
        ));
        assert!(MetaCommandParser::parse("show").is_err());
        assert!(MetaCommandParser::parse("show everything").is_err());
    }

    #[test]
    fn test_parse_drop_index() {
        assert!(matches!(
            MetaCommandParser::parse("drop 3").unwrap(),
            Command::Drop { index: 3 }
        ));
        assert!(MetaCommandParser::parse("drop").is_err());
        assert!(MetaCommandParser::parse("drop 0").is_err());
        assert!(MetaCommandParser::parse("drop last").is_err());
    }
}
