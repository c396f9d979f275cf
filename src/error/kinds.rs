use std::{fmt, io};

/// Crate-wide `Result` type using [`BeamshError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, BeamshError>;

/// Top-level error type for beamsh operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum BeamshError {
    /// Deck document errors.
    Deck(DeckError),

    /// Command parsing errors.
    Parse(ParseError),

    /// Configuration errors.
    Config(ConfigError),

    /// Workspace session file errors.
    Session(SessionError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Deck-document-specific errors.
#[derive(Debug)]
pub enum DeckError {
    /// Deck file not found.
    FileNotFound(String),

    /// Failed to read a deck file.
    LoadFailed(String),

    /// Failed to write a deck file.
    SaveFailed(String),

    /// Save requested but no path is associated with the deck.
    NoPath,

    /// Content targeted at a frame while the deck has none.
    NoActiveFrame,

    /// Frame index outside the deck.
    FrameOutOfRange { index: usize, count: usize },
}

/// Parsing-specific errors for shell commands.
#[derive(Debug)]
pub enum ParseError {
    /// Command word not recognized.
    UnknownCommand(String),

    /// Command is missing a required argument.
    MissingArgument { command: String, argument: String },

    /// Argument present but not usable.
    InvalidArgument { command: String, value: String },
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Workspace-session-file errors.
#[derive(Debug)]
pub enum SessionError {
    /// Failed to read the session file.
    LoadFailed(String),

    /// Failed to write the session file.
    SaveFailed(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for BeamshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeamshError::Deck(e) => write!(f, "Deck error: {e}"),
            BeamshError::Parse(e) => write!(f, "{e}"),
            BeamshError::Config(e) => write!(f, "Configuration error: {e}"),
            BeamshError::Session(e) => write!(f, "Session error: {e}"),
            BeamshError::Io(e) => write!(f, "I/O error: {e}"),
            BeamshError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::FileNotFound(path) => write!(f, "Deck file not found: {path}"),
            DeckError::LoadFailed(msg) => write!(f, "Failed to load deck: {msg}"),
            DeckError::SaveFailed(msg) => write!(f, "Failed to save deck: {msg}"),
            DeckError::NoPath => write!(f, "No file path for this deck (use 'save <path>')"),
            DeckError::NoActiveFrame => {
                write!(f, "No frame to write to (start one with 'frame <title>')")
            }
            DeckError::FrameOutOfRange { index, count } => {
                write!(f, "Frame {index} out of range (deck has {count})")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand(cmd) => write!(f, "Unknown command: {cmd}"),
            ParseError::MissingArgument { command, argument } => {
                write!(f, "Command '{command}' requires <{argument}>")
            }
            ParseError::InvalidArgument { command, value } => {
                write!(f, "Invalid argument '{value}' for command '{command}'")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::LoadFailed(msg) => write!(f, "Failed to load session file: {msg}"),
            SessionError::SaveFailed(msg) => write!(f, "Failed to save session file: {msg}"),
        }
    }
}

impl std::error::Error for BeamshError {}
impl std::error::Error for DeckError {}
impl std::error::Error for ParseError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for SessionError {}

/* ========================= Conversions to BeamshError ========================= */

impl From<io::Error> for BeamshError {
    fn from(err: io::Error) -> Self {
        BeamshError::Io(err)
    }
}

impl From<DeckError> for BeamshError {
    fn from(err: DeckError) -> Self {
        BeamshError::Deck(err)
    }
}

impl From<ParseError> for BeamshError {
    fn from(err: ParseError) -> Self {
        BeamshError::Parse(err)
    }
}

impl From<ConfigError> for BeamshError {
    fn from(err: ConfigError) -> Self {
        BeamshError::Config(err)
    }
}

impl From<SessionError> for BeamshError {
    fn from(err: SessionError) -> Self {
        BeamshError::Session(err)
    }
}

impl From<String> for BeamshError {
    fn from(msg: String) -> Self {
        BeamshError::Generic(msg)
    }
}

impl From<&str> for BeamshError {
    fn from(msg: &str) -> Self {
        BeamshError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let err = BeamshError::from(DeckError::FrameOutOfRange { index: 7, count: 3 });
        assert_eq!(err.to_string(), "Deck error: Frame 7 out of range (deck has 3)");

        let err = BeamshError::from(ParseError::MissingArgument {
            command: "open".to_string(),
            argument: "path".to_string(),
        });
        assert_eq!(err.to_string(), "Command 'open' requires <path>");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: BeamshError = io_err.into();
        assert!(matches!(err, BeamshError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let err: BeamshError = "plain message".into();
        assert_eq!(err.to_string(), "plain message");
    }
}
