//! User command file loading.
//!
//! Users may extend the knowledge base with their own macros through a JSON
//! file referenced from the config (`completion.user_commands_file`). The
//! format is an object keyed by token:
//!
//! ```json
//! {
//!     "\\mytheorem": {
//!         "syntax": "\\mytheorem{$1}",
//!         "description": "Local theorem macro",
//!         "category": "user"
//!     }
//! }
//! ```
//!
//! All fields are optional; a missing `syntax` falls back to the token
//! itself. The file is read once at startup and merged over the built-in
//! tables (last write wins per token). It is never written by beamsh.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::{ConfigError, Result};
use crate::kb::{template_is_well_formed, CommandEntry};

/// One value in the user command file.
#[derive(Debug, Deserialize)]
struct UserCommand {
    #[serde(default)]
    syntax: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
}

/// Parse user commands from a JSON string.
///
/// Tokens come out in lexical order (the map key order), which becomes
/// their insertion order in the knowledge base. Entries are never dropped;
/// a suspicious template only logs a warning.
pub fn parse_user_commands(json: &str) -> Result<Vec<CommandEntry>> {
    let raw: BTreeMap<String, UserCommand> = serde_json::from_str(json)
        .map_err(|e| ConfigError::InvalidFormat(format!("user command file: {e}")))?;

    let mut entries = Vec::with_capacity(raw.len());
    for (token, command) in raw {
        let template = if command.syntax.is_empty() {
            token.clone()
        } else {
            command.syntax
        };
        if !template_is_well_formed(&template) {
            warn!("user command '{token}' has irregular placeholders");
        }
        let category = if command.category.is_empty() {
            "user".to_string()
        } else {
            command.category
        };
        entries.push(CommandEntry {
            token,
            template,
            description: command.description,
            category,
            kind: crate::kb::CommandKind::Plain,
        });
    }
    Ok(entries)
}

/// Load user commands from `path`.
pub fn load_user_entries(path: &Path) -> Result<Vec<CommandEntry>> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()).into());
    }
    let json = fs::read_to_string(path)
        .map_err(|e| ConfigError::InvalidFormat(format!("{}: {e}", path.display())))?;
    parse_user_commands(&json)
}
