//! Workspace session persistence
//!
//! Remembers which decks were opened recently so the shell can offer to
//! resume where the user left off. The state lives in a small TOML file
//! (by default `~/.beamsh/session.toml`) and is written on every deck
//! open and save.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, warn};

use crate::error::{Result, SessionError};

/// One remembered deck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentDeck {
    /// Path to the `.tex` file.
    pub path: PathBuf,

    /// When the deck was last opened, as a local timestamp.
    pub last_opened: String,
}

/// Persistent session state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionStore {
    /// The deck that was open when the shell last exited.
    pub last_deck: Option<PathBuf>,

    /// Recently opened decks, most recent first.
    pub recent: Vec<RecentDeck>,
}

impl SessionStore {
    /// Create an empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load session state from `path`.
    ///
    /// A missing file is not an error; it yields an empty store. A file
    /// that exists but cannot be parsed is reported so a corrupt session
    /// file never blocks startup at the call site.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No session file at {}, starting fresh", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| SessionError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        let store: SessionStore = toml::from_str(&text)
            .map_err(|e| SessionError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(store)
    }

    /// Load session state, falling back to an empty store on any failure.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!("Ignoring unreadable session file: {}", e);
                Self::default()
            }
        }
    }

    /// Save session state to `path`, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)
            .map_err(|e| SessionError::SaveFailed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SessionError::SaveFailed(format!("{}: {}", parent.display(), e)))?;
            }
        }
        std::fs::write(path, text)
            .map_err(|e| SessionError::SaveFailed(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Record that `deck` was just opened.
    ///
    /// The deck moves to the front of the recent list; duplicates are
    /// removed and the list is truncated to `limit` entries.
    pub fn touch<P: AsRef<Path>>(&mut self, deck: P, limit: usize) {
        let deck = deck.as_ref().to_path_buf();
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        self.recent.retain(|entry| entry.path != deck);
        self.recent.insert(
            0,
            RecentDeck {
                path: deck.clone(),
                last_opened: timestamp,
            },
        );
        self.recent.truncate(limit);
        self.last_deck = Some(deck);
    }

    /// The most recently opened decks, newest first.
    pub fn recent(&self) -> &[RecentDeck] {
        &self.recent
    }

    /// The deck to offer on startup, if any.
    pub fn last_deck(&self) -> Option<&Path> {
        self.last_deck.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_orders_most_recent_first() {
        let mut store = SessionStore::new();
        store.touch("a.tex", 10);
        store.touch("b.tex", 10);
        store.touch("c.tex", 10);

        let paths: Vec<_> = store.recent().iter().map(|r| r.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("c.tex"),
                PathBuf::from("b.tex"),
                PathBuf::from("a.tex")
            ]
        );
        assert_eq!(store.last_deck(), Some(Path::new("c.tex")));
    }

    #[test]
    fn test_touch_deduplicates() {
        let mut store = SessionStore::new();
        store.touch("a.tex", 10);
        store.touch("b.tex", 10);
        store.touch("a.tex", 10);

        let paths: Vec<_> = store.recent().iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("a.tex"), PathBuf::from("b.tex")]);
    }

    #[test]
    fn test_touch_respects_limit() {
        let mut store = SessionStore::new();
        for i in 0..5 {
            store.touch(format!("deck{i}.tex"), 3);
        }
        assert_eq!(store.recent().len(), 3);
        assert_eq!(store.recent()[0].path, PathBuf::from("deck4.tex"));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut store = SessionStore::new();
        store.touch("talk.tex", 10);

        let text = toml::to_string_pretty(&store).unwrap();
        let parsed: SessionStore = toml::from_str(&text).unwrap();
        assert_eq!(parsed.last_deck, Some(PathBuf::from("talk.tex")));
        assert_eq!(parsed.recent.len(), 1);
        assert_eq!(parsed.recent[0].path, PathBuf::from("talk.tex"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let store = SessionStore::load("/nonexistent/beamsh-session.toml").unwrap();
        assert!(store.recent().is_empty());
        assert!(store.last_deck().is_none());
    }
}
