//! Candidate resolution against the knowledge base.
//!
//! Resolution is a pure function of (knowledge base snapshot, partial
//! token): it never mutates the base and carries no state of its own.
//! Candidates come out in knowledge-base iteration order and are never
//! re-sorted; the session and UI preserve that order all the way to the
//! screen.
//!
//! The engine consumes the resolver through the [`CandidateSource`] trait.
//! Exactly one implementation is selected when the engine is built; there
//! is no per-call probing for a richer backend.

use std::sync::Arc;

use crate::kb::{CommandEntry, CommandKnowledgeBase, EnvironmentVariant};

use super::pattern::{PartialToken, ESCAPE_CHAR};

/// One row of the suggestion list: an entry (or environment variant)
/// flattened to what display and commit need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionCandidate {
    /// Text shown in the list: a command token or an environment name.
    pub label: String,
    /// Replacement applied over the anchor on commit.
    pub template: String,
    /// One-line summary for the popup.
    pub description: String,
}

impl SuggestionCandidate {
    fn from_entry(entry: &CommandEntry) -> Self {
        Self {
            label: entry.token.clone(),
            template: entry.template.clone(),
            description: entry.description.clone(),
        }
    }

    fn from_variant(variant: &EnvironmentVariant) -> Self {
        Self {
            label: variant.name.clone(),
            template: variant.template.clone(),
            description: variant.description.clone(),
        }
    }
}

/// Which completion mode a partial token denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// Completing a command token by prefix.
    Command { prefix: String },
    /// Completing an environment name inside `starter{`.
    Environment {
        /// The starter token, e.g. `\begin`.
        starter: String,
        /// Name fragment typed after the opening brace.
        filter: String,
        /// A closing brace is already present; the user is overwriting a
        /// complete name, so no filter applies.
        closed: bool,
    },
}

/// Source of completion candidates behind the engine.
///
/// The strategy seam: the engine holds one `Arc<dyn CandidateSource>`
/// chosen at startup and calls it for every settled partial token.
pub trait CandidateSource: Send + Sync {
    /// Candidates for `partial`, in source order. Empty means the caller
    /// must close any open session.
    fn resolve(&self, partial: &PartialToken) -> Vec<SuggestionCandidate>;
}

/// Knowledge-base-backed candidate source.
pub struct SuggestionResolver {
    kb: Arc<CommandKnowledgeBase>,
}

impl SuggestionResolver {
    /// Create a resolver over a shared knowledge base.
    pub fn new(kb: Arc<CommandKnowledgeBase>) -> Self {
        Self { kb }
    }

    /// Classify a partial token into its completion mode.
    ///
    /// Environment mode requires an environment-starter token followed by
    /// an opening brace, e.g. `\begin{ite`. Everything else is prefix
    /// completion over command tokens.
    pub fn classify(&self, partial: &str) -> CompletionContext {
        for starter in self.kb.search(|e| e.is_starter()) {
            let open = format!("{}{{", starter.token);
            if let Some(rest) = partial.strip_prefix(open.as_str()) {
                let closed = rest.contains('}');
                let filter = rest.split('}').next().unwrap_or("").to_string();
                return CompletionContext::Environment {
                    starter: starter.token.clone(),
                    filter,
                    closed,
                };
            }
        }
        CompletionContext::Command {
            prefix: partial.to_string(),
        }
    }

    fn resolve_command(&self, prefix: &str) -> Vec<SuggestionCandidate> {
        let matches: Vec<SuggestionCandidate> = self
            .kb
            .iter()
            .filter(|e| e.token.starts_with(prefix))
            .map(SuggestionCandidate::from_entry)
            .collect();

        // Guard for a bare escape character against a base of bare tokens
        // only. With any escaped token present the prefix match above
        // already returns everything, so this stays cold.
        if matches.is_empty() && prefix.len() == 1 && prefix.starts_with(ESCAPE_CHAR) {
            return self.kb.iter().map(SuggestionCandidate::from_entry).collect();
        }
        matches
    }

    fn resolve_environment(&self, starter: &str, filter: &str, closed: bool) -> Vec<SuggestionCandidate> {
        let Some(entry) = self.kb.lookup(starter) else {
            return Vec::new();
        };
        entry
            .variants()
            .iter()
            .filter(|v| closed || v.name.starts_with(filter))
            .map(SuggestionCandidate::from_variant)
            .collect()
    }
}

impl CandidateSource for SuggestionResolver {
    fn resolve(&self, partial: &PartialToken) -> Vec<SuggestionCandidate> {
        match self.classify(&partial.text) {
            CompletionContext::Command { prefix } => self.resolve_command(&prefix),
            CompletionContext::Environment {
                starter,
                filter,
                closed,
            } => self.resolve_environment(&starter, &filter, closed),
        }
    }
}
