//! Completer adapter for reedline
//!
//! Bridges the knowledge-base resolver into reedline's `Completer` trait.
//! reedline works in byte offsets over the whole buffer while the
//! resolver works in character columns on a single line, so this adapter
//! isolates the cursor's line and converts offsets both ways.

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use crate::completion::{template, CandidateSource, PatternDetector, SuggestionResolver};
use crate::kb::CommandKnowledgeBase;

/// LaTeX command completer backed by the knowledge base
pub struct LatexCompleter {
    resolver: SuggestionResolver,
    /// Cap on suggestions handed to the menu, 0 means unlimited
    max_candidates: usize,
}

impl LatexCompleter {
    /// Create a completer over a shared knowledge base
    pub fn new(kb: Arc<CommandKnowledgeBase>, max_candidates: usize) -> Self {
        Self {
            resolver: SuggestionResolver::new(kb),
            max_candidates,
        }
    }
}

impl Completer for LatexCompleter {
    /// Complete the command token ending at `pos`
    ///
    /// The suggestion value is the template with its first tab stop
    /// already resolved; reedline then leaves the cursor at the end of
    /// the insertion rather than on the stop. The inline composer is the
    /// surface that honors stop placement.
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let pos = pos.min(line.len());

        // Isolate the cursor's line; tokens never span lines.
        let line_start = line[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = line[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(line.len());
        let line_text = &line[line_start..line_end];
        let cursor_column = line[line_start..pos].chars().count();

        let Some(partial) = PatternDetector::extract(line_text, 0, cursor_column) else {
            return Vec::new();
        };

        // Character column back to a byte offset in the full buffer.
        let start_byte = line_start
            + line_text
                .char_indices()
                .nth(partial.start_column)
                .map(|(i, _)| i)
                .unwrap_or(line_text.len());
        let span = Span::new(start_byte, pos);

        let mut candidates = self.resolver.resolve(&partial);
        if self.max_candidates > 0 {
            candidates.truncate(self.max_candidates);
        }

        candidates
            .into_iter()
            .map(|candidate| Suggestion {
                value: template::committed_text(&candidate.template),
                description: Some(candidate.description),
                style: None,
                extra: None,
                span,
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}
