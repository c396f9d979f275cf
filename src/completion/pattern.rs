//! Partial-token detection over the current line.
//!
//! The detector answers one question per change notification: is there an
//! unterminated command token between the nearest escape character and the
//! cursor? Patterns never span lines, so only the cursor's line is
//! examined. A bare escape character is itself a valid opportunity; the
//! design over-triggers rather than under-triggers, and a useless popup is
//! closed by the resolver returning zero candidates.
//!
//! The detector also carries the debounce memory: an identical detection
//! is reported as [`Detection::Unchanged`] so the caller skips resolution
//! and repaint, no matter how many change notifications collapsed into the
//! scan.

/// Character that opens a command token.
pub const ESCAPE_CHAR: char = '\\';

/// The unterminated command token under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialToken {
    /// Token text from the escape character to the cursor, inclusive of
    /// the escape character itself.
    pub text: String,
    /// Line the token sits on.
    pub line: usize,
    /// Character column of the escape character.
    pub start_column: usize,
}

/// Outcome of a stateful scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// No escape character before the cursor; any open session must close.
    NoOpportunity,
    /// Same partial token as the previous scan; skip all work.
    Unchanged,
    /// A new or changed partial token.
    Changed(PartialToken),
}

/// Scans lines for completion opportunities, remembering the last one.
#[derive(Debug, Default)]
pub struct PatternDetector {
    last: Option<PartialToken>,
}

impl PatternDetector {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Stateless extraction: the partial token on `line_text` ending at
    /// `cursor_column`, if any. Columns are character counts; an
    /// out-of-range column is clamped to the line end.
    pub fn extract(line_text: &str, line: usize, cursor_column: usize) -> Option<PartialToken> {
        let chars: Vec<char> = line_text.chars().collect();
        let column = cursor_column.min(chars.len());
        let start = chars[..column].iter().rposition(|&c| c == ESCAPE_CHAR)?;
        Some(PartialToken {
            text: chars[start..column].iter().collect(),
            line,
            start_column: start,
        })
    }

    /// Stateful scan with unchanged-suppression.
    pub fn scan(&mut self, line_text: &str, line: usize, cursor_column: usize) -> Detection {
        match Self::extract(line_text, line, cursor_column) {
            None => {
                self.last = None;
                Detection::NoOpportunity
            }
            Some(partial) => {
                if self.last.as_ref() == Some(&partial) {
                    Detection::Unchanged
                } else {
                    self.last = Some(partial.clone());
                    Detection::Changed(partial)
                }
            }
        }
    }

    /// Forget the previous detection, forcing the next scan to re-report.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
