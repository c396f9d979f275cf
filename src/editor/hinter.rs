//! Hinter for reedline - provides inline hints based on history

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History};

/// History-based hinter
///
/// Shows the remainder of the most recent history entry sharing the
/// current line as a prefix, dimmed after the cursor.
pub struct LatexHinter {
    /// Style for hints
    style: Style,
    /// Current hint text
    current_hint: String,
}

impl LatexHinter {
    /// Create a new hinter with the default dimmed style
    pub fn new() -> Self {
        Self {
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
        }
    }
}

impl Default for LatexHinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Hinter for LatexHinter {
    /// Provide a hint for the current line
    ///
    /// Hints only appear with the cursor at the end of a non-empty line.
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        if pos != line.len() {
            return String::new();
        }

        if line.trim().is_empty() {
            return String::new();
        }

        let search_result = history
            .search(reedline::SearchQuery::last_with_prefix(
                line.to_string(),
                None,
            ))
            .ok()
            .and_then(|results| results.into_iter().next());

        if let Some(history_item) = search_result {
            let history_line = history_item.command_line.as_str();

            if history_line.len() > line.len() && history_line.starts_with(line) {
                let hint = &history_line[line.len()..];

                self.current_hint = hint.to_string();

                if use_ansi_coloring {
                    return self.style.paint(hint).to_string();
                } else {
                    return hint.to_string();
                }
            }
        }

        String::new()
    }

    fn next_hint_token(&self) -> String {
        String::new()
    }

    /// Return the complete hint, consumed by hint-accepting keybindings
    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reedline::FileBackedHistory;
    use std::path::PathBuf;

    fn create_test_history() -> Box<dyn History> {
        Box::new(
            FileBackedHistory::with_file(100, PathBuf::from("/tmp/beamsh_test_history.txt"))
                .unwrap_or_else(|_| FileBackedHistory::new(100).expect("Failed to create history")),
        )
    }

    #[test]
    fn test_new_hinter() {
        let hinter = LatexHinter::new();
        assert_eq!(hinter.next_hint_token(), String::new());
        assert_eq!(hinter.complete_hint(), String::new());
    }

    #[test]
    fn test_empty_line_no_hint() {
        let mut hinter = LatexHinter::new();
        let history = create_test_history();
        let hint = hinter.handle("", 0, history.as_ref(), true, "/tmp");
        assert_eq!(hint, "");
    }

    #[test]
    fn test_cursor_not_at_end_no_hint() {
        let mut hinter = LatexHinter::new();
        let history = create_test_history();
        let hint = hinter.handle("\\frametit", 2, history.as_ref(), true, "/tmp");
        assert_eq!(hint, "");
    }

    #[test]
    fn test_default() {
        let hinter = LatexHinter::default();
        assert_eq!(hinter.complete_hint(), String::new());
    }
}
