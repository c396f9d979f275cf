//! Template application and cursor placement.
//!
//! Committing a candidate replaces the anchor span with the template text,
//! markers and all, then resolves the first stop: the first `$1` (falling
//! back to `$2`) inside the inserted span has its two-character marker
//! removed and receives the cursor. Nothing outside the inserted span is
//! ever searched, and no second stop is resolved; later markers stay in
//! the text for the user. A template without markers puts the cursor at
//! the end of the insertion.

use tracing::debug;

use super::surface::{Anchor, Position, TextSurface};

/// Byte offset of the marker that receives the cursor: first `$1`, else
/// first `$2`, else none.
fn first_stop(template: &str) -> Option<usize> {
    template.find("$1").or_else(|| template.find("$2"))
}

/// Position reached by walking `walked` (already-inserted text, possibly
/// multi-line) from `start`.
fn position_after(start: Position, walked: &str) -> Position {
    match walked.rfind('\n') {
        Some(newline) => {
            let lines_down = walked.matches('\n').count();
            let column = walked[newline + 1..].chars().count();
            Position::new(start.line + lines_down, column)
        }
        None => Position::new(start.line, start.column + walked.chars().count()),
    }
}

/// Template text after its first stop is resolved: the chosen marker
/// removed, everything else literal. This is what the buffer contains once
/// [`apply`] has run.
pub fn committed_text(template: &str) -> String {
    match first_stop(template) {
        Some(at) => {
            let mut text = template.to_string();
            text.replace_range(at..at + 2, "");
            text
        }
        None => template.to_string(),
    }
}

/// Character offset of the cursor within [`committed_text`].
pub fn committed_cursor_offset(template: &str) -> usize {
    match first_stop(template) {
        Some(at) => template[..at].chars().count(),
        None => committed_text(template).chars().count(),
    }
}

/// Replace `anchor` with `template` on `surface` and place the cursor.
///
/// Follows the commit contract literally: insert the template with its
/// markers, then delete the two marker characters of the first stop and
/// park the cursor in their place. Returns `false` when the surface
/// refused an operation; the buffer may then hold a partial edit, which
/// the caller reports as a failed commit and otherwise ignores.
pub fn apply(surface: &mut dyn TextSurface, anchor: Anchor, template: &str) -> bool {
    if !surface.delete_range(anchor.start, anchor.end) {
        debug!("commit aborted: anchor span rejected by surface");
        return false;
    }
    if !surface.insert(anchor.start, template) {
        debug!("commit aborted: insertion rejected by surface");
        return false;
    }

    let cursor = match first_stop(template) {
        Some(at) => {
            let marker = position_after(anchor.start, &template[..at]);
            let marker_end = Position::new(marker.line, marker.column + 2);
            if !surface.delete_range(marker, marker_end) {
                return false;
            }
            marker
        }
        None => position_after(anchor.start, template),
    };
    surface.set_cursor(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::surface::FrameBuffer;

    fn anchor(line: usize, from: usize, to: usize) -> Anchor {
        Anchor::new(Position::new(line, from), Position::new(line, to))
    }

    #[test]
    fn test_commit_resolves_only_the_first_placeholder() {
        let mut buffer = FrameBuffer::from_text("\\fra");
        assert!(apply(&mut buffer, anchor(0, 0, 4), "\\frac{$1}{$2}"));
        assert_eq!(buffer.text(), "\\frac{}{$2}");
        assert_eq!(buffer.cursor(), Some(Position::new(0, 6)));
    }

    #[test]
    fn test_commit_falls_back_to_second_placeholder() {
        let mut buffer = FrameBuffer::from_text("\\on");
        assert!(apply(&mut buffer, anchor(0, 0, 3), "\\onslide<$2>"));
        assert_eq!(buffer.text(), "\\onslide<>");
        assert_eq!(buffer.cursor(), Some(Position::new(0, 9)));
    }

    #[test]
    fn test_commit_without_markers_parks_cursor_at_end() {
        let mut buffer = FrameBuffer::from_text("\\pau");
        assert!(apply(&mut buffer, anchor(0, 0, 4), "\\pause"));
        assert_eq!(buffer.text(), "\\pause");
        assert_eq!(buffer.cursor(), Some(Position::new(0, 6)));
    }

    #[test]
    fn test_commit_replaces_only_the_anchor_span() {
        let mut buffer = FrameBuffer::from_text("x = \\fra + 1");
        assert!(apply(&mut buffer, anchor(0, 4, 8), "\\frac{$1}{$2}"));
        assert_eq!(buffer.text(), "x = \\frac{}{$2} + 1");
        assert_eq!(buffer.cursor(), Some(Position::new(0, 10)));
    }

    #[test]
    fn test_commit_multiline_template_places_cursor_on_inner_line() {
        let mut buffer = FrameBuffer::from_text("\\begin{ite");
        let template = "\\begin{itemize}\n\\item $1\n\\end{itemize}";
        assert!(apply(&mut buffer, anchor(0, 0, 10), template));
        assert_eq!(buffer.text(), "\\begin{itemize}\n\\item \n\\end{itemize}");
        assert_eq!(buffer.cursor(), Some(Position::new(1, 6)));
    }

    #[test]
    fn test_commit_multiline_keeps_surrounding_text() {
        let mut buffer = FrameBuffer::from_text("before \\begin{fig after");
        let template = "\\begin{figure}\n\\centering\n$1\n\\end{figure}";
        assert!(apply(&mut buffer, anchor(0, 7, 17), template));
        assert_eq!(
            buffer.text(),
            "before \\begin{figure}\n\\centering\n\n\\end{figure} after"
        );
        assert_eq!(buffer.cursor(), Some(Position::new(2, 0)));
    }

    #[test]
    fn test_marker_search_stays_inside_the_insertion() {
        // Literal $1 already in the buffer after the anchor must not
        // attract the cursor when the template has no markers.
        let mut buffer = FrameBuffer::from_text("\\pau $1");
        assert!(apply(&mut buffer, anchor(0, 0, 4), "\\pause"));
        assert_eq!(buffer.text(), "\\pause $1");
        assert_eq!(buffer.cursor(), Some(Position::new(0, 6)));
    }

    #[test]
    fn test_apply_fails_on_invalid_anchor() {
        let mut buffer = FrameBuffer::from_text("short");
        assert!(!apply(&mut buffer, anchor(3, 0, 1), "\\pause"));
        assert_eq!(buffer.text(), "short");
    }

    #[test]
    fn test_committed_text_and_offset() {
        assert_eq!(committed_text("\\frac{$1}{$2}"), "\\frac{}{$2}");
        assert_eq!(committed_cursor_offset("\\frac{$1}{$2}"), 6);
        assert_eq!(committed_text("\\pause"), "\\pause");
        assert_eq!(committed_cursor_offset("\\pause"), 6);
        assert_eq!(committed_text("\\onslide<$2>"), "\\onslide<>");
        assert_eq!(committed_cursor_offset("\\onslide<$2>"), 9);
    }
}
