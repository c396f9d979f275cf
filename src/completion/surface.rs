//! Host text surface contract and the in-memory buffer implementation.
//!
//! The completion engine never talks to a concrete widget or line editor;
//! it observes and mutates whatever implements [`TextSurface`]. Queries
//! return `Option` so a host that cannot answer (stale line index, widget
//! gone) makes the engine close its session instead of failing the caller.
//!
//! [`FrameBuffer`] is the crate's own surface: the multi-line buffer behind
//! the frame composer, also used directly by the engine tests.

/// A position in the host buffer: 0-based line and 0-based column, counted
/// in characters (code points), never bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open span `[start, end)` in the host buffer. For a suggestion
/// session this runs from the escape character to the cursor and is the
/// region replaced on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub start: Position,
    pub end: Position,
}

impl Anchor {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// The editable text buffer the completion engine observes and mutates.
///
/// Mutations return `false` when the host could not perform them; the
/// engine treats that the same as a failed query and degrades silently.
pub trait TextSurface {
    /// Current cursor as (line, column).
    fn cursor(&self) -> Option<Position>;

    /// Text of `line` without a trailing newline.
    fn line_text(&self, line: usize) -> Option<String>;

    /// Insert `text` at `position`. `text` may contain newlines.
    fn insert(&mut self, position: Position, text: &str) -> bool;

    /// Delete the half-open span `[start, end)`.
    fn delete_range(&mut self, start: Position, end: Position) -> bool;

    /// Move the cursor.
    fn set_cursor(&mut self, position: Position) -> bool;
}

/// In-memory multi-line text buffer.
///
/// Always holds at least one (possibly empty) line. Editing helpers keep
/// the cursor consistent; columns are clamped to line length rather than
/// rejected, matching how a text widget behaves.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    lines: Vec<String>,
    cursor: Position,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create an empty buffer with the cursor at the origin.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::new(0, 0),
        }
    }

    /// Create a buffer from existing text, cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = if text.is_empty() {
            vec![String::new()]
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        let last = lines.len() - 1;
        let column = lines[last].chars().count();
        Self {
            lines,
            cursor: Position::new(last, column),
        }
    }

    /// Full buffer content joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Byte index for a character column, clamped to line end.
    fn byte_at(line: &str, column: usize) -> usize {
        line.char_indices()
            .nth(column)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines[line].chars().count()
    }

    fn clamp(&self, position: Position) -> Option<Position> {
        if position.line >= self.lines.len() {
            return None;
        }
        let column = position.column.min(self.line_len(position.line));
        Some(Position::new(position.line, column))
    }

    /// Insert a character at the cursor and advance it.
    pub fn insert_char(&mut self, c: char) {
        let Position { line, column } = self.cursor;
        let byte = Self::byte_at(&self.lines[line], column);
        self.lines[line].insert(byte, c);
        self.cursor.column += 1;
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let Position { line, column } = self.cursor;
        let byte = Self::byte_at(&self.lines[line], column);
        let tail = self.lines[line].split_off(byte);
        self.lines.insert(line + 1, tail);
        self.cursor = Position::new(line + 1, 0);
    }

    /// Delete the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        let Position { line, column } = self.cursor;
        if column > 0 {
            let byte = Self::byte_at(&self.lines[line], column - 1);
            self.lines[line].remove(byte);
            self.cursor.column -= 1;
        } else if line > 0 {
            let tail = self.lines.remove(line);
            let new_column = self.line_len(line - 1);
            self.lines[line - 1].push_str(&tail);
            self.cursor = Position::new(line - 1, new_column);
        }
    }

    /// Delete the character under the cursor, joining lines at line end.
    pub fn delete_forward(&mut self) {
        let Position { line, column } = self.cursor;
        if column < self.line_len(line) {
            let byte = Self::byte_at(&self.lines[line], column);
            self.lines[line].remove(byte);
        } else if line + 1 < self.lines.len() {
            let tail = self.lines.remove(line + 1);
            self.lines[line].push_str(&tail);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.line_len(self.cursor.line);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor.column < self.line_len(self.cursor.line) {
            self.cursor.column += 1;
        } else if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.cursor.column = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.cursor.column.min(self.line_len(self.cursor.line));
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.cursor.column = self.cursor.column.min(self.line_len(self.cursor.line));
        }
    }

    pub fn move_line_start(&mut self) {
        self.cursor.column = 0;
    }

    pub fn move_line_end(&mut self) {
        self.cursor.column = self.line_len(self.cursor.line);
    }
}

impl TextSurface for FrameBuffer {
    fn cursor(&self) -> Option<Position> {
        Some(self.cursor)
    }

    fn line_text(&self, line: usize) -> Option<String> {
        self.lines.get(line).cloned()
    }

    fn insert(&mut self, position: Position, text: &str) -> bool {
        let Some(position) = self.clamp(position) else {
            return false;
        };
        let byte = Self::byte_at(&self.lines[position.line], position.column);
        let tail = self.lines[position.line].split_off(byte);

        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.lines[position.line].push_str(first);
        }
        let mut insert_at = position.line;
        for part in parts {
            insert_at += 1;
            self.lines.insert(insert_at, part.to_string());
        }
        self.lines[insert_at].push_str(&tail);
        true
    }

    fn delete_range(&mut self, start: Position, end: Position) -> bool {
        let (Some(start), Some(end)) = (self.clamp(start), self.clamp(end)) else {
            return false;
        };
        if end < start {
            return false;
        }
        if start.line == end.line {
            let line = &mut self.lines[start.line];
            let from = Self::byte_at(line, start.column);
            let to = Self::byte_at(line, end.column);
            line.drain(from..to);
        } else {
            let from = Self::byte_at(&self.lines[start.line], start.column);
            let to = Self::byte_at(&self.lines[end.line], end.column);
            let tail = self.lines[end.line][to..].to_string();
            self.lines[start.line].truncate(from);
            self.lines[start.line].push_str(&tail);
            self.lines.drain(start.line + 1..=end.line);
        }
        true
    }

    fn set_cursor(&mut self, position: Position) -> bool {
        match self.clamp(position) {
            Some(position) => {
                self.cursor = position;
                true
            }
            None => false,
        }
    }
}
