//! Inline frame composer
//!
//! A small raw-mode editor for writing a frame body in place, with the
//! debounced completion popup active while typing. The terminal loop
//! and the key handling are separated so the editing behavior is
//! testable without a terminal: `handle_key` mutates the buffer and
//! drives the completion engine, `run` owns raw mode, paints, and polls
//! events with the engine's debounce deadline as the timeout.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::queue;
use tracing::debug;

use crate::completion::{
    CandidateSource, CompletionEngine, FrameBuffer, NavDirection, Position, SuggestionCandidate,
    SuggestionUi, TextSurface,
};
use crate::error::Result;

/// Idle poll timeout when no debounce deadline is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// What a key event decided for the composer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerEvent {
    /// Keep editing.
    Continue,
    /// Leave the composer, keeping the buffer.
    Finish,
    /// Leave the composer, discarding the buffer.
    Abort,
}

/// Popup model the engine paints into.
///
/// Pure state; the composer reads it back when drawing a frame.
#[derive(Debug)]
struct PopupState {
    visible: bool,
    candidates: Vec<SuggestionCandidate>,
    highlighted: usize,
    anchor: Position,
}

impl Default for PopupState {
    fn default() -> Self {
        Self {
            visible: false,
            candidates: Vec::new(),
            highlighted: 0,
            anchor: Position::new(0, 0),
        }
    }
}

impl SuggestionUi for PopupState {
    fn on_session_opened(
        &mut self,
        candidates: &[SuggestionCandidate],
        highlighted: usize,
        anchor_start: Position,
    ) {
        self.visible = true;
        self.candidates = candidates.to_vec();
        self.highlighted = highlighted;
        self.anchor = anchor_start;
    }

    fn on_session_updated(&mut self, candidates: &[SuggestionCandidate], highlighted: usize) {
        self.candidates = candidates.to_vec();
        self.highlighted = highlighted;
    }

    fn on_session_closed(&mut self) {
        self.visible = false;
        self.candidates.clear();
    }
}

/// Raw-mode frame body editor with completion.
pub struct Composer {
    buffer: FrameBuffer,
    engine: CompletionEngine,
    popup: PopupState,
    /// Rows shown from the popup before it scrolls.
    max_popup_rows: usize,
}

impl Composer {
    /// Create a composer over an empty buffer.
    pub fn new(source: Arc<dyn CandidateSource>, debounce: Duration, max_popup_rows: usize) -> Self {
        Self::with_text(source, debounce, max_popup_rows, "")
    }

    /// Create a composer pre-filled with existing frame content.
    pub fn with_text(
        source: Arc<dyn CandidateSource>,
        debounce: Duration,
        max_popup_rows: usize,
        text: &str,
    ) -> Self {
        Self {
            buffer: FrameBuffer::from_text(text),
            engine: CompletionEngine::new(source, debounce),
            popup: PopupState::default(),
            max_popup_rows,
        }
    }

    /// Current buffer content.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Whether the suggestion popup is showing.
    pub fn popup_visible(&self) -> bool {
        self.popup.visible
    }

    /// Labels currently in the popup, top to bottom.
    pub fn popup_labels(&self) -> Vec<&str> {
        self.popup.candidates.iter().map(|c| c.label.as_str()).collect()
    }

    /// Index of the highlighted popup row.
    pub fn popup_highlighted(&self) -> usize {
        self.popup.highlighted
    }

    /// Run the debounce clock: resolve a pending change once it settles.
    pub fn tick(&mut self) {
        self.engine.tick(&self.buffer, &mut self.popup);
    }

    /// Apply one key event to the buffer and the completion session.
    pub fn handle_key(&mut self, key: KeyEvent) -> ComposerEvent {
        if key.kind != KeyEventKind::Press {
            return ComposerEvent::Continue;
        }

        // Popup keys take priority while a session is open.
        if self.engine.is_open() {
            match key.code {
                KeyCode::Up => {
                    self.engine.navigate(NavDirection::Previous, &mut self.popup);
                    return ComposerEvent::Continue;
                }
                KeyCode::Down => {
                    self.engine.navigate(NavDirection::Next, &mut self.popup);
                    return ComposerEvent::Continue;
                }
                KeyCode::Tab | KeyCode::Enter => {
                    if !self.engine.commit(&mut self.buffer, &mut self.popup) {
                        debug!("suggestion commit failed; buffer unchanged or partial");
                    }
                    return ComposerEvent::Continue;
                }
                KeyCode::Esc => {
                    self.engine.cancel(&mut self.popup);
                    return ComposerEvent::Continue;
                }
                _ => {}
            }
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => ComposerEvent::Abort,
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => ComposerEvent::Finish,
            (KeyCode::Esc, _) => ComposerEvent::Finish,
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.buffer.insert_char(c);
                self.engine.notify_change();
                ComposerEvent::Continue
            }
            (KeyCode::Enter, _) => {
                self.buffer.insert_newline();
                self.engine.notify_change();
                ComposerEvent::Continue
            }
            (KeyCode::Backspace, _) => {
                self.buffer.backspace();
                self.engine.notify_change();
                ComposerEvent::Continue
            }
            (KeyCode::Delete, _) => {
                self.buffer.delete_forward();
                self.engine.notify_change();
                ComposerEvent::Continue
            }
            (KeyCode::Left, _) => {
                self.buffer.move_left();
                self.engine.notify_change();
                ComposerEvent::Continue
            }
            (KeyCode::Right, _) => {
                self.buffer.move_right();
                self.engine.notify_change();
                ComposerEvent::Continue
            }
            (KeyCode::Up, _) => {
                self.buffer.move_up();
                self.engine.notify_change();
                ComposerEvent::Continue
            }
            (KeyCode::Down, _) => {
                self.buffer.move_down();
                self.engine.notify_change();
                ComposerEvent::Continue
            }
            (KeyCode::Home, _) => {
                self.buffer.move_line_start();
                self.engine.notify_change();
                ComposerEvent::Continue
            }
            (KeyCode::End, _) => {
                self.buffer.move_line_end();
                self.engine.notify_change();
                ComposerEvent::Continue
            }
            _ => ComposerEvent::Continue,
        }
    }

    /// Run the composer until the user finishes or aborts.
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Buffer content, or None on abort
    pub fn run(&mut self) -> Result<Option<String>> {
        enable_raw_mode()?;
        let outcome = self.event_loop();
        disable_raw_mode()?;

        let mut stdout = io::stdout();
        queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        stdout.flush()?;

        match outcome? {
            ComposerEvent::Abort => Ok(None),
            _ => Ok(Some(self.buffer.text())),
        }
    }

    fn event_loop(&mut self) -> Result<ComposerEvent> {
        loop {
            self.paint()?;

            let timeout = self.engine.poll_timeout().unwrap_or(IDLE_POLL);
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    match self.handle_key(key) {
                        ComposerEvent::Continue => {}
                        done => return Ok(done),
                    }
                }
            }

            self.tick();
        }
    }

    /// Redraw the whole frame: header, buffer, popup, cursor.
    fn paint(&self) -> Result<()> {
        let mut stdout = io::stdout();
        queue!(
            stdout,
            Clear(ClearType::All),
            MoveTo(0, 0),
            SetAttribute(Attribute::Dim),
            Print("compose: Esc or Ctrl-S keeps the frame, Ctrl-C discards it"),
            SetAttribute(Attribute::Reset),
        )?;

        for (row, line) in self.buffer.lines().iter().enumerate() {
            queue!(stdout, MoveTo(0, row as u16 + 1), Print(line))?;
        }

        if self.popup.visible {
            self.paint_popup(&mut stdout)?;
        }

        if let Some(cursor) = self.buffer.cursor() {
            queue!(stdout, MoveTo(cursor.column as u16, cursor.line as u16 + 1))?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn paint_popup(&self, stdout: &mut io::Stdout) -> Result<()> {
        // Overlay starting on the row below the anchor, indented to it.
        let top = self.popup.anchor.line as u16 + 2;
        let left = self.popup.anchor.column.min(u16::MAX as usize) as u16;
        let first = self.visible_window_start();

        for (row, (index, candidate)) in self
            .popup
            .candidates
            .iter()
            .enumerate()
            .skip(first)
            .take(self.max_popup_rows)
            .enumerate()
        {
            let marker = if index == self.popup.highlighted { "> " } else { "  " };
            queue!(stdout, MoveTo(left, top + row as u16))?;
            if index == self.popup.highlighted {
                queue!(
                    stdout,
                    SetAttribute(Attribute::Reverse),
                    Print(format!("{marker}{}  {}", candidate.label, candidate.description)),
                    SetAttribute(Attribute::Reset),
                )?;
            } else {
                queue!(
                    stdout,
                    Print(format!("{marker}{}  {}", candidate.label, candidate.description)),
                )?;
            }
        }
        Ok(())
    }

    /// First candidate index drawn, keeping the highlight in view.
    fn visible_window_start(&self) -> usize {
        if self.max_popup_rows == 0 || self.popup.highlighted < self.max_popup_rows {
            0
        } else {
            self.popup.highlighted + 1 - self.max_popup_rows
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::SuggestionResolver;
    use crate::kb::CommandKnowledgeBase;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn composer() -> Composer {
        let resolver = SuggestionResolver::new(Arc::new(CommandKnowledgeBase::builtin()));
        Composer::new(Arc::new(resolver), Duration::ZERO, 8)
    }

    fn type_str(composer: &mut Composer, text: &str) {
        for c in text.chars() {
            composer.handle_key(key(KeyCode::Char(c)));
        }
        composer.tick();
    }

    #[test]
    fn test_typing_builds_the_buffer() {
        let mut composer = composer();
        type_str(&mut composer, "hello");
        composer.handle_key(key(KeyCode::Enter));
        type_str(&mut composer, "world");
        assert_eq!(composer.text(), "hello\nworld");
    }

    #[test]
    fn test_escape_partial_opens_popup_after_tick() {
        let mut composer = composer();
        type_str(&mut composer, "\\fra");
        assert!(composer.popup_visible());
        assert!(composer.popup_labels().contains(&"\\frametitle"));
    }

    #[test]
    fn test_plain_text_keeps_popup_closed() {
        let mut composer = composer();
        type_str(&mut composer, "no commands here");
        assert!(!composer.popup_visible());
    }

    #[test]
    fn test_tab_commits_highlighted_candidate() {
        let mut composer = composer();
        type_str(&mut composer, "\\pau");
        assert!(composer.popup_visible());
        composer.handle_key(key(KeyCode::Tab));
        assert_eq!(composer.text(), "\\pause");
        assert!(!composer.popup_visible());
    }

    #[test]
    fn test_navigation_moves_highlight() {
        let mut composer = composer();
        type_str(&mut composer, "\\fra");
        assert_eq!(composer.popup_highlighted(), 0);
        composer.handle_key(key(KeyCode::Down));
        assert_eq!(composer.popup_highlighted(), 1);
        composer.handle_key(key(KeyCode::Up));
        assert_eq!(composer.popup_highlighted(), 0);
    }

    #[test]
    fn test_home_closes_stale_popup() {
        let mut composer = composer();
        type_str(&mut composer, "\\fra");
        assert!(composer.popup_visible());
        // Cursor at line start has no escape before it, so the next
        // pass must close the session.
        composer.handle_key(key(KeyCode::Home));
        composer.tick();
        assert!(!composer.popup_visible());
    }

    #[test]
    fn test_end_refreshes_popup_at_cursor() {
        let mut composer = composer();
        type_str(&mut composer, "\\fra");
        composer.handle_key(key(KeyCode::Home));
        composer.tick();
        assert!(!composer.popup_visible());
        composer.handle_key(key(KeyCode::End));
        composer.tick();
        assert!(composer.popup_visible());
    }

    #[test]
    fn test_escape_closes_popup_without_exiting() {
        let mut composer = composer();
        type_str(&mut composer, "\\fra");
        assert!(composer.popup_visible());
        assert_eq!(composer.handle_key(key(KeyCode::Esc)), ComposerEvent::Continue);
        assert!(!composer.popup_visible());
        assert_eq!(composer.text(), "\\fra");
    }

    #[test]
    fn test_escape_with_popup_closed_finishes() {
        let mut composer = composer();
        type_str(&mut composer, "text");
        assert_eq!(composer.handle_key(key(KeyCode::Esc)), ComposerEvent::Finish);
    }

    #[test]
    fn test_ctrl_c_aborts() {
        let mut composer = composer();
        type_str(&mut composer, "text");
        assert_eq!(composer.handle_key(ctrl('c')), ComposerEvent::Abort);
    }

    #[test]
    fn test_ctrl_s_finishes() {
        let mut composer = composer();
        assert_eq!(composer.handle_key(ctrl('s')), ComposerEvent::Finish);
    }

    #[test]
    fn test_environment_commit_inserts_multiline_template() {
        let mut composer = composer();
        type_str(&mut composer, "\\begin{ite");
        assert!(composer.popup_visible());
        composer.handle_key(key(KeyCode::Tab));
        assert_eq!(composer.text(), "\\begin{itemize}\n\\item \n\\end{itemize}");
    }

    #[test]
    fn test_backspace_reopens_shorter_partial() {
        let mut composer = composer();
        type_str(&mut composer, "\\frac");
        assert_eq!(composer.popup_labels(), vec!["\\frac"]);
        composer.handle_key(key(KeyCode::Backspace));
        composer.tick();
        assert!(composer.popup_labels().len() > 1);
    }

    #[test]
    fn test_prefill_text_is_kept() {
        let resolver = SuggestionResolver::new(Arc::new(CommandKnowledgeBase::builtin()));
        let composer =
            Composer::with_text(Arc::new(resolver), Duration::ZERO, 8, "\\item existing");
        assert_eq!(composer.text(), "\\item existing");
    }

    #[test]
    fn test_visible_window_follows_highlight() {
        let mut composer = composer();
        type_str(&mut composer, "\\");
        assert!(composer.popup_visible());
        for _ in 0..10 {
            composer.handle_key(key(KeyCode::Down));
        }
        assert!(composer.visible_window_start() <= composer.popup_highlighted());
        assert!(
            composer.popup_highlighted()
                < composer.visible_window_start() + composer.max_popup_rows
        );
    }
}
