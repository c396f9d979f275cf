//! Completion engine orchestration.
//!
//! The engine glues the pieces together on the host's event thread:
//! change notifications arm the debounce gate, the host's loop calls
//! [`CompletionEngine::tick`] until the gate opens, and a single
//! resolve-and-notify pass runs per settled buffer state. Explicit
//! commands (navigate, commit, cancel) bypass the gate and run
//! synchronously in the calling event turn.
//!
//! Nothing here blocks: the knowledge base behind the candidate source is
//! memory-resident, and every failure path degrades by closing the session
//! rather than surfacing an error.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::pattern::{Detection, PatternDetector};
use super::resolver::{CandidateSource, SuggestionCandidate};
use super::session::{NavDirection, SuggestionSession, SuggestionUi};
use super::surface::{Anchor, Position, TextSurface};
use super::template;

/// Coalesces bursts of change notifications into one resolve pass.
///
/// The gate arms on the first notification and ignores further ones while
/// armed (the reentrancy guard); once the delay has elapsed a single pass
/// runs and the gate disarms. Cooperative yield, not concurrency: nothing
/// runs until the host calls back in.
#[derive(Debug)]
struct DebounceGate {
    delay: Duration,
    armed_at: Option<Instant>,
}

impl DebounceGate {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            armed_at: None,
        }
    }

    /// Arm the gate. Returns `false` when already armed.
    fn arm(&mut self) -> bool {
        if self.armed_at.is_some() {
            return false;
        }
        self.armed_at = Some(Instant::now());
        true
    }

    fn ready(&self) -> bool {
        self.armed_at
            .map(|t| t.elapsed() >= self.delay)
            .unwrap_or(false)
    }

    fn disarm(&mut self) {
        self.armed_at = None;
    }

    /// Time until the gate opens, `None` when not armed.
    fn remaining(&self) -> Option<Duration> {
        self.armed_at
            .map(|t| self.delay.saturating_sub(t.elapsed()))
    }
}

/// Drives detection, resolution, and the suggestion session over a host
/// text surface.
///
/// The candidate source is chosen once at construction and shared
/// read-only; the engine owns everything else.
pub struct CompletionEngine {
    source: Arc<dyn CandidateSource>,
    detector: PatternDetector,
    session: SuggestionSession,
    gate: DebounceGate,
}

impl CompletionEngine {
    /// Create an engine over `source`, coalescing change bursts for
    /// `debounce` before each resolve pass.
    pub fn new(source: Arc<dyn CandidateSource>, debounce: Duration) -> Self {
        Self {
            source,
            detector: PatternDetector::new(),
            session: SuggestionSession::new(),
            gate: DebounceGate::new(debounce),
        }
    }

    /// Change notification from the host surface. Carries no payload; the
    /// engine re-queries the surface when the pass runs.
    pub fn notify_change(&mut self) {
        self.gate.arm();
    }

    /// How long the host may sleep before calling [`tick`](Self::tick)
    /// again; `None` when no pass is pending.
    pub fn poll_timeout(&self) -> Option<Duration> {
        self.gate.remaining()
    }

    /// Cooperative tick: runs the pending resolve pass once the debounce
    /// window has elapsed, otherwise does nothing.
    pub fn tick(&mut self, surface: &dyn TextSurface, ui: &mut dyn SuggestionUi) {
        if self.gate.ready() {
            self.gate.disarm();
            self.run_pass(surface, ui);
        }
    }

    /// Run a resolve pass immediately, regardless of the gate (explicit
    /// completion request from the host).
    pub fn refresh_now(&mut self, surface: &dyn TextSurface, ui: &mut dyn SuggestionUi) {
        self.gate.disarm();
        self.detector.reset();
        self.run_pass(surface, ui);
    }

    fn run_pass(&mut self, surface: &dyn TextSurface, ui: &mut dyn SuggestionUi) {
        let Some(cursor) = surface.cursor() else {
            self.close_for_invalid_surface(ui);
            return;
        };
        let Some(line) = surface.line_text(cursor.line) else {
            self.close_for_invalid_surface(ui);
            return;
        };

        match self.detector.scan(&line, cursor.line, cursor.column) {
            Detection::NoOpportunity => self.session.cancel(ui),
            Detection::Unchanged => {}
            Detection::Changed(partial) => {
                let candidates = self.source.resolve(&partial);
                if candidates.is_empty() {
                    self.session.cancel(ui);
                    return;
                }
                let start = Position::new(partial.line, partial.start_column);
                let pinned = self.session.anchor().is_some_and(|a| a.start == start);
                if pinned {
                    self.session.refresh(candidates, cursor, ui);
                } else {
                    self.session.open(candidates, Anchor::new(start, cursor), ui);
                }
            }
        }
    }

    fn close_for_invalid_surface(&mut self, ui: &mut dyn SuggestionUi) {
        debug!("surface query failed; closing suggestion session");
        self.detector.reset();
        self.session.cancel(ui);
    }

    /// Move the highlight; no-op when no session is open.
    pub fn navigate(&mut self, direction: NavDirection, ui: &mut dyn SuggestionUi) {
        self.session.navigate(direction, ui);
    }

    /// Pointer-driven selection.
    pub fn select_index(&mut self, index: usize, ui: &mut dyn SuggestionUi) {
        self.session.select_index(index, ui);
    }

    /// Commit the highlighted candidate: replace the anchor span with its
    /// template and place the cursor at the first stop. Returns whether a
    /// template was applied.
    pub fn commit(&mut self, surface: &mut dyn TextSurface, ui: &mut dyn SuggestionUi) -> bool {
        let Some((candidate, anchor)) = self.session.take_commit(ui) else {
            return false;
        };
        self.detector.reset();
        let applied = template::apply(surface, anchor, &candidate.template);
        if !applied {
            debug!(label = %candidate.label, "template application rejected by surface");
        }
        applied
    }

    /// Dismiss the session without applying (escape, focus loss). The
    /// detector memory survives, so the popup stays away until the buffer
    /// state actually changes.
    pub fn cancel(&mut self, ui: &mut dyn SuggestionUi) {
        self.session.cancel(ui);
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn candidates(&self) -> &[SuggestionCandidate] {
        self.session.candidates()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.session.highlighted()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::completion::resolver::SuggestionResolver;
    use crate::completion::surface::FrameBuffer;
    use crate::kb::CommandKnowledgeBase;

    /// Counts lifecycle calls for debounce and single-session assertions.
    #[derive(Debug, Default)]
    struct RecordingUi {
        opened: usize,
        updated: usize,
        closed: usize,
    }

    impl SuggestionUi for RecordingUi {
        fn on_session_opened(
            &mut self,
            _candidates: &[SuggestionCandidate],
            _highlighted: usize,
            _anchor_start: Position,
        ) {
            self.opened += 1;
        }

        fn on_session_updated(&mut self, _candidates: &[SuggestionCandidate], _highlighted: usize) {
            self.updated += 1;
        }

        fn on_session_closed(&mut self) {
            self.closed += 1;
        }
    }

    /// Candidate source wrapper that counts resolve calls.
    struct CountingSource {
        inner: SuggestionResolver,
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                inner: SuggestionResolver::new(Arc::new(CommandKnowledgeBase::builtin())),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CandidateSource for CountingSource {
        fn resolve(&self, partial: &crate::completion::PartialToken) -> Vec<SuggestionCandidate> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.resolve(partial)
        }
    }

    fn engine_with(source: Arc<CountingSource>) -> CompletionEngine {
        CompletionEngine::new(source, Duration::ZERO)
    }

    fn type_text(buffer: &mut FrameBuffer, engine: &mut CompletionEngine, ui: &mut RecordingUi, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                buffer.insert_newline();
            } else {
                buffer.insert_char(c);
            }
            engine.notify_change();
            engine.tick(buffer, ui);
        }
    }

    #[test]
    fn test_notification_burst_resolves_once() {
        let source = CountingSource::new();
        let mut engine = engine_with(Arc::clone(&source));
        let buffer = FrameBuffer::from_text("\\fra");
        let mut ui = RecordingUi::default();

        for _ in 0..5 {
            engine.notify_change();
        }
        for _ in 0..3 {
            engine.tick(&buffer, &mut ui);
        }

        assert_eq!(source.calls(), 1);
        assert_eq!(ui.opened, 1);
        assert_eq!(ui.updated, 0);

        // Same settled state again: no new resolution, no repaint.
        engine.notify_change();
        engine.tick(&buffer, &mut ui);
        assert_eq!(source.calls(), 1);
        assert_eq!(ui.opened, 1);
        assert_eq!(ui.updated, 0);
    }

    #[test]
    fn test_typing_refreshes_session_in_place() {
        let source = CountingSource::new();
        let mut engine = engine_with(Arc::clone(&source));
        let mut buffer = FrameBuffer::new();
        let mut ui = RecordingUi::default();

        type_text(&mut buffer, &mut engine, &mut ui, "\\fra");
        assert_eq!(ui.opened, 1);
        assert!(ui.updated >= 2); // \f -> \fr -> \fra at least

        type_text(&mut buffer, &mut engine, &mut ui, "c");
        assert_eq!(ui.opened, 1);
        assert_eq!(engine.candidates().len(), 1);
        assert_eq!(engine.candidates()[0].label, "\\frac");
    }

    #[test]
    fn test_commit_applies_template_and_places_cursor() {
        let source = CountingSource::new();
        let mut engine = engine_with(source);
        let mut buffer = FrameBuffer::new();
        let mut ui = RecordingUi::default();

        type_text(&mut buffer, &mut engine, &mut ui, "\\frac");
        assert!(engine.is_open());
        assert!(engine.commit(&mut buffer, &mut ui));

        assert_eq!(buffer.text(), "\\frac{}{$2}");
        assert_eq!(buffer.cursor(), Some(Position::new(0, 6)));
        assert!(!engine.is_open());
        assert_eq!(ui.closed, 1);
    }

    #[test]
    fn test_commit_environment_variant_expands_skeleton() {
        let source = CountingSource::new();
        let mut engine = engine_with(source);
        let mut buffer = FrameBuffer::new();
        let mut ui = RecordingUi::default();

        type_text(&mut buffer, &mut engine, &mut ui, "\\begin{ite");
        assert_eq!(engine.candidates().len(), 1);
        assert!(engine.commit(&mut buffer, &mut ui));

        assert_eq!(buffer.text(), "\\begin{itemize}\n\\item \n\\end{itemize}");
        assert_eq!(buffer.cursor(), Some(Position::new(1, 6)));
    }

    #[test]
    fn test_zero_candidates_close_the_session() {
        let source = CountingSource::new();
        let mut engine = engine_with(source);
        let mut buffer = FrameBuffer::new();
        let mut ui = RecordingUi::default();

        type_text(&mut buffer, &mut engine, &mut ui, "\\frax");
        assert!(!engine.is_open());
        assert_eq!(ui.opened, 1);
        assert_eq!(ui.closed, 1);
    }

    #[test]
    fn test_losing_the_escape_closes_without_applying() {
        let source = CountingSource::new();
        let mut engine = engine_with(source);
        let mut buffer = FrameBuffer::new();
        let mut ui = RecordingUi::default();

        type_text(&mut buffer, &mut engine, &mut ui, "\\fra");
        assert!(engine.is_open());

        for _ in 0..4 {
            buffer.backspace();
        }
        engine.notify_change();
        engine.tick(&buffer, &mut ui);

        assert!(!engine.is_open());
        assert_eq!(ui.closed, 1);
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn test_moving_to_another_token_swaps_sessions_without_applying() {
        let source = CountingSource::new();
        let mut engine = engine_with(source);
        let mut buffer = FrameBuffer::from_text("\\fra\n\\te");
        let mut ui = RecordingUi::default();

        buffer.set_cursor(Position::new(0, 4));
        engine.notify_change();
        engine.tick(&buffer, &mut ui);
        assert!(engine.is_open());
        assert_eq!(ui.opened, 1);

        buffer.set_cursor(Position::new(1, 3));
        engine.notify_change();
        engine.tick(&buffer, &mut ui);

        assert_eq!(ui.closed, 1);
        assert_eq!(ui.opened, 2);
        // The first session was cancelled, never committed.
        assert_eq!(buffer.text(), "\\fra\n\\te");
    }

    #[test]
    fn test_navigation_and_pointer_selection() {
        let source = CountingSource::new();
        let mut engine = engine_with(source);
        let mut buffer = FrameBuffer::new();
        let mut ui = RecordingUi::default();

        // Builtin order around this prefix: \frametitle, \framesubtitle, \frac.
        type_text(&mut buffer, &mut engine, &mut ui, "\\fra");
        assert_eq!(engine.candidates().len(), 3);

        engine.navigate(NavDirection::Previous, &mut ui);
        assert_eq!(engine.highlighted(), Some(0));

        engine.select_index(2, &mut ui);
        assert_eq!(engine.highlighted(), Some(2));
        assert!(engine.commit(&mut buffer, &mut ui));
        assert_eq!(buffer.text(), "\\frac{}{$2}");
    }

    #[test]
    fn test_cancel_suppresses_reopen_until_state_changes() {
        let source = CountingSource::new();
        let mut engine = engine_with(Arc::clone(&source));
        let mut buffer = FrameBuffer::new();
        let mut ui = RecordingUi::default();

        type_text(&mut buffer, &mut engine, &mut ui, "\\fra");
        let resolves = source.calls();
        engine.cancel(&mut ui);
        assert!(!engine.is_open());

        // Nothing changed: the dismissed popup must not come back.
        engine.notify_change();
        engine.tick(&buffer, &mut ui);
        assert!(!engine.is_open());
        assert_eq!(source.calls(), resolves);

        // New keystroke changes the partial token: popup returns.
        type_text(&mut buffer, &mut engine, &mut ui, "c");
        assert!(engine.is_open());
    }

    #[test]
    fn test_commit_without_session_is_a_noop() {
        let source = CountingSource::new();
        let mut engine = engine_with(source);
        let mut buffer = FrameBuffer::from_text("text");
        let mut ui = RecordingUi::default();

        assert!(!engine.commit(&mut buffer, &mut ui));
        assert_eq!(buffer.text(), "text");
        assert_eq!(ui.closed, 0);
    }

    /// Surface whose queries always fail.
    struct DeadSurface;

    impl TextSurface for DeadSurface {
        fn cursor(&self) -> Option<Position> {
            None
        }
        fn line_text(&self, _line: usize) -> Option<String> {
            None
        }
        fn insert(&mut self, _position: Position, _text: &str) -> bool {
            false
        }
        fn delete_range(&mut self, _start: Position, _end: Position) -> bool {
            false
        }
        fn set_cursor(&mut self, _position: Position) -> bool {
            false
        }
    }

    #[test]
    fn test_surface_failure_degrades_to_closed_session() {
        let source = CountingSource::new();
        let mut engine = engine_with(Arc::clone(&source));
        let mut buffer = FrameBuffer::new();
        let mut ui = RecordingUi::default();

        type_text(&mut buffer, &mut engine, &mut ui, "\\fra");
        assert!(engine.is_open());
        let resolves = source.calls();

        engine.notify_change();
        engine.tick(&DeadSurface, &mut ui);

        assert!(!engine.is_open());
        assert_eq!(ui.closed, 1);
        assert_eq!(source.calls(), resolves);
    }

    #[test]
    fn test_debounce_window_delays_the_pass() {
        let source = CountingSource::new();
        let mut engine = CompletionEngine::new(
            Arc::clone(&source) as Arc<dyn CandidateSource>,
            Duration::from_millis(20),
        );
        let buffer = FrameBuffer::from_text("\\fra");
        let mut ui = RecordingUi::default();

        engine.notify_change();
        engine.tick(&buffer, &mut ui);
        assert_eq!(source.calls(), 0);
        assert!(engine.poll_timeout().is_some());

        std::thread::sleep(Duration::from_millis(25));
        engine.tick(&buffer, &mut ui);
        assert_eq!(source.calls(), 1);
        assert!(engine.poll_timeout().is_none());
    }

    #[test]
    fn test_refresh_now_bypasses_the_gate() {
        let source = CountingSource::new();
        let mut engine = CompletionEngine::new(
            Arc::clone(&source) as Arc<dyn CandidateSource>,
            Duration::from_millis(500),
        );
        let buffer = FrameBuffer::from_text("\\fra");
        let mut ui = RecordingUi::default();

        engine.refresh_now(&buffer, &mut ui);
        assert_eq!(source.calls(), 1);
        assert!(engine.is_open());
    }
}
