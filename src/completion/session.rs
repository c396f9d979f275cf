//! Suggestion session lifecycle.
//!
//! The session is the only mutable state in the completion engine: either
//! `Closed`, or `Open` with a non-empty candidate list, a highlighted
//! index, and the anchor span that a commit will replace. Every transition
//! notifies the presentation layer through [`SuggestionUi`]; the session
//! itself never touches the text surface, so nothing it does can corrupt
//! the buffer.

use tracing::trace;

use super::resolver::SuggestionCandidate;
use super::surface::{Anchor, Position};

/// Explicit navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Previous,
    Next,
}

/// Presentation-layer sink for session lifecycle events.
///
/// `on_session_opened` carries the anchor start so the host can place the
/// popup; updates reuse the existing placement.
pub trait SuggestionUi {
    fn on_session_opened(
        &mut self,
        candidates: &[SuggestionCandidate],
        highlighted: usize,
        anchor_start: Position,
    );
    fn on_session_updated(&mut self, candidates: &[SuggestionCandidate], highlighted: usize);
    fn on_session_closed(&mut self);
}

#[derive(Debug)]
struct OpenState {
    candidates: Vec<SuggestionCandidate>,
    highlighted: usize,
    anchor: Anchor,
}

/// The Closed/Open suggestion state machine.
#[derive(Debug, Default)]
pub struct SuggestionSession {
    open: Option<OpenState>,
}

impl SuggestionSession {
    pub fn new() -> Self {
        Self { open: None }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Candidates of the open session, empty when closed.
    pub fn candidates(&self) -> &[SuggestionCandidate] {
        self.open.as_ref().map(|s| s.candidates.as_slice()).unwrap_or(&[])
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.open.as_ref().map(|s| s.highlighted)
    }

    pub fn highlighted_candidate(&self) -> Option<&SuggestionCandidate> {
        self.open.as_ref().map(|s| &s.candidates[s.highlighted])
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.open.as_ref().map(|s| s.anchor)
    }

    /// Open a session. An already-open session is cancelled first (closed
    /// without applying anything), so at most one is ever open.
    ///
    /// Empty candidate lists are never displayed; callers filter them out
    /// before getting here.
    pub fn open(
        &mut self,
        candidates: Vec<SuggestionCandidate>,
        anchor: Anchor,
        ui: &mut dyn SuggestionUi,
    ) {
        debug_assert!(!candidates.is_empty());
        if self.open.is_some() {
            self.cancel(ui);
        }
        trace!(count = candidates.len(), "suggestion session opened");
        ui.on_session_opened(&candidates, 0, anchor.start);
        self.open = Some(OpenState {
            candidates,
            highlighted: 0,
            anchor,
        });
    }

    /// Refresh the open session for a changed partial token: candidates
    /// replaced, highlight reset, anchor end advanced to the new cursor
    /// while the start stays pinned. No-op when closed.
    pub fn refresh(
        &mut self,
        candidates: Vec<SuggestionCandidate>,
        new_end: Position,
        ui: &mut dyn SuggestionUi,
    ) {
        let Some(state) = self.open.as_mut() else {
            return;
        };
        debug_assert!(!candidates.is_empty());
        state.candidates = candidates;
        state.highlighted = 0;
        state.anchor.end = new_end;
        ui.on_session_updated(&state.candidates, state.highlighted);
    }

    /// Move the highlight one step, clamped to the list; no wraparound.
    pub fn navigate(&mut self, direction: NavDirection, ui: &mut dyn SuggestionUi) {
        let Some(state) = self.open.as_mut() else {
            return;
        };
        let target = match direction {
            NavDirection::Previous => state.highlighted.saturating_sub(1),
            NavDirection::Next => (state.highlighted + 1).min(state.candidates.len() - 1),
        };
        if target != state.highlighted {
            state.highlighted = target;
            ui.on_session_updated(&state.candidates, state.highlighted);
        }
    }

    /// Pointer-driven selection of an exact index; ignored out of range.
    pub fn select_index(&mut self, index: usize, ui: &mut dyn SuggestionUi) {
        let Some(state) = self.open.as_mut() else {
            return;
        };
        if index < state.candidates.len() && index != state.highlighted {
            state.highlighted = index;
            ui.on_session_updated(&state.candidates, state.highlighted);
        }
    }

    /// Commit: close the session and hand back the highlighted candidate
    /// with the anchor it applies to. Returns `None` when closed.
    pub fn take_commit(
        &mut self,
        ui: &mut dyn SuggestionUi,
    ) -> Option<(SuggestionCandidate, Anchor)> {
        let state = self.open.take()?;
        ui.on_session_closed();
        let candidate = state.candidates.into_iter().nth(state.highlighted)?;
        trace!(label = %candidate.label, "suggestion committed");
        Some((candidate, state.anchor))
    }

    /// Cancel: close without applying. No-op when already closed.
    pub fn cancel(&mut self, ui: &mut dyn SuggestionUi) {
        if self.open.take().is_some() {
            trace!("suggestion session cancelled");
            ui.on_session_closed();
        }
    }
}
