//! Custom prompt implementation for beamsh

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

use crate::parser::EditTarget;

use super::shared_state::SharedState;

/// Shell prompt showing deck name, edit target, and a dirty marker.
///
/// Examples: `talk (frame 2)> `, `talk* (preamble)> `.
pub struct BeamshPrompt {
    /// Shared state the prompt reads on every render
    state: SharedState,
}

impl BeamshPrompt {
    /// Create a prompt over the shared state.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    fn target_label(&self) -> String {
        match self.state.get_edit_target() {
            EditTarget::Preamble => "preamble".to_string(),
            EditTarget::Frame => {
                let current = self.state.get_current_frame();
                if current == 0 {
                    "no frame".to_string()
                } else {
                    format!("frame {current}")
                }
            }
        }
    }
}

impl Prompt for BeamshPrompt {
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        let name = self.state.get_deck_name();
        let marker = if self.state.is_dirty() { "*" } else { "" };
        format!("{}{} ({})> ", name, marker, self.target_label()).into()
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Empty; the indicator is part of the left prompt.
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_with_no_frame() {
        let prompt = BeamshPrompt::new(SharedState::new());
        assert_eq!(prompt.render_prompt_left(), "untitled (no frame)> ");
    }

    #[test]
    fn test_prompt_shows_frame_and_dirty_marker() {
        let state = SharedState::new();
        state.set_deck_name("talk".to_string());
        state.set_current_frame(2);
        state.set_dirty(true);

        let prompt = BeamshPrompt::new(state);
        assert_eq!(prompt.render_prompt_left(), "talk* (frame 2)> ");
    }

    #[test]
    fn test_prompt_shows_preamble_target() {
        let state = SharedState::new();
        state.set_deck_name("talk".to_string());
        state.set_edit_target(EditTarget::Preamble);

        let prompt = BeamshPrompt::new(state);
        assert_eq!(prompt.render_prompt_left(), "talk (preamble)> ");
    }

    #[test]
    fn test_right_prompt_and_indicator_empty() {
        let prompt = BeamshPrompt::new(SharedState::new());
        assert_eq!(prompt.render_prompt_right(), "");
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Default), "");
    }

    #[test]
    fn test_multiline_indicator() {
        let prompt = BeamshPrompt::new(SharedState::new());
        assert_eq!(prompt.render_prompt_multiline_indicator(), "... ");
    }
}
