use std::sync::{Arc, RwLock};

use crate::parser::EditTarget;

/// Shared state between the shell loop, the prompt, and command execution.
///
/// Cheap to clone; all fields live behind `Arc<RwLock<_>>` so the prompt
/// rendered by the line editor always reflects the latest deck state.
#[derive(Debug, Clone)]
pub struct SharedState {
    /// Display name of the open deck
    pub deck_name: Arc<RwLock<String>>,

    /// Number of frames in the deck
    pub frame_count: Arc<RwLock<usize>>,

    /// 1-based number of the frame content lines go to, 0 when none
    pub current_frame: Arc<RwLock<usize>>,

    /// Where content lines are appended
    pub edit_target: Arc<RwLock<EditTarget>>,

    /// Unsaved changes flag
    pub dirty: Arc<RwLock<bool>>,

    /// Color output setting
    pub color_enabled: Arc<RwLock<bool>>,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState {
    /// Create shared state for an unnamed, empty deck.
    pub fn new() -> Self {
        Self {
            deck_name: Arc::new(RwLock::new("untitled".to_string())),
            frame_count: Arc::new(RwLock::new(0)),
            current_frame: Arc::new(RwLock::new(0)),
            edit_target: Arc::new(RwLock::new(EditTarget::Frame)),
            dirty: Arc::new(RwLock::new(false)),
            color_enabled: Arc::new(RwLock::new(true)),
        }
    }

    /// Get the deck display name.
    pub fn get_deck_name(&self) -> String {
        self.deck_name.read().unwrap().clone()
    }

    /// Set the deck display name.
    pub fn set_deck_name(&self, name: String) {
        *self.deck_name.write().unwrap() = name;
    }

    /// Get the frame count.
    pub fn get_frame_count(&self) -> usize {
        *self.frame_count.read().unwrap()
    }

    /// Set the frame count.
    pub fn set_frame_count(&self, count: usize) {
        *self.frame_count.write().unwrap() = count;
    }

    /// Get the 1-based current frame number, 0 when no frame is active.
    pub fn get_current_frame(&self) -> usize {
        *self.current_frame.read().unwrap()
    }

    /// Set the 1-based current frame number.
    pub fn set_current_frame(&self, number: usize) {
        *self.current_frame.write().unwrap() = number;
    }

    /// Get the edit target.
    pub fn get_edit_target(&self) -> EditTarget {
        *self.edit_target.read().unwrap()
    }

    /// Set the edit target.
    pub fn set_edit_target(&self, target: EditTarget) {
        *self.edit_target.write().unwrap() = target;
    }

    /// Check whether the deck has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        *self.dirty.read().unwrap()
    }

    /// Set the unsaved-changes flag.
    pub fn set_dirty(&self, dirty: bool) {
        *self.dirty.write().unwrap() = dirty;
    }

    /// Get the color setting.
    pub fn get_color_enabled(&self) -> bool {
        *self.color_enabled.read().unwrap()
    }

    /// Set color output.
    pub fn set_color_enabled(&self, enabled: bool) {
        *self.color_enabled.write().unwrap() = enabled;
    }
}
