//! Application state for the TUI.
//!
//! This module defines the core state types that drive the TUI:
//! - `AppState`: All mutable application state
//! - `View`: Which view is currently active
//! - `PendingAction`: Side effects queued for the runner

use std::collections::HashSet;

use crate::selection::{MAX_SELECTION, Selection};

/// The primary application state.
///
/// Owned by `App` and updated in response to key events. Views only read it.
#[derive(Debug, Default)]
pub struct AppState {
    // View state
    /// Currently active view
    pub current_view: View,

    // Selector state
    /// Highlighted row in the tool list
    pub cursor: usize,
    /// Tools the user has picked
    pub selection: Selection,

    // Comparison state
    /// Tool ids captured when the user pressed compare
    pub compared: Vec<String>,
    /// Categories the user has folded away
    pub collapsed: HashSet<String>,
    /// Focused category header in the comparison view
    pub category_cursor: usize,

    /// Status message to display
    pub status_message: Option<String>,
    /// Pending side effect (processed by runner)
    pub pending_action: Option<PendingAction>,

    // Control flags
    /// Whether the application should quit
    pub should_quit: bool,
}

impl AppState {
    /// Create a new default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a category is currently expanded
    pub fn is_expanded(&self, category: &str) -> bool {
        !self.collapsed.contains(category)
    }

    /// Flip a category between expanded and collapsed
    pub fn toggle_category(&mut self, category: &str) {
        if !self.collapsed.remove(category) {
            self.collapsed.insert(category.to_string());
        }
    }

    /// Format the selection counter, e.g. "2 of 4 tools selected"
    pub fn selection_counter(&self) -> String {
        format!("{} of {} tools selected", self.selection.len(), MAX_SELECTION)
    }

    /// Whether a comparison has been made and can be shown
    pub fn has_comparison(&self) -> bool {
        !self.compared.is_empty()
    }
}

/// Which view is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Pick tools from the catalog
    #[default]
    Selector,
    /// Feature matrix of the compared tools
    Comparison,
}

impl View {
    /// Get the view name for display
    pub fn name(self) -> &'static str {
        match self {
            View::Selector => "Tools",
            View::Comparison => "Comparison",
        }
    }
}

/// Side effects requested by the user, run outside key handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Export the comparison to the download directory
    Export,
    /// Share a link to the comparison
    Share,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_default() {
        let state = AppState::new();
        assert_eq!(state.current_view, View::Selector);
        assert!(state.selection.is_empty());
        assert!(!state.has_comparison());
        assert!(!state.should_quit);
    }

    #[test]
    fn test_categories_start_expanded() {
        let state = AppState::new();
        assert!(state.is_expanded("Code Generation"));
    }

    #[test]
    fn test_toggle_category() {
        let mut state = AppState::new();
        state.toggle_category("Code Generation");
        assert!(!state.is_expanded("Code Generation"));
        state.toggle_category("Code Generation");
        assert!(state.is_expanded("Code Generation"));
    }

    #[test]
    fn test_selection_counter() {
        let mut state = AppState::new();
        assert_eq!(state.selection_counter(), "0 of 4 tools selected");
        state.selection.toggle("cursor");
        state.selection.toggle("bolt");
        assert_eq!(state.selection_counter(), "2 of 4 tools selected");
    }

    #[test]
    fn test_view_names() {
        assert_eq!(View::Selector.name(), "Tools");
        assert_eq!(View::Comparison.name(), "Comparison");
    }
}
