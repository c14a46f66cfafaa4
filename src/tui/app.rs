//! TUI Application
//!
//! Owns the catalog and the state, and turns key presses into state updates.
//! Export and share are queued as pending actions for the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info, warn};

use super::state::{AppState, PendingAction, View};
use crate::catalog::{Catalog, FeatureCategory, ToolDescriptor};
use crate::export::{self, Download, ExportFormat};
use crate::matrix::ComparisonMatrix;
use crate::resolver::resolve_categories;
use crate::selection::{MIN_COMPARE, Selection};
use crate::share::{SharePayload, ShareOutcome, ShareTarget, share_best_effort};

/// Main TUI application
pub struct App {
    /// Application state
    state: AppState,
    /// Static tool catalog
    catalog: Catalog,
}

impl App {
    /// Create a new application over the given catalog
    pub fn new(catalog: Catalog) -> Self {
        Self {
            state: AppState::new(),
            catalog,
        }
    }

    /// Start with a preselected set of tools (e.g. from a shared link)
    pub fn with_selection(catalog: Catalog, selection: Selection) -> Self {
        let mut app = Self::new(catalog);
        app.state.selection = selection;
        app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        match self.state.current_view {
            View::Selector => self.handle_selector_key(key),
            View::Comparison => self.handle_comparison_key(key),
        }
        self.state.should_quit
    }

    fn handle_selector_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_tool(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev_tool(),
            KeyCode::Char(' ') => self.toggle_current_tool(),
            KeyCode::Char('x') => self.clear_selection(),
            KeyCode::Enter | KeyCode::Char('c') => self.compare(),
            KeyCode::Tab if self.state.has_comparison() => self.set_view(View::Comparison),
            _ => {}
        }
    }

    fn handle_comparison_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc | KeyCode::Tab | KeyCode::Backspace => self.set_view(View::Selector),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_category(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev_category(),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_focused_category(),
            KeyCode::Char('e') => self.state.pending_action = Some(PendingAction::Export),
            KeyCode::Char('s') => self.state.pending_action = Some(PendingAction::Share),
            _ => {}
        }
    }

    /// Request to quit
    pub fn quit(&mut self) {
        self.state.should_quit = true;
    }

    /// Switch to specific view
    pub fn set_view(&mut self, view: View) {
        self.state.current_view = view;
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.state.status_message = Some(message.into());
    }

    /// Move the tool cursor down, wrapping at the end
    pub fn select_next_tool(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        self.state.cursor = (self.state.cursor + 1) % len;
    }

    /// Move the tool cursor up, wrapping at the start
    pub fn select_prev_tool(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        self.state.cursor = if self.state.cursor == 0 { len - 1 } else { self.state.cursor - 1 };
    }

    /// Tool under the cursor
    pub fn current_tool(&self) -> Option<&ToolDescriptor> {
        self.catalog.tools().get(self.state.cursor)
    }

    /// Toggle the tool under the cursor in the selection
    pub fn toggle_current_tool(&mut self) {
        let Some(tool) = self.current_tool() else {
            return;
        };
        let (id, name) = (tool.id.clone(), tool.name.clone());

        match self.state.selection.toggle(id) {
            Some(evicted) => {
                let evicted_name = self.catalog.get(&evicted).map_or(evicted.clone(), |t| t.name.clone());
                self.set_status(format!("Replaced {} with {}", evicted_name, name));
            }
            None => self.state.status_message = None,
        }
    }

    /// Empty the selection
    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
        self.state.status_message = None;
    }

    /// Snapshot the selection and show the comparison, if enough tools are picked
    pub fn compare(&mut self) {
        if !self.state.selection.can_compare() {
            self.set_status(format!("Select at least {} tools to compare", MIN_COMPARE));
            return;
        }
        self.state.compared = self.state.selection.ids().map(String::from).collect();
        self.state.category_cursor = 0;
        self.state.status_message = None;
        self.set_view(View::Comparison);
        info!("Comparing: {}", self.state.compared.join(", "));
    }

    /// Descriptors of the compared tools, in selection order
    pub fn compared_tools(&self) -> Vec<&ToolDescriptor> {
        self.state.compared.iter().filter_map(|id| self.catalog.get(id)).collect()
    }

    /// Categories relevant to the compared tools
    pub fn compared_categories(&self) -> Vec<&FeatureCategory> {
        resolve_categories(&self.catalog, &self.compared_tools())
    }

    /// The matrix for the compared tools, if a comparison was made
    pub fn matrix(&self) -> Option<ComparisonMatrix> {
        if !self.state.has_comparison() {
            return None;
        }
        Some(ComparisonMatrix::build(&self.catalog, &self.compared_tools()))
    }

    pub fn select_next_category(&mut self) {
        let len = self.compared_categories().len();
        if len > 0 {
            self.state.category_cursor = (self.state.category_cursor + 1) % len;
        }
    }

    pub fn select_prev_category(&mut self) {
        let len = self.compared_categories().len();
        if len > 0 {
            self.state.category_cursor = (self.state.category_cursor + len - 1) % len;
        }
    }

    /// Expand or collapse the focused category
    pub fn toggle_focused_category(&mut self) {
        let name = self
            .compared_categories()
            .get(self.state.category_cursor)
            .map(|c| c.name.clone());
        if let Some(name) = name {
            self.state.toggle_category(&name);
        }
    }

    /// Export the current comparison and set the status line accordingly
    pub fn export_with(&mut self, sink: &dyn Download, format: ExportFormat) {
        let Some(matrix) = self.matrix() else {
            self.set_status("Nothing to export");
            return;
        };
        match export::export(&matrix, format, sink) {
            Ok(path) => self.set_status(format!("Exported to {}", path.display())),
            Err(e) => {
                warn!("Export failed: {}", e);
                self.set_status(format!("Export failed: {}", e));
            }
        }
    }

    /// Share the current comparison best-effort and set the status line
    pub fn share_with(
        &mut self,
        base_url: &str,
        primary: Option<&dyn ShareTarget>,
        fallback: &dyn ShareTarget,
    ) -> Option<ShareOutcome> {
        if !self.state.has_comparison() {
            self.set_status("Nothing to share");
            return None;
        }
        let payload = match SharePayload::for_tools(base_url, &self.compared_tools()) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Cannot build share link: {}", e);
                self.set_status(format!("Share failed: {}", e));
                return None;
            }
        };
        debug!("Sharing {}", payload.url);
        let outcome = share_best_effort(primary, fallback, &payload);
        self.set_status(outcome.message());
        Some(outcome)
    }
}
