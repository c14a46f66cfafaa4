//! Terminal User Interface for toolmatrix.
//!
//! Two views:
//! - **Tools**: pick up to four tools from the catalog
//! - **Comparison**: feature matrix with collapsible categories, export, and share
//!
//! Everything runs on one thread: poll for a key, update state, redraw.

mod app;
mod events;
mod runner;
mod state;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use runner::TuiRunner;
pub use state::{AppState, PendingAction, View};

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::Result;
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
///
/// Enables raw mode and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Palette inspired by k9s.
pub mod colors {
    use ratatui::style::Color;

    pub const FULL: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const PARTIAL: Color = Color::Rgb(255, 191, 0); // Amber
    pub const UNSUPPORTED: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const SELECTED: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const SUBTITLE: Color = Color::Rgb(186, 85, 211); // Orchid
    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const HIGHLIGHT: Color = Color::DarkGray;
    pub const DIM: Color = Color::DarkGray;
}
