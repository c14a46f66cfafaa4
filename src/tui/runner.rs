//! TUI Runner - main event loop.
//!
//! The `TuiRunner` owns the terminal, app, and event handler. It runs the
//! main loop: render → handle events → process actions → repeat.

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::PendingAction;
use super::views::render;
use crate::config::Config;
use crate::share::ShareTarget;
use eyre::Result;
use log::info;

/// Main TUI runner that owns the event loop.
pub struct TuiRunner {
    /// The terminal instance
    terminal: Tui,
    /// Application state and input handling
    app: App,
    /// Event handler for keyboard and tick events
    event_handler: EventHandler,
    /// Export and share settings
    config: Config,
}

impl TuiRunner {
    /// Create a new TUI runner.
    pub fn new(terminal: Tui, app: App, config: Config) -> Self {
        Self {
            terminal,
            app,
            event_handler: EventHandler::new(config.tui.tick_rate_ms),
            config,
        }
    }

    /// Get a reference to the app.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Run the main TUI loop.
    pub fn run(&mut self) -> Result<()> {
        info!("Starting TUI main loop");

        loop {
            // 1. Render current state
            self.terminal.draw(|f| render(&self.app, f))?;

            // 2. Handle events (keyboard, tick)
            match self.event_handler.next()? {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break; // Quit requested
                    }
                }
                Event::Tick | Event::Resize(_, _) => {
                    // Terminal will handle resize on next draw
                }
            }

            // 3. Process pending actions
            self.process_pending_action();

            // 4. Check for quit
            if self.app.state().should_quit {
                break;
            }
        }

        info!("TUI main loop ended");
        Ok(())
    }

    /// Run a queued export or share.
    fn process_pending_action(&mut self) {
        let Some(action) = self.app.state_mut().pending_action.take() else {
            return;
        };

        match action {
            PendingAction::Export => {
                info!("Export requested ({})", self.config.export.format);
                let sink = self.config.download();
                self.app.export_with(&sink, self.config.export.format);
            }
            PendingAction::Share => {
                info!("Share requested");
                let command = self.config.share_command();
                let clipboard = self.config.clipboard();
                self.app.share_with(
                    &self.config.share.base_url,
                    command.as_ref().map(|c| c as &dyn ShareTarget),
                    &clipboard,
                );
            }
        }
    }
}
