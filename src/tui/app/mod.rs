//! Terminal ownership and the shared event loop.
//!
//! [`App`] puts the terminal into raw mode on the alternate screen and
//! restores it when dropped, so an early return or a panic unwinding
//! through the viewer still leaves the shell usable.

pub mod status_footer;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

/// Raw-mode terminal handle.
pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
}

impl App {
    /// Enter raw mode and the alternate screen.
    ///
    /// `tick_rate` bounds how long [`App::next_key`] waits for input.
    pub fn new(tick_rate: Duration) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            tick_rate,
        })
    }

    /// Draw one frame.
    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Wait up to one tick for a key press. Releases and repeats are ignored.
    pub fn next_key(&self) -> Result<Option<KeyEvent>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// An interactive screen driven by key presses.
pub trait TuiApp {
    /// Terminal handle used by [`TuiApp::run`].
    fn app(&mut self) -> &mut App;

    /// Whether the loop should stop.
    fn should_quit(&self) -> bool;

    fn handle_key(&mut self, key: KeyEvent) -> Result<()>;

    fn draw(&mut self) -> Result<()>;

    /// Draw, wait for a key, dispatch it, until [`TuiApp::should_quit`].
    #[cfg(not(tarpaulin_include))]
    fn run(&mut self) -> Result<()> {
        while !self.should_quit() {
            self.draw()?;
            if let Some(key) = self.app().next_key()? {
                self.handle_key(key)?;
            }
        }
        Ok(())
    }
}
