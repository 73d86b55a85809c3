use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for TUI applications.
///
/// Applications executed by [`Runtime::run`] must implement this trait. Each
/// callback receives the runtime so the app can start or cancel ticks, change
/// the render mode, and so on.
pub trait App {
    /// Called once at the start of [`Runtime::run`], before the terminal is
    /// set up.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);

    /// Called on each tick of the runtime's tick timer.
    fn update(&mut self, runtime: &mut Runtime);
}
