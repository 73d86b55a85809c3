use crossterm::event::Event as CrosstermEvent;

/// Events dispatched to the application by the event loop.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick timer fired.
    Tick,
    /// Time to redraw the screen.
    Render,
    /// Key, mouse or resize input from the terminal.
    Crossterm(CrosstermEvent),
}
