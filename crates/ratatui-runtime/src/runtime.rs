use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};

use crate::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// TUI application runtime.
///
/// Owns the terminal event loop and the tick timer, and drives an [`App`].
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
    mouse_capture: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(),
            mouse_capture: false,
        }
    }

    /// Starts delivering ticks every `interval`, replacing any current
    /// schedule. The first tick arrives one interval from now.
    pub fn start_ticks(&mut self, interval: Duration) {
        self.events.timer.start(interval, Instant::now());
    }

    /// Stops delivering ticks.
    pub fn cancel_ticks(&mut self) {
        self.events.timer.cancel();
    }

    /// Returns the active tick interval, if any.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.events.timer.interval()
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Enables mouse click and drag reporting while the app runs.
    pub fn set_mouse_capture(&mut self, enabled: bool) {
        self.mouse_capture = enabled;
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `Event::Tick`: calls `app.update()`
    ///    - `Event::Render`: calls `app.draw()`
    ///    - `Event::Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);
        let mouse_capture = self.mouse_capture;

        ratatui::run(|terminal| {
            if mouse_capture {
                execute!(io::stdout(), EnableMouseCapture)?;
            }
            let result = self.event_loop(terminal, app);
            if mouse_capture {
                execute!(io::stdout(), DisableMouseCapture)?;
            }
            result
        })
    }

    fn event_loop<A>(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
        app: &mut A,
    ) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick => {
                    app.update(self);
                }
                TuiEvent::Render => {
                    terminal.draw(|f| app.draw(f))?;
                }
                TuiEvent::Crossterm(event) => {
                    app.handle_event(self, event);
                }
            }
        }
        Ok(())
    }
}
