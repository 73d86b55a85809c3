use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::{TickTimer, event::TuiEvent};

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw at a fixed interval, whether or not anything changed.
    Interval(Duration),
    /// Redraw after each tick or terminal event.
    #[default]
    OnDirty,
}

impl RenderMode {
    /// Creates `Interval` mode from a frame rate (FPS).
    #[must_use]
    pub fn interval_from_rate(rate: f64) -> Self {
        Self::Interval(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Multiplexes the tick timer, the render schedule and terminal input.
#[derive(Debug)]
pub(super) struct EventLoop {
    pub(super) timer: TickTimer,
    render_mode: RenderMode,
    last_render: Option<Instant>,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            timer: TickTimer::new(),
            render_mode: RenderMode::default(),
            last_render: None,
            dirty: true,
        }
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until the next tick, render or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.timer.poll(now) {
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.render_due(now) {
                self.last_render = Some(now);
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn render_due(&self, now: Instant) -> bool {
        match self.render_mode {
            RenderMode::Interval(interval) => self
                .last_render
                .is_none_or(|last| now.duration_since(last) >= interval),
            RenderMode::OnDirty => self.dirty,
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_render_at = match self.render_mode {
            RenderMode::Interval(interval) => Some(self.last_render.map_or(now, |t| t + interval)),
            RenderMode::OnDirty => self.dirty.then_some(now),
        };
        let next_at = [self.timer.deadline(), next_render_at]
            .into_iter()
            .flatten()
            .min()?;
        Some(next_at.saturating_duration_since(now))
    }
}
