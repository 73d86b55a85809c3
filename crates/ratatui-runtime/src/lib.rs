//! A small event-loop runtime for ratatui applications.
//!
//! [`Runtime`] multiplexes terminal input, a single repeating [`TickTimer`]
//! and redraws, and dispatches them to an [`App`].

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime, timer::TickTimer};

mod app;
mod event;
mod event_loop;
mod runtime;
mod timer;
