use std::time::{Duration, Instant};

use blockfall_engine::GameEvent;

const LINE_CLEAR_DURATION: Duration = Duration::from_secs(2);
const LEVEL_UP_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Message {
    text: String,
    expires_at: Instant,
}

/// Transient notifications shown next to the board.
///
/// There is one slot per kind of notification. A new event replaces the
/// message in its slot and restarts its timer.
#[derive(Debug, Default)]
pub(crate) struct Messages {
    line_clear: Option<Message>,
    level_up: Option<Message>,
}

impl Messages {
    pub(crate) fn push_events(&mut self, events: &[GameEvent], now: Instant) {
        for event in events {
            match event {
                GameEvent::LinesCleared(count) => {
                    let text = if *count == 1 {
                        "Line Cleared!".to_owned()
                    } else {
                        format!("{count} Lines Cleared!")
                    };
                    self.line_clear = Some(Message {
                        text,
                        expires_at: now + LINE_CLEAR_DURATION,
                    });
                }
                GameEvent::LevelUp(level_up) => {
                    self.level_up = Some(Message {
                        text: format!("Level Up! You are now on Level {}", level_up.level),
                        expires_at: now + LEVEL_UP_DURATION,
                    });
                }
                GameEvent::GameOver => {}
            }
        }
    }

    /// Returns the texts still visible at `now`, line clears first.
    pub(crate) fn visible(&self, now: Instant) -> impl Iterator<Item = &str> {
        [&self.line_clear, &self.level_up]
            .into_iter()
            .flatten()
            .filter(move |message| now < message.expires_at)
            .map(|message| message.text.as_str())
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
