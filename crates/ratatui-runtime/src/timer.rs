use std::time::{Duration, Instant};

/// A single repeating timer.
///
/// At most one schedule is active: [`TickTimer::start`] replaces the current
/// one and restarts the countdown, so the first tick comes one full interval
/// after the call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickTimer {
    schedule: Option<Schedule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Schedule {
    interval: Duration,
    next_at: Instant,
}

impl TickTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts ticking every `interval`, counting from `now`.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.schedule = Some(Schedule {
            interval,
            next_at: now + interval,
        });
    }

    pub fn cancel(&mut self) {
        self.schedule = None;
    }

    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.schedule.map(|s| s.interval)
    }

    /// Returns when the next tick is due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.schedule.map(|s| s.next_at)
    }

    /// Consumes a due tick.
    ///
    /// Returns `true` if a tick was due at `now`. Ticks that were missed while
    /// the caller was busy collapse into one.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(schedule) = &mut self.schedule else {
            return false;
        };
        if now < schedule.next_at {
            return false;
        }
        schedule.next_at += schedule.interval;
        if schedule.next_at <= now {
            schedule.next_at = now + schedule.interval;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_idle_timer_never_fires() {
        let mut timer = TickTimer::new();
        assert!(!timer.poll(Instant::now()));
        assert_eq!(timer.deadline(), None);
    }

    #[test]
    fn test_first_tick_after_one_interval() {
        let t0 = Instant::now();
        let mut timer = TickTimer::new();
        timer.start(100 * MS, t0);

        assert!(!timer.poll(t0));
        assert!(!timer.poll(t0 + 99 * MS));
        assert!(timer.poll(t0 + 100 * MS));
        assert!(!timer.poll(t0 + 150 * MS));
        assert!(timer.poll(t0 + 200 * MS));
    }

    #[test]
    fn test_start_replaces_schedule() {
        let t0 = Instant::now();
        let mut timer = TickTimer::new();
        timer.start(100 * MS, t0);
        timer.start(50 * MS, t0 + 80 * MS);

        assert_eq!(timer.interval(), Some(50 * MS));
        assert!(!timer.poll(t0 + 100 * MS));
        assert!(timer.poll(t0 + 130 * MS));
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let t0 = Instant::now();
        let mut timer = TickTimer::new();
        timer.start(10 * MS, t0);
        timer.cancel();
        assert!(!timer.poll(t0 + 100 * MS));
        assert_eq!(timer.interval(), None);
    }

    #[test]
    fn test_missed_ticks_collapse() {
        let t0 = Instant::now();
        let mut timer = TickTimer::new();
        timer.start(10 * MS, t0);

        assert!(timer.poll(t0 + 55 * MS));
        assert!(!timer.poll(t0 + 60 * MS));
        assert_eq!(timer.deadline(), Some(t0 + 65 * MS));
    }
}
