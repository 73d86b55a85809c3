use std::time::Duration;

/// Drives [`GameSession::tick`](crate::GameSession::tick) periodically.
///
/// The session never sleeps or reads clocks. It only tells its scheduler when
/// the tick period changes. Implementations keep at most one active schedule:
/// starting a new one replaces the old one.
pub trait Scheduler {
    /// Starts ticking every `interval`, the first tick one interval from now.
    fn schedule_next(&mut self, interval: Duration);

    /// Stops ticking.
    fn cancel(&mut self);

    /// Cancels the current schedule, then starts a new one at `interval`.
    fn reschedule(&mut self, interval: Duration) {
        self.cancel();
        self.schedule_next(interval);
    }
}

/// A scheduler driven by hand, for headless runs and tests.
///
/// It holds a single optional interval and a virtual clock. Call
/// [`ManualScheduler::fire`] to advance the clock by one period and learn
/// whether a tick is due.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use blockfall_engine::{ManualScheduler, Scheduler as _};
///
/// let mut scheduler = ManualScheduler::new();
/// assert_eq!(scheduler.fire(), None);
///
/// scheduler.reschedule(Duration::from_millis(500));
/// assert_eq!(scheduler.fire(), Some(Duration::from_millis(500)));
/// assert_eq!(scheduler.elapsed(), Duration::from_millis(500));
///
/// scheduler.cancel();
/// assert_eq!(scheduler.fire(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    interval: Option<Duration>,
    elapsed: Duration,
    starts: usize,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active tick interval, if any.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Returns how many schedules have been started so far.
    #[must_use]
    pub fn starts(&self) -> usize {
        self.starts
    }

    /// Returns the virtual time that has passed through [`Self::fire`].
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Advances the virtual clock to the next tick and returns the period
    /// that elapsed, or `None` when nothing is scheduled.
    pub fn fire(&mut self) -> Option<Duration> {
        let interval = self.interval?;
        self.elapsed += interval;
        Some(interval)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_next(&mut self, interval: Duration) {
        self.interval = Some(interval);
        self.starts += 1;
    }

    fn cancel(&mut self) {
        self.interval = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder(Vec<String>);

    impl Scheduler for Recorder {
        fn schedule_next(&mut self, interval: Duration) {
            self.0.push(format!("start {}", interval.as_millis()));
        }

        fn cancel(&mut self) {
            self.0.push("cancel".to_owned());
        }
    }

    #[test]
    fn test_reschedule_cancels_then_starts() {
        let mut recorder = Recorder::default();
        recorder.reschedule(Duration::from_millis(900));
        assert_eq!(recorder.0, ["cancel", "start 900"]);
    }

    #[test]
    fn test_manual_scheduler_holds_one_schedule() {
        let mut scheduler = ManualScheduler::new();
        scheduler.reschedule(Duration::from_millis(1000));
        scheduler.reschedule(Duration::from_millis(900));

        assert_eq!(scheduler.interval(), Some(Duration::from_millis(900)));
        assert_eq!(scheduler.starts(), 2);
        assert_eq!(scheduler.fire(), Some(Duration::from_millis(900)));
        assert_eq!(scheduler.fire(), Some(Duration::from_millis(900)));
        assert_eq!(scheduler.elapsed(), Duration::from_millis(1800));
    }

    #[test]
    fn test_manual_scheduler_cancel() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_next(Duration::from_millis(10));
        assert!(scheduler.is_active());
        scheduler.cancel();
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.fire(), None);
        assert_eq!(scheduler.elapsed(), Duration::ZERO);
    }
}
