use std::fmt;
use std::time::Duration;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Running => write!(f, "running"),
        }
    }
}

/// A pending tick. Owning one is what it means to be running, dropping it cancels the tick.
#[derive(Debug)]
struct Tick {
    due: Instant,
}

/// Decides when the next generation should be computed.
///
/// The stepper never sleeps or spawns anything: the caller waits until [`Stepper::next_deadline`]
/// and then calls [`Stepper::poll`]. Stopping drops the pending tick before returning, so a stopped
/// stepper can never report a tick as due.
#[derive(Debug)]
pub struct Stepper {
    interval: Duration,
    tick: Option<Tick>,
}

impl Stepper {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            tick: None,
        }
    }

    pub fn state(&self) -> RunState {
        if self.tick.is_some() {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    /// Schedule the first tick one interval after `now`. Returns `false` if already running, in
    /// which case the pending tick is kept.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.tick.is_some() {
            return false;
        }

        self.tick = Some(Tick {
            due: now + self.interval,
        });

        true
    }

    /// Cancel the pending tick. Returns `false` if there was none.
    pub fn stop(&mut self) -> bool {
        self.tick.take().is_some()
    }

    /// When the pending tick is due, if running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tick.as_ref().map(|tick| tick.due)
    }

    /// How long the caller may wait before the next tick, if running
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|due| due.saturating_duration_since(now))
    }

    /// Returns `true` if a tick is due at `now`, and schedules the following one an interval later.
    ///
    /// Ticks are not queued: however late the caller is, at most one tick fires per call.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(tick) = self.tick.as_mut() else {
            return false;
        };

        if now < tick.due {
            return false;
        }

        tick.due = now + self.interval;
        true
    }
}
