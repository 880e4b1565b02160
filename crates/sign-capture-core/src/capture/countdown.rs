/// Result of advancing the countdown by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CountdownStatus {
    /// Still counting; holds the ticks left to display.
    Running(u32),
    /// Reached zero on this tick.
    Finished,
}

/// Decrementing pre-recording counter.
///
/// Exists only while the controller is preparing. The recurring
/// one-second alarm that drives `tick` is owned by the event loop, so
/// dropping this value is a complete cancellation: no further ticks can
/// reach a countdown that no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub(crate) fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    /// Ticks left before recording starts.
    pub(crate) fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance one tick.
    pub(crate) fn tick(&mut self) -> CountdownStatus {
        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            CountdownStatus::Finished
        } else {
            CountdownStatus::Running(self.remaining)
        }
    }
}
