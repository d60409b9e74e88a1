use std::time::Duration;

/// Period of the delay and sound timers (60 Hz).
pub const TIMER_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// What happened during a call to [`Timers::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Number of 60 Hz decrement passes that ran.
    pub periods: u32,
    /// The sound timer landed on 1, the last tick before silence.
    pub beep: bool,
}

/// Delay and sound timers, driven by elapsed time supplied by the caller
/// rather than a wall clock.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    elapsed: Duration,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for `elapsed` time. One decrement pass runs for every whole
    /// timer period accumulated, so a late call catches up with several
    /// passes instead of the single decrement a fixed 60 Hz poll would do.
    /// The remainder carries to the next call.
    pub fn tick(&mut self, elapsed: Duration) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        self.elapsed += elapsed;
        while self.elapsed >= TIMER_PERIOD {
            self.elapsed -= TIMER_PERIOD;
            outcome.periods += 1;

            self.delay = self.delay.saturating_sub(1);
            if self.sound > 0 {
                self.sound -= 1;
                if self.sound == 1 {
                    outcome.beep = true;
                }
            }
        }
        outcome
    }

    pub fn buzzer_active(&self) -> bool {
        self.sound != 0
    }
}
