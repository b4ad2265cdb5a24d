use std::time::Duration;

/// Upper bound on simulation steps run for a single display frame.
const MAX_CATCH_UP_STEPS: u32 = 4;

/// Fixed-step accumulator that converts display frame time into simulation steps.
///
/// Backlog beyond [`MAX_CATCH_UP_STEPS`] is discarded so a stalled window does
/// not fast-forward the game when it resumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameClock {
    step: Duration,
    accumulated: Duration,
}

impl FrameClock {
    /// Creates a clock stepping `frames_per_second` times per second.
    #[must_use]
    pub fn new(frames_per_second: u32) -> Self {
        Self::with_step(Duration::from_secs(1) / frames_per_second.max(1))
    }

    /// Creates a clock with an explicit step length.
    #[must_use]
    pub const fn with_step(step: Duration) -> Self {
        Self {
            step,
            accumulated: Duration::ZERO,
        }
    }

    /// Duration of a single simulation step.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Adds elapsed display time and returns how many steps are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;

        let mut steps = 0;
        while self.accumulated >= self.step && steps < MAX_CATCH_UP_STEPS {
            self.accumulated -= self.step;
            steps += 1;
        }

        if steps == MAX_CATCH_UP_STEPS && self.accumulated >= self.step {
            log::debug!("dropping {:?} of simulation backlog", self.accumulated);
            self.accumulated = self.accumulated.min(self.step - Duration::from_nanos(1));
        }

        steps
    }
}
