//! Tick pacing for the compositor task.
//!
//! Provides portable tick timing without async/await or platform-specific
//! timers. The owning task is responsible for sleeping/waiting between
//! ticks; all timing here is computed, never waited on.

use embassy_time::{Duration, Instant};

use crate::PixelDriver;
use crate::compositor::Compositor;

/// Default scheduler tick period (~100 Hz).
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Result of one paced tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Paces compositor ticks with drift correction.
///
/// If the task falls behind by more than two periods the backlog is
/// skipped instead of caught up, preventing render bursts after stalls.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(compositor);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct TickScheduler<'a, D: PixelDriver> {
    compositor: Compositor<'a, D>,
    next_tick: Instant,
    period: Duration,
}

impl<'a, D: PixelDriver> TickScheduler<'a, D> {
    /// Create a scheduler with the default 10 ms period.
    pub fn new(compositor: Compositor<'a, D>) -> Self {
        Self::with_period(compositor, DEFAULT_TICK_PERIOD)
    }

    /// Create a scheduler with a custom tick period.
    pub fn with_period(compositor: Compositor<'a, D>, period: Duration) -> Self {
        Self {
            compositor,
            next_tick: Instant::from_millis(0),
            period,
        }
    }

    /// Run one compositor tick and return timing information.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let max_drift = Duration::from_millis(self.period.as_millis() * 2);
        if now.as_millis() > self.next_tick.as_millis() + max_drift.as_millis() {
            self.next_tick = now;
        }

        self.compositor.tick(now);

        self.next_tick += self.period;

        let sleep_duration = if self.next_tick.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_tick.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
        }
    }

    /// Get a reference to the compositor.
    pub fn compositor(&self) -> &Compositor<'a, D> {
        &self.compositor
    }

    /// Get a mutable reference to the compositor.
    pub fn compositor_mut(&mut self) -> &mut Compositor<'a, D> {
        &mut self.compositor
    }
}
