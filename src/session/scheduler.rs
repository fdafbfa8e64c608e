use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use crate::foundation::core::FrameRate;

/// Host-side "request next tick" primitive.
///
/// A scheduler repeatedly invokes `on_tick` until it returns [`ControlFlow::Break`]. Ticks run
/// strictly one after another on the calling thread; stopping the loop is the host's decision.
pub trait TickScheduler {
    /// Run ticks until `on_tick` breaks.
    fn run(&mut self, on_tick: &mut dyn FnMut() -> ControlFlow<()>);
}

/// Best-effort pacing to a refresh interval.
///
/// After each tick the scheduler sleeps for whatever is left of the interval. A tick that overruns
/// is followed immediately by the next one; missed refreshes are not caught up.
#[derive(Clone, Copy, Debug)]
pub struct IntervalScheduler {
    interval: Option<Duration>,
}

impl IntervalScheduler {
    /// Pace ticks to one per `rate` period.
    pub fn paced(rate: FrameRate) -> Self {
        Self {
            interval: Some(Duration::from_secs_f64(rate.frame_duration_secs())),
        }
    }

    /// Run ticks back to back, for headless rendering and tests.
    pub fn unpaced() -> Self {
        Self { interval: None }
    }

    /// Target interval, if paced.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }
}

impl TickScheduler for IntervalScheduler {
    fn run(&mut self, on_tick: &mut dyn FnMut() -> ControlFlow<()>) {
        loop {
            let started = Instant::now();
            if on_tick().is_break() {
                return;
            }
            if let Some(interval) = self.interval {
                let spent = started.elapsed();
                if spent < interval {
                    std::thread::sleep(interval - spent);
                } else {
                    tracing::trace!(?spent, ?interval, "tick overran refresh interval");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scheduler.rs"]
mod tests;
