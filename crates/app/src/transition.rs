//! Transition engine — linear ramps of an analog join toward a target.
//!
//! A ramp of `d` seconds is `d * 20` ticks, one every [`TICK`]. The start
//! value is read once, so intermediate values echoed back by the gateway do
//! not feed into the slope. Each tick adds the increment to a running value,
//! writes it truncated, then sleeps; the final tick writes the exact target.
//!
//! Starting a ramp supersedes any ramp still running on the same [`Ramp`]:
//! the older one stops before its next write.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use joinbridge_domain::join::AnalogJoin;

use crate::ports::Gateway;

/// Interval between two ramp writes.
pub const TICK: Duration = Duration::from_millis(50);

const TICKS_PER_SECOND: f64 = 20.0;

/// How a ramp ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampOutcome {
    /// The target was written.
    Completed,
    /// A newer ramp took over before the target was reached.
    Superseded,
}

/// Ramp driver for a single analog join.
///
/// The generation check and the write of each tick happen under one lock, so
/// once a newer ramp has started, even on a multi-threaded runtime, no write
/// from an older ramp can land after it.
#[derive(Debug, Default)]
pub struct Ramp {
    generation: Mutex<u64>,
}

/// Number of ticks for a ramp lasting `duration_secs`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn tick_count(duration_secs: f64) -> u32 {
    if duration_secs.is_nan() || duration_secs <= 0.0 {
        return 0;
    }
    (duration_secs * TICKS_PER_SECOND).round() as u32
}

impl Ramp {
    fn generation(&self) -> MutexGuard<'_, u64> {
        self.generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Move `join` from its current value to `target` over `duration_secs`.
    ///
    /// A zero duration writes the target at once.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub async fn run<G: Gateway + ?Sized>(
        &self,
        gateway: &G,
        join: AnalogJoin,
        target: u16,
        duration_secs: f64,
    ) -> RampOutcome {
        let steps = tick_count(duration_secs);
        let (generation, start) = {
            let mut current = self.generation();
            *current += 1;
            if steps == 0 {
                gateway.write_analog(join, target);
                return RampOutcome::Completed;
            }
            (*current, gateway.read_analog(join))
        };
        let increment = (f64::from(target) - f64::from(start)) / f64::from(steps);
        tracing::debug!(%join, start, target, steps, "ramp started");

        let mut value = f64::from(start);
        for step in 1..=steps {
            value += increment;
            let raw = if step == steps {
                target
            } else {
                value.clamp(0.0, f64::from(u16::MAX)) as u16
            };
            {
                let current = self.generation();
                if *current != generation {
                    tracing::debug!(%join, step, "ramp superseded");
                    return RampOutcome::Superseded;
                }
                gateway.write_analog(join, raw);
            }
            tokio::time::sleep(TICK).await;
        }
        RampOutcome::Completed
    }
}
