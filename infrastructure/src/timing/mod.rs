//! Frame clocks implementing the `FrameClock` port.
//!
//! - [`FixedStepClock`]: deterministic `1 / fps` deltas, no waiting
//! - [`PacedClock`]: sleeps to hold the target rate and reports real elapsed time

use lutro_application::FrameClock;
use std::time::{Duration, Instant};

/// Always reports the same delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    step: f64,
}

impl FixedStepClock {
    pub fn new(fps: u32) -> Self {
        Self {
            step: 1.0 / f64::from(fps.max(1)),
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl FrameClock for FixedStepClock {
    fn tick(&mut self) -> f64 {
        self.step
    }
}

/// Wall-clock paced frames.
///
/// The first tick reports one nominal frame; later ticks sleep until a full
/// frame period has passed since the previous tick and report the time that
/// actually elapsed.
#[derive(Debug)]
pub struct PacedClock {
    period: Duration,
    last: Option<Instant>,
}

impl PacedClock {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            last: None,
        }
    }
}

impl FrameClock for PacedClock {
    fn tick(&mut self) -> f64 {
        let Some(last) = self.last else {
            self.last = Some(Instant::now());
            return self.period.as_secs_f64();
        };

        let target = last + self.period;
        let now = Instant::now();
        if now < target {
            std::thread::sleep(target - now);
        }

        let now = Instant::now();
        self.last = Some(now);
        now.duration_since(last).as_secs_f64()
    }
}
