use std::time::{Duration, Instant};

use crate::foundation::core::Fps;

/// Source of per-frame timestamps.
pub trait FrameClock {
    /// Elapsed time since the first tick, for the next frame.
    fn tick(&mut self) -> Duration;
}

/// Deterministic clock stepping exactly one frame per tick.
///
/// Tick `n` reports `n / fps`, so a 6 s recording at 30 fps visits frames `0..=180`.
#[derive(Clone, Debug)]
pub struct FixedStepClock {
    fps: Fps,
    next: u64,
}

impl FixedStepClock {
    /// Start at frame 0.
    pub fn new(fps: Fps) -> Self {
        Self { fps, next: 0 }
    }
}

impl FrameClock for FixedStepClock {
    fn tick(&mut self) -> Duration {
        let nanos = u128::from(self.next) * u128::from(self.fps.den) * 1_000_000_000
            / u128::from(self.fps.num.max(1));
        self.next += 1;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Clock paced against the wall clock, sleeping until each frame is due.
///
/// Reports real elapsed time, so a slow consumer skips ahead rather than drifting.
#[derive(Clone, Debug)]
pub struct RealtimeClock {
    interval: Duration,
    start: Option<Instant>,
    frames: u32,
}

impl RealtimeClock {
    /// Pace ticks at `fps`.
    pub fn new(fps: Fps) -> Self {
        Self {
            interval: Duration::from_nanos(
                u64::from(fps.den) * 1_000_000_000 / u64::from(fps.num.max(1)),
            ),
            start: None,
            frames: 0,
        }
    }
}

impl FrameClock for RealtimeClock {
    fn tick(&mut self) -> Duration {
        let Some(start) = self.start else {
            self.start = Some(Instant::now());
            self.frames = 1;
            return Duration::ZERO;
        };
        let due = self.interval.saturating_mul(self.frames);
        let elapsed = start.elapsed();
        if let Some(wait) = due.checked_sub(elapsed) {
            std::thread::sleep(wait);
        }
        self.frames = self.frames.saturating_add(1);
        start.elapsed()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/clock.rs"]
mod tests;
