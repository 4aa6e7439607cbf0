use std::time::{Duration, Instant};

/// Host side of the frame loop: yields the time of each frame since mount.
pub trait FrameClock {
    fn next_frame(&mut self) -> Duration;
}

/// Wall clock, for interactive playback.
pub struct RealtimeClock {
    origin: Instant,
}

impl RealtimeClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl FrameClock for RealtimeClock {
    fn next_frame(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Advances exactly one frame per call regardless of how long rendering takes,
/// so exported video runs at the nominal speed.
pub struct FixedStepClock {
    frame: u32,
    fps: u32,
}

impl FixedStepClock {
    /// `fps` must be non-zero.
    pub fn new(fps: u32) -> Self {
        Self { frame: 0, fps }
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

impl FrameClock for FixedStepClock {
    fn next_frame(&mut self) -> Duration {
        // frame / fps computed exactly, no accumulated rounding
        let whole = self.frame / self.fps;
        let rest = self.frame % self.fps;
        let now = Duration::from_secs(whole as u64) + Duration::from_secs(1) * rest / self.fps;
        self.frame += 1;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_starts_at_zero() {
        let mut clock = FixedStepClock::new(60);
        assert_eq!(clock.next_frame(), Duration::ZERO);
        assert_eq!(clock.next_frame(), clock.frame_time());
    }

    #[test]
    fn fixed_step_lands_on_whole_seconds() {
        let mut clock = FixedStepClock::new(60);
        let frames: Vec<Duration> = (0..=120).map(|_| clock.next_frame()).collect();
        assert_eq!(frames[60], Duration::from_secs(1));
        assert_eq!(frames[120], Duration::from_secs(2));
    }

    #[test]
    fn one_fps_steps_whole_seconds() {
        let mut clock = FixedStepClock::new(1);
        clock.next_frame();
        assert_eq!(clock.next_frame(), Duration::from_secs(1));
    }

    #[test]
    fn realtime_clock_is_monotonic() {
        let mut clock = RealtimeClock::new();
        let a = clock.next_frame();
        let b = clock.next_frame();
        assert!(b >= a);
    }
}
