//! Reconnection poll timer and frame pacing

use std::time::{Duration, Instant};

/// Fires at most once per interval while no controller is bound
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    last_check: Option<Instant>,
}

impl PollTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_check: None,
        }
    }

    /// True when never checked, forced, or the interval has passed
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_check
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval)
    }

    pub fn mark(&mut self, now: Instant) {
        self.last_check = Some(now);
    }

    /// Make the next `is_due` true regardless of the interval
    pub fn force(&mut self) {
        self.last_check = None;
    }
}

/// Caps the loop to a target frame rate
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    frame_start: Option<Instant>,
}

impl FramePacer {
    pub fn from_rate(frames_per_second: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / frames_per_second.max(1),
            frame_start: None,
        }
    }

    pub fn begin(&mut self, now: Instant) {
        self.frame_start = Some(now);
    }

    /// Time left in the current frame
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.frame_start {
            Some(start) => self
                .period
                .saturating_sub(now.saturating_duration_since(start)),
            None => self.period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_timer() {
        let start = Instant::now();
        let mut timer = PollTimer::new(Duration::from_millis(1500));
        assert!(timer.is_due(start));

        timer.mark(start);
        assert!(!timer.is_due(start + Duration::from_millis(1499)));
        assert!(timer.is_due(start + Duration::from_millis(1500)));

        timer.force();
        assert!(timer.is_due(start));
    }

    #[test]
    fn test_frame_pacer() {
        let start = Instant::now();
        let mut pacer = FramePacer::from_rate(50);
        assert_eq!(pacer.period(), Duration::from_millis(20));

        pacer.begin(start);
        assert_eq!(pacer.remaining(start + Duration::from_millis(5)), Duration::from_millis(15));
        assert_eq!(pacer.remaining(start + Duration::from_millis(40)), Duration::ZERO);

        // Zero rate is clamped rather than dividing by zero
        assert_eq!(FramePacer::from_rate(0).period(), Duration::from_secs(1));
    }
}
