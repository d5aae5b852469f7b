/// Frame scheduling: decides when a redraw actually happens
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How redraws are triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedrawPolicy {
    /// Changes set a dirty flag; a periodic tick renders when it is set
    Poll,
    /// Each change notification renders immediately; ticks do nothing
    OnChange,
    /// Every tick (animation frame) renders, changed or not
    Continuous,
}

/// Single render-loop gate shared by every front end
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    policy: RedrawPolicy,
    dirty: bool,
}

impl FrameScheduler {
    pub fn new(policy: RedrawPolicy) -> Self {
        Self {
            policy,
            dirty: false,
        }
    }

    pub fn policy(&self) -> RedrawPolicy {
        self.policy
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record that camera or light state changed.
    ///
    /// Returns `true` when the caller must render right away.
    pub fn notify_change(&mut self) -> bool {
        match self.policy {
            RedrawPolicy::Poll => {
                self.dirty = true;
                false
            }
            RedrawPolicy::OnChange => true,
            RedrawPolicy::Continuous => false,
        }
    }

    /// Timer or animation-frame callback. Returns `true` when a frame is due.
    ///
    /// A pending poll frame stays pending until `mark_rendered`, so a failed
    /// draw is retried on the next tick.
    pub fn on_tick(&self) -> bool {
        match self.policy {
            RedrawPolicy::Poll => self.dirty,
            RedrawPolicy::OnChange => false,
            RedrawPolicy::Continuous => true,
        }
    }

    /// A frame was drawn; nothing is pending any more
    pub fn mark_rendered(&mut self) {
        self.dirty = false;
    }
}

/// Fixed-period timer fed with elapsed wall time
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Accumulate `delta`, returns true if the period elapsed.
    ///
    /// Missed periods collapse into a single fire.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.elapsed += delta;
        if self.elapsed >= self.period {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Time left until the next fire
    pub fn remaining(&self) -> Duration {
        self.period.saturating_sub(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_renders_once_per_change() {
        let mut scheduler = FrameScheduler::new(RedrawPolicy::Poll);
        assert!(!scheduler.on_tick());

        assert!(!scheduler.notify_change());
        assert!(!scheduler.notify_change());
        assert!(scheduler.is_dirty());

        assert!(scheduler.on_tick());
        // Still pending until the frame is actually drawn
        assert!(scheduler.is_dirty());
        scheduler.mark_rendered();
        assert!(!scheduler.is_dirty());
        assert!(!scheduler.on_tick());
    }

    #[test]
    fn on_change_renders_immediately() {
        let mut scheduler = FrameScheduler::new(RedrawPolicy::OnChange);
        assert!(scheduler.notify_change());
        assert!(!scheduler.is_dirty());
        assert!(!scheduler.on_tick());
    }

    #[test]
    fn continuous_renders_every_tick() {
        let mut scheduler = FrameScheduler::new(RedrawPolicy::Continuous);
        assert!(!scheduler.notify_change());
        assert!(scheduler.on_tick());
        assert!(scheduler.on_tick());
    }

    #[test]
    fn mark_rendered_clears_pending() {
        let mut scheduler = FrameScheduler::new(RedrawPolicy::Poll);
        scheduler.notify_change();
        scheduler.mark_rendered();
        assert!(!scheduler.on_tick());
    }

    #[test]
    fn interval_fires_at_period() {
        let mut timer = Interval::new(Duration::from_millis(50));

        assert!(!timer.tick(Duration::from_millis(30)));
        assert_eq!(timer.remaining(), Duration::from_millis(20));

        assert!(timer.tick(Duration::from_millis(30)));
        assert_eq!(timer.remaining(), Duration::from_millis(50));

        // A long stall fires once, not three times
        assert!(timer.tick(Duration::from_millis(150)));
        assert!(!timer.tick(Duration::from_millis(1)));
    }
}
