use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::Viewport;

/// Resize detection settings shared by both engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ResizeConfig {
    #[must_use]
    pub fn poll_interval(self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_poll_interval_ms() -> u64 {
    200
}

/// Tracks the last measured host size and whether resize triggers are live.
///
/// Hosts drive it from two places: a periodic poll (`poll_due` gates the
/// interval) and window-resize notifications. After `detach` every trigger is
/// inert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeWatch {
    interval: Duration,
    last_size: Viewport,
    last_poll: Option<Instant>,
    attached: bool,
}

impl ResizeWatch {
    #[must_use]
    pub fn new(config: ResizeConfig, initial_size: Viewport) -> Self {
        Self {
            interval: config.poll_interval(),
            last_size: initial_size,
            last_poll: None,
            attached: true,
        }
    }

    #[must_use]
    pub fn is_attached(self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn last_size(self) -> Viewport {
        self.last_size
    }

    pub fn detach(&mut self) {
        self.attached = false;
        self.last_poll = None;
    }

    /// Returns `true` when at least one interval elapsed since the last poll.
    pub fn poll_due(&mut self, now: Instant) -> bool {
        if !self.attached {
            return false;
        }
        let due = self
            .last_poll
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if due {
            self.last_poll = Some(now);
        }
        due
    }

    /// Records `measured` and returns it when it differs from the last size.
    pub fn observe(&mut self, measured: Viewport) -> Option<Viewport> {
        if !self.attached || measured == self.last_size {
            return None;
        }
        self.last_size = measured;
        Some(measured)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{ResizeConfig, ResizeWatch};
    use crate::core::Viewport;

    #[test]
    fn poll_respects_interval() {
        let mut watch = ResizeWatch::new(ResizeConfig::default(), Viewport::new(10, 10));
        let start = Instant::now();
        assert!(watch.poll_due(start));
        assert!(!watch.poll_due(start + Duration::from_millis(150)));
        assert!(watch.poll_due(start + Duration::from_millis(200)));
    }

    #[test]
    fn observe_reports_only_changes() {
        let mut watch = ResizeWatch::new(ResizeConfig::default(), Viewport::new(10, 10));
        assert_eq!(watch.observe(Viewport::new(10, 10)), None);
        assert_eq!(
            watch.observe(Viewport::new(20, 10)),
            Some(Viewport::new(20, 10))
        );
        assert_eq!(watch.observe(Viewport::new(20, 10)), None);
    }

    #[test]
    fn detached_watch_ignores_everything() {
        let mut watch = ResizeWatch::new(ResizeConfig::default(), Viewport::new(10, 10));
        watch.detach();
        assert!(!watch.poll_due(Instant::now()));
        assert_eq!(watch.observe(Viewport::new(30, 30)), None);
    }
}
