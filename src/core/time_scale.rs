use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::primitives::{datetime_to_unix_millis, delta_to_millis, unix_millis_to_datetime};
use crate::error::{ChartError, ChartResult};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Tick density controls for the time axis.
///
/// Surfaces narrower than `width_threshold_px` space ticks by
/// `narrow_spacing_px`, wider ones by `wide_spacing_px`. The interval between
/// ticks never drops below `min_interval_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeTickPolicy {
    pub width_threshold_px: f64,
    pub narrow_spacing_px: f64,
    pub wide_spacing_px: f64,
    pub min_interval_secs: i64,
}

impl Default for TimeTickPolicy {
    fn default() -> Self {
        Self {
            width_threshold_px: 600.0,
            narrow_spacing_px: 60.0,
            wide_spacing_px: 100.0,
            min_interval_secs: 86_400,
        }
    }
}

impl TimeTickPolicy {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("width_threshold_px", self.width_threshold_px),
            ("narrow_spacing_px", self.narrow_spacing_px),
            ("wide_spacing_px", self.wide_spacing_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "tick policy `{name}` must be finite and > 0"
                )));
            }
        }
        if self.min_interval_secs <= 0 {
            return Err(ChartError::InvalidConfig(
                "tick policy min interval must be positive".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn min_interval(self) -> TimeDelta {
        TimeDelta::seconds(self.min_interval_secs)
    }

    #[must_use]
    pub fn spacing_for_width(self, width_px: f64) -> f64 {
        if width_px < self.width_threshold_px {
            self.narrow_spacing_px
        } else {
            self.wide_spacing_px
        }
    }
}

/// Horizontal scale over elapsed time, invertible for pointer picking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    linear: LinearScale,
}

impl TimeScale {
    /// Builds a scale over `[from, to]`. A zero-length domain is widened by
    /// half a day on each side.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, range: (f64, f64)) -> ChartResult<Self> {
        if from > to {
            return Err(ChartError::InvalidConfig(format!(
                "time range start {from} is after end {to}"
            )));
        }
        let (from, to) = if from == to {
            let half = TimeDelta::hours(12);
            (from - half, to + half)
        } else {
            (from, to)
        };
        let linear = LinearScale::new(
            (datetime_to_unix_millis(from), datetime_to_unix_millis(to)),
            range,
        )?;
        Ok(Self { from, to, linear })
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.from, self.to)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    pub fn set_range(&mut self, range: (f64, f64)) -> ChartResult<()> {
        self.linear = self.linear.with_range(range)?;
        Ok(())
    }

    #[must_use]
    pub fn map(self, time: DateTime<Utc>) -> f64 {
        self.linear.map(datetime_to_unix_millis(time))
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> DateTime<Utc> {
        unix_millis_to_datetime(self.linear.invert(pixel))
    }

    /// Pixel width of `delta` at this scale.
    #[must_use]
    pub fn span_px(self, delta: TimeDelta) -> f64 {
        self.linear.span_px(delta_to_millis(delta))
    }

    /// Day-aligned tick instants inside the domain.
    #[must_use]
    pub fn ticks(self, policy: TimeTickPolicy) -> Vec<DateTime<Utc>> {
        let (start_px, end_px) = self.range();
        let width = (end_px - start_px).abs();
        let spacing = policy.spacing_for_width(width);
        let target_count = (width / spacing).floor().max(1.0);

        let span_millis = datetime_to_unix_millis(self.to) - datetime_to_unix_millis(self.from);
        let min_millis = delta_to_millis(policy.min_interval()).max(1.0);
        let raw = (span_millis / target_count).max(min_millis);
        let interval_millis = if min_millis >= MILLIS_PER_DAY {
            (raw / MILLIS_PER_DAY).ceil() * MILLIS_PER_DAY
        } else {
            (raw / min_millis).ceil() * min_millis
        };
        let align = min_millis.min(MILLIS_PER_DAY);

        let from_millis = datetime_to_unix_millis(self.from);
        let to_millis = datetime_to_unix_millis(self.to);
        let mut cursor = (from_millis / align).ceil() * align;
        let mut ticks = Vec::new();
        while cursor <= to_millis {
            ticks.push(unix_millis_to_datetime(cursor));
            cursor += interval_millis;
        }
        ticks
    }
}
