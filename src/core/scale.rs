use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::core::types::max_field_value;
use crate::error::{ChartError, ChartResult};

/// Axis maximum used when a series has no positive value.
pub const DEFAULT_AXIS_MAX: f64 = 100.0;

/// Linear map from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        let (range_start, range_end) = validate_range(range)?;

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Returns a copy re-domained to `domain`, keeping the pixel range.
    pub fn with_domain(self, domain: (f64, f64)) -> ChartResult<Self> {
        Self::new(domain, self.range())
    }

    /// Returns a copy with a new pixel range, keeping the domain.
    pub fn with_range(self, range: (f64, f64)) -> ChartResult<Self> {
        Self::new(self.domain(), range)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Inverse of `map`. A zero-width range collapses onto `domain_start`.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Pixel length that `delta` domain units occupy.
    #[must_use]
    pub fn span_px(self, delta: f64) -> f64 {
        (self.map(delta) - self.map(0.0)).abs()
    }
}

fn validate_range(range: (f64, f64)) -> ChartResult<(f64, f64)> {
    if !range.0.is_finite() || !range.1.is_finite() {
        return Err(ChartError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }
    Ok(range)
}

/// Vertical value axis whose domain always starts at zero.
///
/// The upper bound is `max(observed) * padding_factor`, or
/// `DEFAULT_AXIS_MAX * padding_factor` when nothing positive was observed.
/// Pixel output grows with the value; callers flip it into surface space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    linear: LinearScale,
    padding_factor: f64,
}

impl ValueScale {
    pub fn new(height_px: f64, padding_factor: f64) -> ChartResult<Self> {
        if !padding_factor.is_finite() || padding_factor <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "padding factor must be finite and > 0".to_owned(),
            ));
        }
        let linear = LinearScale::new(
            (0.0, DEFAULT_AXIS_MAX * padding_factor),
            (0.0, height_px.max(0.0)),
        )?;
        Ok(Self {
            linear,
            padding_factor,
        })
    }

    #[must_use]
    pub fn padding_factor(self) -> f64 {
        self.padding_factor
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        self.linear.range().1
    }

    /// Re-domains from the observed maximum of `key`.
    pub fn fit_to_data(&mut self, points: &[DataPoint], key: &str) -> ChartResult<()> {
        self.fit_to_max(max_field_value(points, key))
    }

    /// Re-domains from an explicit maximum; `None` falls back to the default.
    pub fn fit_to_max(&mut self, observed_max: Option<f64>) -> ChartResult<()> {
        let max = observed_max
            .filter(|max| max.is_finite() && *max > 0.0)
            .unwrap_or(DEFAULT_AXIS_MAX);
        self.linear = self.linear.with_domain((0.0, max * self.padding_factor))?;
        Ok(())
    }

    pub fn set_height_px(&mut self, height_px: f64) -> ChartResult<()> {
        self.linear = self.linear.with_range((0.0, height_px.max(0.0)))?;
        Ok(())
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        self.linear.map(value)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    /// `count` evenly spaced tick values from zero to the domain maximum.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![0.0];
        }
        let (_, max) = self.domain();
        let step = max / (count - 1) as f64;
        (0..count).map(|index| step * index as f64).collect()
    }
}
