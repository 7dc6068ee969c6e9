use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Margin box around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 50.0,
            bottom: 30.0,
            left: 50.0,
        }
    }
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// One time-indexed record with an open set of named numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub fields: IndexMap<String, f64>,
}

impl DataPoint {
    #[must_use]
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            date,
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Adds a field from an exact decimal amount (e.g. a money value).
    pub fn with_decimal_field(self, key: impl Into<String>, value: Decimal) -> ChartResult<Self> {
        let key = key.into();
        let value = decimal_to_f64(value, &key)?;
        Ok(self.with_field(key, value))
    }

    /// Returns the field value; missing and non-finite values read as `None`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        self.fields.get(key).copied().filter(|value| value.is_finite())
    }

    /// Returns the field value with missing values read as zero.
    #[must_use]
    pub fn value_or_zero(&self, key: &str) -> f64 {
        self.value(key).unwrap_or(0.0)
    }
}

/// Copies `points` into the canonical form every engine works on.
///
/// The copy is sorted ascending by date. Empty input becomes a single
/// synthetic point at `now` so scale and index math always has a sample.
#[must_use]
pub fn canonicalize_points(points: &[DataPoint], now: DateTime<Utc>) -> Vec<DataPoint> {
    if points.is_empty() {
        return vec![DataPoint::new(now)];
    }

    let mut owned = points.to_vec();
    owned.sort_by_key(|point| point.date);
    owned
}

/// Largest finite value of `key` across `points`, if any value is positive.
#[must_use]
pub fn max_field_value(points: &[DataPoint], key: &str) -> Option<f64> {
    points
        .iter()
        .filter_map(|point| point.value(key))
        .fold(None, |acc: Option<f64>, value| match acc {
            Some(current) => Some(current.max(value)),
            None => Some(value),
        })
        .filter(|max| *max > 0.0)
}
