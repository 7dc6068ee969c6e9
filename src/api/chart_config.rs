use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Margin, TimeTickPolicy, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ResizeConfig;
use crate::render::Color;

/// Field bindings for one vertical axis.
///
/// `scale_key` drives the axis domain; `keys` are the fields shown against
/// this axis in crosshair labels. Without an explicit `scale_key` the first
/// entry of `keys` drives the domain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisBinding {
    #[serde(default)]
    pub scale_key: Option<String>,
    #[serde(default)]
    pub keys: Vec<String>,
}

impl AxisBinding {
    #[must_use]
    pub fn new(keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            scale_key: None,
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn with_scale_key(mut self, key: impl Into<String>) -> Self {
        self.scale_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn driver_key(&self) -> Option<&str> {
        self.scale_key
            .as_deref()
            .or_else(|| self.keys.first().map(String::as_str))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.scale_key.is_none()
    }
}

/// Colors and sizes for axes, crosshair and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub background: Color,
    pub axis_color: Color,
    pub grid_color: Color,
    pub text_color: Color,
    pub crosshair_color: Color,
    pub crosshair_label_background: Color,
    pub crosshair_label_text: Color,
    pub font_size_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            axis_color: Color::rgb(0.55, 0.57, 0.62),
            grid_color: Color::rgba(0.55, 0.57, 0.62, 0.15),
            text_color: Color::rgb(0.25, 0.27, 0.31),
            crosshair_color: Color::rgb(0.45, 0.47, 0.52),
            crosshair_label_background: Color::rgb(0.16, 0.18, 0.22),
            crosshair_label_text: Color::WHITE,
            font_size_px: 11.0,
        }
    }
}

/// Chart engine bootstrap configuration. Immutable once the engine exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub left_axis: AxisBinding,
    #[serde(default)]
    pub right_axis: AxisBinding,
    #[serde(default = "default_padding_factor")]
    pub left_padding: f64,
    #[serde(default = "default_padding_factor")]
    pub right_padding: f64,
    /// Overrides the measured host size when set.
    #[serde(default)]
    pub size: Option<Viewport>,
    /// Width of one data bucket (bar width and bar hover interval).
    #[serde(default = "default_tick_secs")]
    pub tick_secs: i64,
    #[serde(default)]
    pub time_ticks: TimeTickPolicy,
    #[serde(default = "default_value_tick_count")]
    pub value_tick_count: usize,
    #[serde(default)]
    pub resize: ResizeConfig,
    #[serde(default)]
    pub style: ChartStyle,
}

impl ChartConfig {
    #[must_use]
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            margin: Margin::default(),
            left_axis: AxisBinding::default(),
            right_axis: AxisBinding::default(),
            left_padding: default_padding_factor(),
            right_padding: default_padding_factor(),
            size: None,
            tick_secs: default_tick_secs(),
            time_ticks: TimeTickPolicy::default(),
            value_tick_count: default_value_tick_count(),
            resize: ResizeConfig::default(),
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_left_axis(mut self, binding: AxisBinding) -> Self {
        self.left_axis = binding;
        self
    }

    #[must_use]
    pub fn with_right_axis(mut self, binding: AxisBinding) -> Self {
        self.right_axis = binding;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, left_padding: f64, right_padding: f64) -> Self {
        self.left_padding = left_padding;
        self.right_padding = right_padding;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: Viewport) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_tick(mut self, tick: TimeDelta) -> Self {
        self.tick_secs = tick.num_seconds();
        self
    }

    #[must_use]
    pub fn with_time_ticks(mut self, policy: TimeTickPolicy) -> Self {
        self.time_ticks = policy;
        self
    }

    #[must_use]
    pub fn with_resize(mut self, resize: ResizeConfig) -> Self {
        self.resize = resize;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn tick(&self) -> TimeDelta {
        TimeDelta::seconds(self.tick_secs)
    }

    /// Validates the config and applies the margin invariant: a side without
    /// axis keys has no margin.
    pub fn normalized(mut self) -> ChartResult<Self> {
        if self.from > self.to {
            return Err(ChartError::InvalidConfig(format!(
                "time range start {} is after end {}",
                self.from, self.to
            )));
        }
        self.margin = self.margin.validate()?;
        for (side, padding) in [("left", self.left_padding), ("right", self.right_padding)] {
            if !padding.is_finite() || padding <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{side} padding factor must be finite and > 0"
                )));
            }
        }
        if self.tick_secs <= 0 {
            return Err(ChartError::InvalidConfig(
                "tick must be a positive duration".to_owned(),
            ));
        }
        if let Some(size) = self.size {
            size.validate()?;
        }
        self.time_ticks = self.time_ticks.validate()?;
        self.style.background.validate()?;

        if self.left_axis.keys.is_empty() {
            self.margin.left = 0.0;
        }
        if self.right_axis.keys.is_empty() {
            self.margin.right = 0.0;
        }
        Ok(self)
    }
}

fn default_padding_factor() -> f64 {
    1.1
}

fn default_tick_secs() -> i64 {
    86_400
}

fn default_value_tick_count() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{AxisBinding, ChartConfig};
    use crate::core::Margin;

    #[test]
    fn margins_follow_axis_keys() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let config = ChartConfig::new(from, to)
            .with_margin(Margin::new(10.0, 40.0, 20.0, 40.0))
            .with_left_axis(AxisBinding::new(["val"]))
            .normalized()
            .expect("valid config");
        assert_eq!(config.margin.left, 40.0);
        assert_eq!(config.margin.right, 0.0);
    }

    #[test]
    fn non_positive_padding_is_rejected() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let result = ChartConfig::new(at, at).with_padding(0.0, 1.1).normalized();
        assert!(result.is_err());
    }

    #[test]
    fn scale_key_defaults_to_first_key() {
        let binding = AxisBinding::new(["a", "b"]);
        assert_eq!(binding.driver_key(), Some("a"));
        assert_eq!(binding.with_scale_key("b").driver_key(), Some("b"));
    }
}
