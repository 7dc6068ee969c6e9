use serde::{Deserialize, Serialize};

use crate::core::{Margin, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ResizeConfig;
use crate::render::Color;

use super::{DEFAULT_SMALL_CHANNEL_RATIO, FlowDirection, FlowMetric};

/// Paint for the flow diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowDiagramStyle {
    pub background: Color,
    pub outbound_fill: Color,
    pub outbound_stroke: Color,
    pub inbound_fill: Color,
    pub inbound_stroke: Color,
    pub aggregate_fill: Color,
    pub highlight_fill: Color,
    pub highlight_stroke: Color,
    pub text_color: Color,
    pub total_text_color: Color,
    pub font_size_px: f64,
}

impl Default for FlowDiagramStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            outbound_fill: Color::from_rgb8(0x5b, 0x8d, 0xef),
            outbound_stroke: Color::from_rgb8(0x9d, 0xbb, 0xf5),
            inbound_fill: Color::from_rgb8(0x3f, 0xb9, 0x8c),
            inbound_stroke: Color::from_rgb8(0x8f, 0xd8, 0xbd),
            aggregate_fill: Color::from_rgb8(0xb0, 0xb5, 0xbf),
            highlight_fill: Color::from_rgb8(0xf5, 0x9e, 0x0b),
            highlight_stroke: Color::from_rgb8(0xd9, 0x77, 0x06),
            text_color: Color::rgb(0.25, 0.27, 0.31),
            total_text_color: Color::BLACK,
            font_size_px: 11.0,
        }
    }
}

impl FlowDiagramStyle {
    #[must_use]
    pub fn fill(&self, direction: FlowDirection) -> Color {
        match direction {
            FlowDirection::Inbound => self.inbound_fill,
            FlowDirection::Outbound => self.outbound_fill,
        }
    }

    #[must_use]
    pub fn stroke(&self, direction: FlowDirection) -> Color {
        match direction {
            FlowDirection::Inbound => self.inbound_stroke,
            FlowDirection::Outbound => self.outbound_stroke,
        }
    }

    fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background,
            self.outbound_fill,
            self.outbound_stroke,
            self.inbound_fill,
            self.inbound_stroke,
            self.aggregate_fill,
            self.highlight_fill,
            self.highlight_stroke,
            self.text_color,
            self.total_text_color,
        ] {
            color.validate()?;
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "flow font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Flow diagram bootstrap configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDiagramConfig {
    #[serde(default)]
    pub metric: FlowMetric,
    #[serde(default = "default_flow_margin")]
    pub margin: Margin,
    /// Width of every bar, staggered or total.
    #[serde(default = "default_bar_width")]
    pub bar_width: f64,
    /// Horizontal gap between the two total columns.
    #[serde(default = "default_center_gap")]
    pub center_gap: f64,
    /// Vertical pixel gap between consecutive staggered bars.
    #[serde(default = "default_vertical_gap")]
    pub vertical_gap: f64,
    #[serde(default = "default_connector_width")]
    pub connector_width: f64,
    /// Heuristic fold-in threshold as a share of the larger side total.
    #[serde(default = "default_small_channel_ratio")]
    pub small_channel_ratio: f64,
    #[serde(default)]
    pub size: Option<Viewport>,
    #[serde(default)]
    pub resize: ResizeConfig,
    #[serde(default)]
    pub style: FlowDiagramStyle,
}

impl Default for FlowDiagramConfig {
    fn default() -> Self {
        Self::new(FlowMetric::Amount)
    }
}

impl FlowDiagramConfig {
    #[must_use]
    pub fn new(metric: FlowMetric) -> Self {
        Self {
            metric,
            margin: default_flow_margin(),
            bar_width: default_bar_width(),
            center_gap: default_center_gap(),
            vertical_gap: default_vertical_gap(),
            connector_width: default_connector_width(),
            small_channel_ratio: default_small_channel_ratio(),
            size: None,
            resize: ResizeConfig::default(),
            style: FlowDiagramStyle::default(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    #[must_use]
    pub fn with_center_gap(mut self, center_gap: f64) -> Self {
        self.center_gap = center_gap;
        self
    }

    #[must_use]
    pub fn with_vertical_gap(mut self, vertical_gap: f64) -> Self {
        self.vertical_gap = vertical_gap;
        self
    }

    #[must_use]
    pub fn with_connector_width(mut self, connector_width: f64) -> Self {
        self.connector_width = connector_width;
        self
    }

    #[must_use]
    pub fn with_small_channel_ratio(mut self, ratio: f64) -> Self {
        self.small_channel_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: Viewport) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_resize(mut self, resize: ResizeConfig) -> Self {
        self.resize = resize;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: FlowDiagramStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        let margin = self.margin.validate()?;
        for (name, value) in [
            ("bar width", self.bar_width),
            ("connector width", self.connector_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "flow {name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("center gap", self.center_gap),
            ("vertical gap", self.vertical_gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "flow {name} must be finite and >= 0"
                )));
            }
        }
        if !self.small_channel_ratio.is_finite()
            || !(0.0..1.0).contains(&self.small_channel_ratio)
        {
            return Err(ChartError::InvalidConfig(
                "small channel ratio must be in [0, 1)".to_owned(),
            ));
        }
        if let Some(size) = self.size {
            size.validate()?;
        }
        self.style.validate()?;
        Ok(Self { margin, ..self })
    }
}

fn default_flow_margin() -> Margin {
    Margin::new(24.0, 0.0, 8.0, 0.0)
}

fn default_bar_width() -> f64 {
    12.0
}

fn default_center_gap() -> f64 {
    40.0
}

fn default_vertical_gap() -> f64 {
    4.0
}

fn default_connector_width() -> f64 {
    2.0
}

fn default_small_channel_ratio() -> f64 {
    DEFAULT_SMALL_CHANNEL_RATIO
}
