use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, Margin, TimeScale, ValueScale, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{FigureRegistry, HoverContext};
use crate::render::{Color, RenderFrame};

use super::label_format::format_value;
use super::{ChartStyle, EventCluster};

/// Per-plot configuration. `id` is the registry key inside one engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub id: String,
    pub key: String,
    pub label: String,
    pub color: Color,
    pub highlight_color: Color,
    pub text_color: Color,
    pub highlight_text_color: Color,
    #[serde(default)]
    pub right_axis: bool,
    #[serde(default)]
    pub show_labels: bool,
}

impl PlotConfig {
    #[must_use]
    pub fn new(id: impl Into<String>, key: impl Into<String>, color: Color) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            key: key.into(),
            color,
            highlight_color: color.lerp(Color::BLACK, 0.3),
            text_color: Color::rgb(0.25, 0.27, 0.31),
            highlight_text_color: Color::BLACK,
            right_axis: false,
            show_labels: false,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, fill: Color, text: Color) -> Self {
        self.highlight_color = fill;
        self.highlight_text_color = text;
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, text_color: Color) -> Self {
        self.text_color = text_color;
        self
    }

    #[must_use]
    pub fn on_right_axis(mut self) -> Self {
        self.right_axis = true;
        self
    }

    #[must_use]
    pub fn with_labels(mut self) -> Self {
        self.show_labels = true;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.id.is_empty() {
            return Err(ChartError::InvalidConfig(
                "plot id must not be empty".to_owned(),
            ));
        }
        if self.key.is_empty() {
            return Err(ChartError::InvalidConfig(format!(
                "plot `{}` must name a data key",
                self.id
            )));
        }
        for color in [
            self.color,
            self.highlight_color,
            self.text_color,
            self.highlight_text_color,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

/// What a chart picking color points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartFigure {
    pub plot_id: String,
    pub index: usize,
}

/// One legend line, refreshed on every draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub id: String,
    pub label: String,
    pub text: String,
    pub color: Color,
}

/// Read-only chart state shared with plots during a draw pass.
#[derive(Debug, Clone, Copy)]
pub struct ChartView<'a> {
    pub data: &'a [DataPoint],
    pub viewport: Viewport,
    pub margin: Margin,
    pub time_scale: TimeScale,
    pub left_scale: ValueScale,
    pub right_scale: ValueScale,
    pub tick: TimeDelta,
    pub hover: Option<HoverContext>,
    pub style: &'a ChartStyle,
}

impl ChartView<'_> {
    #[must_use]
    pub fn x_point(&self, date: DateTime<Utc>) -> f64 {
        self.time_scale.map(date)
    }

    /// Surface y for `value`; larger values sit higher on screen.
    #[must_use]
    pub fn y_point(&self, value: f64, right_axis: bool) -> f64 {
        self.offset() - self.value_scale(right_axis).map(value)
    }

    /// Surface y of the zero baseline.
    #[must_use]
    pub fn offset(&self) -> f64 {
        f64::from(self.viewport.height) - self.margin.bottom
    }

    #[must_use]
    pub fn plot_top(&self) -> f64 {
        self.offset() - self.left_scale.height_px()
    }

    #[must_use]
    pub fn plot_left(&self) -> f64 {
        self.time_scale.range().0
    }

    #[must_use]
    pub fn plot_right(&self) -> f64 {
        self.time_scale.range().1
    }

    #[must_use]
    pub fn value_scale(&self, right_axis: bool) -> ValueScale {
        if right_axis {
            self.right_scale
        } else {
            self.left_scale
        }
    }

    /// Pixel width of one data bucket.
    #[must_use]
    pub fn tick_width_px(&self) -> f64 {
        self.time_scale.span_px(self.tick)
    }

    /// Index used for legends: the hovered point, else the most recent one.
    #[must_use]
    pub fn legend_index(&self) -> usize {
        self.hover
            .and_then(|hover| hover.index)
            .unwrap_or_else(|| self.data.len().saturating_sub(1))
    }

    #[must_use]
    pub fn hovered_index(&self) -> Option<usize> {
        self.hover.and_then(|hover| hover.index)
    }
}

/// Mutable targets for one plot draw: the visible frame, the picking frame
/// and the pass's figure registry.
pub struct PlotContext<'a> {
    pub view: ChartView<'a>,
    pub visible: &'a mut RenderFrame,
    pub interaction: &'a mut RenderFrame,
    pub figures: &'a mut FigureRegistry<ChartFigure>,
}

impl PlotContext<'_> {
    /// Registers `(plot_id, index)` and returns its unique picking color.
    pub fn pick_color(&mut self, plot_id: &str, index: usize) -> ChartResult<Color> {
        self.figures.register(ChartFigure {
            plot_id: plot_id.to_owned(),
            index,
        })
    }
}

/// A visual series drawn onto the shared chart surfaces.
///
/// `draw` runs on every pass and must derive all output from the view; any
/// cache it keeps must be keyed on view state so repeated draws are
/// pixel-identical.
pub trait Plot {
    fn config(&self) -> &PlotConfig;

    fn draw(&mut self, ctx: &mut PlotContext<'_>) -> ChartResult<()>;

    fn id(&self) -> &str {
        &self.config().id
    }

    fn legend_label(&self) -> &str {
        &self.config().label
    }

    fn uses_right_axis(&self) -> bool {
        self.config().right_axis
    }

    fn legend_text(&self, view: &ChartView<'_>, index: usize) -> String {
        let value = view
            .data
            .get(index)
            .map_or(0.0, |point| point.value_or_zero(&self.config().key));
        format_value(value)
    }

    /// Host-rendered overlay clusters (icons). Most plots have none.
    fn event_clusters(&self) -> &[EventCluster] {
        &[]
    }
}
