use chrono::TimeDelta;

use crate::api::{Plot, PlotConfig, PlotContext};
use crate::error::ChartResult;
use crate::render::{Color, Fill, PathPrimitive, RectPrimitive, Stroke};

/// Hours added before the first and after the last sample in edge-buffer mode.
pub const EDGE_BUFFER_HOURS: i64 = 16;

const MARKER_SIZE_PX: f64 = 6.0;

/// Filled region between a series and the zero baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaPlot {
    config: PlotConfig,
    gradient: Option<(Color, Color)>,
    edge_buffer: bool,
    line_width: f64,
}

impl AreaPlot {
    #[must_use]
    pub fn new(config: PlotConfig) -> Self {
        Self {
            config,
            gradient: None,
            edge_buffer: false,
            line_width: 1.5,
        }
    }

    /// Fills with a vertical gradient from `top` (plot top) to `bottom`
    /// (baseline) instead of the flat plot color.
    #[must_use]
    pub fn with_gradient(mut self, top: Color, bottom: Color) -> Self {
        self.gradient = Some((top, bottom));
        self
    }

    /// Extends the filled area past the first and last samples so it reaches
    /// the plot edges. The underlying series is not modified.
    #[must_use]
    pub fn with_edge_buffer(mut self, enabled: bool) -> Self {
        self.edge_buffer = enabled;
        self
    }
}

impl Plot for AreaPlot {
    fn config(&self) -> &PlotConfig {
        &self.config
    }

    fn draw(&mut self, ctx: &mut PlotContext<'_>) -> ChartResult<()> {
        let view = ctx.view;
        let config = &self.config;
        let (Some(first), Some(last)) = (view.data.first(), view.data.last()) else {
            return Ok(());
        };

        let mut outline: Vec<(f64, f64)> = Vec::with_capacity(view.data.len() + 2);
        let buffer = TimeDelta::hours(EDGE_BUFFER_HOURS);
        if self.edge_buffer {
            outline.push((
                view.x_point(first.date - buffer),
                view.y_point(first.value_or_zero(&config.key), config.right_axis),
            ));
        }
        outline.extend(view.data.iter().map(|point| {
            (
                view.x_point(point.date),
                view.y_point(point.value_or_zero(&config.key), config.right_axis),
            )
        }));
        if self.edge_buffer {
            outline.push((
                view.x_point(last.date + buffer),
                view.y_point(last.value_or_zero(&config.key), config.right_axis),
            ));
        }

        let baseline = view.offset();
        let fill = match self.gradient {
            Some((top, bottom)) => Fill::VerticalGradient {
                top,
                bottom,
                y_top: view.plot_top(),
                y_bottom: baseline,
            },
            None => Fill::Solid(config.color),
        };

        if outline.len() > 1 {
            let (first_x, last_x) = (outline[0].0, outline[outline.len() - 1].0);
            let mut polygon = Vec::with_capacity(outline.len() + 2);
            polygon.push((first_x, baseline));
            polygon.extend(outline.iter().copied());
            polygon.push((last_x, baseline));
            ctx.visible.push_path(PathPrimitive::polygon(polygon, fill));
            ctx.visible.push_path(PathPrimitive::polyline(
                outline,
                Stroke::new(self.line_width, config.color.lerp(Color::BLACK, 0.1)),
            ));
        }

        if let Some(point) = view.hovered_index().and_then(|index| view.data.get(index)) {
            let half = MARKER_SIZE_PX / 2.0;
            ctx.visible.push_rect(RectPrimitive::new(
                view.x_point(point.date) - half,
                view.y_point(point.value_or_zero(&config.key), config.right_axis) - half,
                MARKER_SIZE_PX,
                MARKER_SIZE_PX,
                config.highlight_color,
            ));
        }
        Ok(())
    }
}
