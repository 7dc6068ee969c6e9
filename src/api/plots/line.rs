use crate::api::{Plot, PlotConfig, PlotContext, format_value};
use crate::error::ChartResult;
use crate::render::{PathPrimitive, RectPrimitive, Stroke, TextHAlign, TextPrimitive};

const HANDLE_SIZE_PX: f64 = 8.0;
const MARKER_SIZE_PX: f64 = 6.0;
const LABEL_GAP_PX: f64 = 6.0;

/// Polyline through every data point of one key.
///
/// Each vertex is pickable through a small square handle on the picking
/// surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    config: PlotConfig,
    line_width: f64,
}

impl LinePlot {
    #[must_use]
    pub fn new(config: PlotConfig) -> Self {
        Self {
            config,
            line_width: 2.0,
        }
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        if line_width.is_finite() && line_width > 0.0 {
            self.line_width = line_width;
        }
        self
    }
}

impl Plot for LinePlot {
    fn config(&self) -> &PlotConfig {
        &self.config
    }

    fn draw(&mut self, ctx: &mut PlotContext<'_>) -> ChartResult<()> {
        let view = ctx.view;
        let config = &self.config;
        let vertices: Vec<(f64, f64)> = view
            .data
            .iter()
            .map(|point| {
                (
                    view.x_point(point.date),
                    view.y_point(point.value_or_zero(&config.key), config.right_axis),
                )
            })
            .collect();

        if vertices.len() > 1 {
            ctx.visible.push_path(PathPrimitive::polyline(
                vertices.clone(),
                Stroke::new(self.line_width, config.color),
            ));
        }

        let half_handle = HANDLE_SIZE_PX / 2.0;
        for (index, &(x, y)) in vertices.iter().enumerate() {
            let pick = ctx.pick_color(&config.id, index)?;
            ctx.interaction.push_rect(RectPrimitive::new(
                x - half_handle,
                y - half_handle,
                HANDLE_SIZE_PX,
                HANDLE_SIZE_PX,
                pick,
            ));

            let hovered = view.hovered_index() == Some(index);
            if hovered {
                let half = MARKER_SIZE_PX / 2.0;
                ctx.visible.push_rect(RectPrimitive::new(
                    x - half,
                    y - half,
                    MARKER_SIZE_PX,
                    MARKER_SIZE_PX,
                    config.highlight_color,
                ));
            }
            if config.show_labels {
                let value = view.data[index].value_or_zero(&config.key);
                ctx.visible.push_text(TextPrimitive::new(
                    format_value(value),
                    x,
                    y - LABEL_GAP_PX,
                    view.style.font_size_px,
                    if hovered {
                        config.highlight_text_color
                    } else {
                        config.text_color
                    },
                    TextHAlign::Center,
                ));
            }
        }
        Ok(())
    }
}
