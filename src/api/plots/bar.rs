use crate::api::{Plot, PlotConfig, PlotContext, format_value};
use crate::error::ChartResult;
use crate::render::{RectPrimitive, TextHAlign, TextPrimitive};

const LABEL_GAP_PX: f64 = 4.0;

/// One rectangle per data point, centered on the point's date.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPlot {
    config: PlotConfig,
    width_ratio: f64,
}

impl BarPlot {
    #[must_use]
    pub fn new(config: PlotConfig) -> Self {
        Self {
            config,
            width_ratio: 0.7,
        }
    }

    /// Bar width as a fraction of one tick; clamped to `(0, 1]`.
    #[must_use]
    pub fn with_width_ratio(mut self, ratio: f64) -> Self {
        if ratio.is_finite() && ratio > 0.0 {
            self.width_ratio = ratio.min(1.0);
        }
        self
    }
}

impl Plot for BarPlot {
    fn config(&self) -> &PlotConfig {
        &self.config
    }

    fn draw(&mut self, ctx: &mut PlotContext<'_>) -> ChartResult<()> {
        let view = ctx.view;
        let config = &self.config;
        let bar_width = (view.tick_width_px() * self.width_ratio).max(1.0);
        let baseline = view.offset();

        for (index, point) in view.data.iter().enumerate() {
            let value = point.value_or_zero(&config.key).max(0.0);
            let x = view.x_point(point.date) - bar_width / 2.0;
            let top = view.y_point(value, config.right_axis);
            let height = (baseline - top).max(0.0);
            let hovered = view.hovered_index() == Some(index);

            let fill = if hovered {
                config.highlight_color
            } else {
                config.color
            };
            ctx.visible
                .push_rect(RectPrimitive::new(x, top, bar_width, height, fill));

            if height > 0.0 {
                let pick = ctx.pick_color(&config.id, index)?;
                ctx.interaction
                    .push_rect(RectPrimitive::new(x, top, bar_width, height, pick));
            }

            if config.show_labels || hovered {
                let text_color = if hovered {
                    config.highlight_text_color
                } else {
                    config.text_color
                };
                ctx.visible.push_text(TextPrimitive::new(
                    format_value(value),
                    x + bar_width / 2.0,
                    top - LABEL_GAP_PX,
                    view.style.font_size_px,
                    text_color,
                    TextHAlign::Center,
                ));
            }
        }
        Ok(())
    }
}
