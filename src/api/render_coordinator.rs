use tracing::trace;

use crate::error::ChartResult;
use crate::render::Renderer;

use super::axis_render_frame_builder::{push_time_axis, push_value_axes};
use super::crosshair_render_frame_builder::push_crosshair;
use super::engine::chart_view;
use super::{ChartEngine, LegendEntry, PlotContext};

impl<R: Renderer> ChartEngine<R> {
    /// Full synchronous redraw with the current hover state.
    ///
    /// Clears both surfaces and the figure registry, re-domains the value
    /// scales, redraws the axes, runs every plot in registration order and
    /// finally the crosshair.
    pub fn draw(&mut self) -> ChartResult<()> {
        self.visible_frame.clear(self.viewport);
        self.interaction_frame.clear(self.viewport);
        self.figures.reset();

        self.refit_value_scales()?;

        let view = chart_view(
            &self.data,
            &self.config,
            self.viewport,
            (self.time_scale, self.left_scale, self.right_scale),
            self.hover,
        );

        push_time_axis(
            &mut self.visible_frame,
            &view,
            self.config.time_ticks,
            self.time_formatter.as_ref(),
        );
        push_value_axes(
            &mut self.visible_frame,
            &view,
            !self.config.left_axis.keys.is_empty(),
            !self.config.right_axis.keys.is_empty(),
            self.config.value_tick_count,
        );

        for plot in self.plots.values_mut() {
            let mut ctx = PlotContext {
                view,
                visible: &mut self.visible_frame,
                interaction: &mut self.interaction_frame,
                figures: &mut self.figures,
            };
            plot.draw(&mut ctx)?;
        }

        if let Some(index) = view.hovered_index() {
            push_crosshair(
                &mut self.visible_frame,
                &view,
                index,
                &self.config.left_axis.keys,
                &self.config.right_axis.keys,
            );
        }

        let legend_index = view.legend_index();
        self.legend = self
            .plots
            .values()
            .map(|plot| LegendEntry {
                id: plot.id().to_owned(),
                label: plot.legend_label().to_owned(),
                text: plot.legend_text(&view, legend_index),
                color: plot.config().color,
            })
            .collect();

        self.renderer.render(&self.visible_frame)?;
        self.interaction_surface.render(&self.interaction_frame)?;
        self.draw_count += 1;

        trace!(
            figures = self.figures.len(),
            commands = self.visible_frame.commands.len(),
            draw = self.draw_count,
            "chart draw pass complete"
        );
        Ok(())
    }

    fn refit_value_scales(&mut self) -> ChartResult<()> {
        match self.config.left_axis.driver_key() {
            Some(key) => self.left_scale.fit_to_data(&self.data, key)?,
            None => self.left_scale.fit_to_max(None)?,
        }
        match self.config.right_axis.driver_key() {
            Some(key) => self.right_scale.fit_to_data(&self.data, key)?,
            None => self.right_scale.fit_to_max(None)?,
        }
        trace!(
            left_max = self.left_scale.domain().1,
            right_max = self.right_scale.domain().1,
            "value scales refit"
        );
        Ok(())
    }
}
