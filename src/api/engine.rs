use indexmap::IndexMap;

use crate::core::{DataPoint, TimeScale, ValueScale, Viewport};
use crate::interaction::{FigureRegistry, HoverContext, ResizeWatch};
use crate::render::{RasterSurface, RenderFrame, Renderer};

use super::{
    ChartConfig, ChartFigure, ChartView, EventCluster, LegendEntry, Plot, SurfaceHost,
    TimeLabelFormatter,
};

/// Time-series chart orchestrator.
///
/// Owns the scales, a private copy of the data, the visible renderer, the
/// hidden picking surface, the plot registry and resize state. Every public
/// entry point runs a complete clear-and-redraw before returning.
pub struct ChartEngine<R: Renderer = RasterSurface> {
    pub(super) host: Box<dyn SurfaceHost>,
    pub(super) renderer: R,
    pub(super) config: ChartConfig,
    pub(super) viewport: Viewport,
    pub(super) data: Vec<DataPoint>,
    pub(super) time_scale: TimeScale,
    pub(super) left_scale: ValueScale,
    pub(super) right_scale: ValueScale,
    pub(super) plots: IndexMap<String, Box<dyn Plot>>,
    pub(super) visible_frame: RenderFrame,
    pub(super) interaction_frame: RenderFrame,
    pub(super) interaction_surface: RasterSurface,
    pub(super) figures: FigureRegistry<ChartFigure>,
    pub(super) hover: Option<HoverContext>,
    pub(super) legend: Vec<LegendEntry>,
    pub(super) time_formatter: Box<dyn TimeLabelFormatter>,
    pub(super) resize_watch: ResizeWatch,
    pub(super) draw_count: u64,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The engine's private, date-sorted copy of the input data.
    #[must_use]
    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    #[must_use]
    pub fn left_scale(&self) -> ValueScale {
        self.left_scale
    }

    #[must_use]
    pub fn right_scale(&self) -> ValueScale {
        self.right_scale
    }

    #[must_use]
    pub fn hover(&self) -> Option<HoverContext> {
        self.hover
    }

    /// Legend lines from the most recent draw, in plot registration order.
    #[must_use]
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    #[must_use]
    pub fn legend_text(&self, plot_id: &str) -> Option<&str> {
        self.legend
            .iter()
            .find(|entry| entry.id == plot_id)
            .map(|entry| entry.text.as_str())
    }

    /// Overlay clusters from every plot that has them.
    pub fn overlay_items(&self) -> impl Iterator<Item = &EventCluster> {
        self.plots
            .values()
            .flat_map(|plot| plot.event_clusters().iter())
    }

    #[must_use]
    pub fn visible_frame(&self) -> &RenderFrame {
        &self.visible_frame
    }

    #[must_use]
    pub fn interaction_frame(&self) -> &RenderFrame {
        &self.interaction_frame
    }

    #[must_use]
    pub fn interaction_surface(&self) -> &RasterSurface {
        &self.interaction_surface
    }

    #[must_use]
    pub fn figures(&self) -> &FigureRegistry<ChartFigure> {
        &self.figures
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Number of completed draw passes.
    #[must_use]
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    pub fn set_time_formatter(&mut self, formatter: Box<dyn TimeLabelFormatter>) {
        self.time_formatter = formatter;
    }

    /// Scale-space helpers exposed to hosts (tooltips, tests).
    #[must_use]
    pub fn view(&self) -> ChartView<'_> {
        chart_view(
            &self.data,
            &self.config,
            self.viewport,
            (self.time_scale, self.left_scale, self.right_scale),
            self.hover,
        )
    }

    #[must_use]
    pub fn into_renderer(mut self) -> R
    where
        R: Default,
    {
        std::mem::take(&mut self.renderer)
    }
}

/// Builds the per-pass view from borrowed engine fields, so `draw` can hold
/// it while mutating the frames.
pub(super) fn chart_view<'a>(
    data: &'a [DataPoint],
    config: &'a ChartConfig,
    viewport: Viewport,
    (time_scale, left_scale, right_scale): (TimeScale, ValueScale, ValueScale),
    hover: Option<HoverContext>,
) -> ChartView<'a> {
    ChartView {
        data,
        viewport,
        margin: config.margin,
        time_scale,
        left_scale,
        right_scale,
        tick: config.tick(),
        hover,
        style: &config.style,
    }
}
