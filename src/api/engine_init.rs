use chrono::Utc;
use indexmap::IndexMap;
use tracing::debug;

use crate::core::{DataPoint, TimeScale, ValueScale, Viewport, canonicalize_points};
use crate::error::ChartResult;
use crate::interaction::{FigureRegistry, ResizeWatch};
use crate::render::{Color, RasterSurface, RenderFrame, Renderer};

use super::host::resolve_viewport;
use super::{ChartConfig, ChartEngine, PatternTimeFormatter, SurfaceHost};

impl<R: Renderer> ChartEngine<R> {
    /// Binds a new engine to `host`.
    ///
    /// `data` is copied; later changes to the caller's slice never reach the
    /// engine. When the data set changes, build a new engine.
    pub fn new(
        host: impl SurfaceHost + 'static,
        renderer: R,
        data: &[DataPoint],
        config: ChartConfig,
    ) -> ChartResult<Self> {
        let config = config.normalized()?;
        let viewport = resolve_viewport(&host, config.size)?;
        let data = canonicalize_points(data, Utc::now());

        let time_scale = TimeScale::new(config.from, config.to, time_range(&config, viewport))?;
        let plot_height = plot_height(&config, viewport);
        let left_scale = ValueScale::new(plot_height, config.left_padding)?;
        let right_scale = ValueScale::new(plot_height, config.right_padding)?;

        debug!(
            width = viewport.width,
            height = viewport.height,
            points = data.len(),
            "chart engine created"
        );

        Ok(Self {
            host: Box::new(host),
            renderer,
            viewport,
            data,
            time_scale,
            left_scale,
            right_scale,
            plots: IndexMap::new(),
            visible_frame: RenderFrame::new(viewport).with_background(config.style.background),
            interaction_frame: RenderFrame::new(viewport).with_background(Color::TRANSPARENT),
            interaction_surface: RasterSurface::new(viewport)?,
            figures: FigureRegistry::new(),
            hover: None,
            legend: Vec::new(),
            time_formatter: Box::new(PatternTimeFormatter::default()),
            resize_watch: ResizeWatch::new(config.resize, viewport),
            draw_count: 0,
            config,
        })
    }
}

impl ChartEngine<RasterSurface> {
    /// Engine whose visible output is an in-memory raster surface.
    pub fn with_raster(
        host: impl SurfaceHost + 'static,
        data: &[DataPoint],
        config: ChartConfig,
    ) -> ChartResult<Self> {
        let size = resolve_viewport(&host, config.size)?;
        Self::new(host, RasterSurface::new(size)?, data, config)
    }
}

pub(super) fn time_range(config: &ChartConfig, viewport: Viewport) -> (f64, f64) {
    let left = config.margin.left;
    let right = (f64::from(viewport.width) - config.margin.right).max(left);
    (left, right)
}

pub(super) fn plot_height(config: &ChartConfig, viewport: Viewport) -> f64 {
    (f64::from(viewport.height) - config.margin.top - config.margin.bottom).max(0.0)
}
