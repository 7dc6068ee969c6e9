use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{SurfaceHost, resolve_viewport};
use crate::core::Viewport;
use crate::error::ChartResult;
use crate::interaction::{FigureRegistry, ResizeWatch};
use crate::render::{Color, RasterSurface, RenderFrame, Renderer};

use super::{FlowData, FlowDiagramConfig, FlowDiagramState, FlowDirection, FlowLayout, FlowNode};

/// What a flow picking color points at: a node index on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowFigure {
    pub index: usize,
    pub direction: FlowDirection,
}

/// Receives the entity id of a clicked node.
pub type FlowClickHandler = Box<dyn FnMut(&str)>;

/// Dual-sided inbound/outbound flow diagram with its own picking surface.
///
/// Independent of `ChartEngine`; it shares only the scale, render and
/// interaction layers.
pub struct FlowDiagram<R: Renderer = RasterSurface> {
    pub(super) host: Box<dyn SurfaceHost>,
    pub(super) renderer: R,
    pub(super) config: FlowDiagramConfig,
    pub(super) viewport: Viewport,
    pub(super) data: Vec<FlowData>,
    pub(super) state: FlowDiagramState,
    pub(super) layout: FlowLayout,
    pub(super) visible_frame: RenderFrame,
    pub(super) interaction_frame: RenderFrame,
    pub(super) interaction_surface: RasterSurface,
    pub(super) figures: FigureRegistry<FlowFigure>,
    pub(super) hovered: Option<FlowFigure>,
    pub(super) on_click: Option<FlowClickHandler>,
    pub(super) resize_watch: ResizeWatch,
    pub(super) draw_count: u64,
}

impl<R: Renderer> FlowDiagram<R> {
    /// Binds a diagram to `host`. `data` is copied.
    pub fn new(
        host: impl SurfaceHost + 'static,
        renderer: R,
        data: &[FlowData],
        config: FlowDiagramConfig,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        let viewport = resolve_viewport(&host, config.size)?;
        let data = data.to_vec();
        let state = FlowDiagramState::compute(&data, config.metric, config.small_channel_ratio);
        let layout = FlowLayout::compute(&state, viewport, &config)?;

        debug!(
            width = viewport.width,
            height = viewport.height,
            entities = data.len(),
            metric = ?config.metric,
            "flow diagram created"
        );

        Ok(Self {
            host: Box::new(host),
            renderer,
            viewport,
            data,
            state,
            layout,
            visible_frame: RenderFrame::new(viewport).with_background(config.style.background),
            interaction_frame: RenderFrame::new(viewport).with_background(Color::TRANSPARENT),
            interaction_surface: RasterSurface::new(viewport)?,
            figures: FigureRegistry::new(),
            hovered: None,
            on_click: None,
            resize_watch: ResizeWatch::new(config.resize, viewport),
            draw_count: 0,
            config,
        })
    }

    /// Installs the callback invoked by `click` with the entity id.
    pub fn set_click_handler(&mut self, handler: impl FnMut(&str) + 'static) {
        self.on_click = Some(Box::new(handler));
    }

    #[must_use]
    pub fn with_click_handler(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.set_click_handler(handler);
        self
    }

    #[must_use]
    pub fn config(&self) -> &FlowDiagramConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn data(&self) -> &[FlowData] {
        &self.data
    }

    /// Aggregation result of the latest draw (or of construction).
    #[must_use]
    pub fn state(&self) -> &FlowDiagramState {
        &self.state
    }

    #[must_use]
    pub fn layout(&self) -> &FlowLayout {
        &self.layout
    }

    #[must_use]
    pub fn hovered(&self) -> Option<FlowFigure> {
        self.hovered
    }

    /// Node behind a picked figure.
    #[must_use]
    pub fn node(&self, figure: FlowFigure) -> Option<&FlowNode> {
        self.state.nodes(figure.direction).get(figure.index)
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
    pub fn figures(&self) -> &FigureRegistry<FlowFigure> {
        &self.figures
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }
}

impl FlowDiagram<RasterSurface> {
    pub fn with_raster(
        host: impl SurfaceHost + 'static,
        data: &[FlowData],
        config: FlowDiagramConfig,
    ) -> ChartResult<Self> {
        let size = resolve_viewport(&host, config.size)?;
        Self::new(host, RasterSurface::new(size)?, data, config)
    }
}
