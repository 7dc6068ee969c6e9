//! Time-series chart engine: configuration, plots and the draw pipeline.

mod axis_render_frame_builder;
mod chart_config;
mod crosshair_render_frame_builder;
mod engine;
mod engine_init;
mod engine_snapshot;
mod host;
mod interaction_controller;
mod label_format;
mod plot;
mod plot_registry;
mod plots;
mod render_coordinator;
mod resize_controller;

pub use chart_config::{AxisBinding, ChartConfig, ChartStyle};
pub use engine::ChartEngine;
pub use engine_snapshot::EngineSnapshot;
pub use host::{SharedHost, SurfaceHost};
pub(crate) use host::resolve_viewport;
pub use label_format::{PatternTimeFormatter, TimeLabelFormatter, format_value};
pub use plot::{ChartFigure, ChartView, LegendEntry, Plot, PlotConfig, PlotContext};
pub use plots::{
    AreaPlot, BarPlot, ChartEvent, EDGE_BUFFER_HOURS, EventCluster, EventsPlot, LinePlot,
};
