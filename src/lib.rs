//! chart-flow-rs: retained-mode time-series charts and inbound/outbound flow
//! diagrams with color-indexed picking.
//!
//! Engines build backend-agnostic render frames; visible output goes through
//! any `Renderer`, while picking always runs on a software raster surface
//! without anti-aliasing.

pub mod api;
pub mod core;
pub mod error;
pub mod flow;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartEngine, Plot, PlotConfig, SurfaceHost};
pub use error::{ChartError, ChartResult};
pub use flow::{FlowData, FlowDiagram, FlowDiagramConfig};
