//! Inbound/outbound flow diagram: small-channel aggregation, staggered and
//! total-column layout, connector curves and color-indexed picking.

mod aggregate;
mod config;
mod data;
mod diagram;
mod diagram_interaction;
mod layout;
mod painter;

pub use aggregate::{DEFAULT_SMALL_CHANNEL_RATIO, FlowDiagramState, FlowNode};
pub use config::{FlowDiagramConfig, FlowDiagramStyle};
pub use data::{FlowData, FlowDirection, FlowMetric, FlowPair};
pub use diagram::{FlowClickHandler, FlowDiagram, FlowFigure};
pub use layout::{FlowBar, FlowLayout, FlowNodeLayout, TOTAL_HEADROOM, connector_curve};
