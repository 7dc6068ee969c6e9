mod area;
mod bar;
mod events;
mod line;

pub use area::{AreaPlot, EDGE_BUFFER_HOURS};
pub use bar::BarPlot;
pub use events::{ChartEvent, EventCluster, EventsPlot};
pub use line::LinePlot;
