pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;

pub use scale::{DEFAULT_AXIS_MAX, LinearScale, ValueScale};
pub use time_scale::{TimeScale, TimeTickPolicy};
pub use types::{DataPoint, Margin, Viewport, canonicalize_points, max_field_value};
