//! Pointer, picking and resize state shared by the chart and flow engines.

mod picking;
mod resize;

pub use picking::{FigureRegistry, MAX_PICK_ID, decode_pick_rgba, encode_pick_id};
pub use resize::{ResizeConfig, ResizeWatch};

use serde::{Deserialize, Serialize};

/// Hover state handed to every plot during one draw pass.
///
/// `index` is the data index resolved from the picking surface; it is `None`
/// when the pointer is over empty space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverContext {
    pub index: Option<usize>,
    pub pointer_x: f64,
    pub pointer_y: f64,
}

impl HoverContext {
    #[must_use]
    pub fn new(index: Option<usize>, pointer_x: f64, pointer_y: f64) -> Self {
        Self {
            index,
            pointer_x,
            pointer_y,
        }
    }
}
