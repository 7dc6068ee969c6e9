use indexmap::IndexMap;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Largest id that fits in a 24-bit RGB triple.
pub const MAX_PICK_ID: u32 = 0x00FF_FFFF;

/// Encodes a figure id as `[red, green, blue]`, low byte first.
#[must_use]
pub fn encode_pick_id(id: u32) -> [u8; 3] {
    [
        (id & 0xFF) as u8,
        ((id >> 8) & 0xFF) as u8,
        ((id >> 16) & 0xFF) as u8,
    ]
}

/// Decodes a surface pixel back into a figure id. Alpha is ignored.
#[must_use]
pub fn decode_pick_rgba(rgba: [u8; 4]) -> u32 {
    u32::from(rgba[0]) | (u32::from(rgba[1]) << 8) | (u32::from(rgba[2]) << 16)
}

/// Color→figure lookup for one draw pass.
///
/// Ids start at 1 and increase by one per registration; id 0 is the cleared
/// background of the picking surface and never resolves. `reset` must run at
/// the start of every full redraw so no entry outlives its pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureRegistry<T> {
    figures: IndexMap<u32, T>,
    next_id: u32,
}

impl<T> Default for FigureRegistry<T> {
    fn default() -> Self {
        Self {
            figures: IndexMap::new(),
            next_id: 1,
        }
    }
}

impl<T> FigureRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.figures.clear();
        self.next_id = 1;
    }

    /// Allocates the next unique opaque color for `figure`.
    pub fn register(&mut self, figure: T) -> ChartResult<Color> {
        let id = self.next_id;
        if id > MAX_PICK_ID {
            return Err(ChartError::PickColorsExhausted(id - 1));
        }
        self.next_id += 1;
        self.figures.insert(id, figure);
        let [red, green, blue] = encode_pick_id(id);
        Ok(Color::from_rgb8(red, green, blue))
    }

    #[must_use]
    pub fn resolve_id(&self, id: u32) -> Option<&T> {
        self.figures.get(&id)
    }

    #[must_use]
    pub fn resolve_rgba(&self, rgba: [u8; 4]) -> Option<&T> {
        self.resolve_id(decode_pick_rgba(rgba))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.figures.iter().map(|(id, figure)| (*id, figure))
    }
}
