use tracing::trace;

use crate::error::ChartResult;
use crate::interaction::HoverContext;
use crate::render::Renderer;

use super::{ChartEngine, ChartFigure};

impl<R: Renderer> ChartEngine<R> {
    /// Resolves what the last draw pass painted under `(x, y)`.
    ///
    /// `None` means empty space, which is not an error.
    #[must_use]
    pub fn pick(&self, x: f64, y: f64) -> Option<&ChartFigure> {
        let rgba = self.interaction_surface.sample(x, y)?;
        self.figures.resolve_rgba(rgba)
    }

    /// Pointer-move handler: picks the data index under the pointer, then
    /// redraws everything with that hover state.
    ///
    /// Returns the resolved index. Ignored once the engine is disposed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<Option<usize>> {
        if self.is_disposed() {
            return Ok(None);
        }
        let index = self.pick(x, y).map(|figure| figure.index);
        if self.hover.and_then(|hover| hover.index) != index {
            trace!(?index, x, y, "chart hover changed");
        }
        self.hover = Some(HoverContext::new(index, x, y));
        self.draw()?;
        Ok(index)
    }

    /// Pointer-leave handler: redraws without hover so legends fall back to
    /// the most recent data point.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        if self.is_disposed() {
            return Ok(());
        }
        self.hover = None;
        self.draw()
    }
}
