use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::error::ChartResult;
use crate::render::Renderer;

use super::{FlowDiagram, FlowFigure};

impl<R: Renderer> FlowDiagram<R> {
    /// Resolves the node painted under `(x, y)` by the last draw pass.
    #[must_use]
    pub fn pick(&self, x: f64, y: f64) -> Option<FlowFigure> {
        let rgba = self.interaction_surface.sample(x, y)?;
        self.figures.resolve_rgba(rgba).copied()
    }

    /// Pointer-move handler. Redraws only when the hovered node changes.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<Option<FlowFigure>> {
        if self.is_disposed() {
            return Ok(None);
        }
        let figure = self.pick(x, y);
        if figure != self.hovered {
            trace!(?figure, x, y, "flow hover changed");
            self.hovered = figure;
            self.draw()?;
        }
        Ok(figure)
    }

    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        if self.is_disposed() || self.hovered.is_none() {
            return Ok(());
        }
        self.hovered = None;
        self.draw()
    }

    /// Click handler: invokes the click callback with the entity id under
    /// the pointer and returns that id. Aggregate nodes have no id.
    pub fn click(&mut self, x: f64, y: f64) -> Option<String> {
        if self.is_disposed() {
            return None;
        }
        let figure = self.pick(x, y)?;
        let id = self.node(figure)?.id()?.to_owned();
        debug!(entity = %id, direction = ?figure.direction, "flow node clicked");
        if let Some(handler) = self.on_click.as_mut() {
            handler(&id);
        }
        Some(id)
    }

    /// Size-poll timer callback; resizes only on a measured change.
    pub fn poll_resize(&mut self, now: Instant) -> ChartResult<bool> {
        if !self.resize_watch.poll_due(now) {
            return Ok(false);
        }
        let Some(measured) = self.host.measure() else {
            return Ok(false);
        };
        if self.resize_watch.observe(measured).is_none() {
            return Ok(false);
        }
        self.resize_chart()?;
        Ok(true)
    }

    pub fn on_window_resize(&mut self) -> ChartResult<bool> {
        if !self.resize_watch.is_attached() {
            return Ok(false);
        }
        if let Some(measured) = self.host.measure() {
            let _ = self.resize_watch.observe(measured);
        }
        self.resize_chart()?;
        Ok(true)
    }

    /// Re-measures the host, resizes the picking surface and redraws; the
    /// draw pass re-derives columns and the gap-adjusted vertical domain.
    pub fn resize_chart(&mut self) -> ChartResult<()> {
        let measured = self.config.size.or_else(|| self.host.measure());
        let Some(viewport) = measured.filter(|viewport| viewport.is_valid()) else {
            warn!("skipping flow resize: host has no measurable size");
            return Ok(());
        };
        self.viewport = viewport;
        self.interaction_surface.resize(viewport)?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "flow diagram resized"
        );
        self.draw()
    }

    /// Detaches resize triggers and pointer handling.
    pub fn dispose(&mut self) {
        if self.resize_watch.is_attached() {
            self.resize_watch.detach();
            self.on_click = None;
            debug!("flow diagram disposed");
        }
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        !self.resize_watch.is_attached()
    }
}

impl<R: Renderer> Drop for FlowDiagram<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}
