use std::time::Instant;

use tracing::{debug, warn};

use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartEngine;
use super::engine_init::{plot_height, time_range};

impl<R: Renderer> ChartEngine<R> {
    /// Size-poll timer callback.
    ///
    /// Re-measures the host at most once per configured interval and resizes
    /// only when the size changed. Returns whether a resize happened.
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

    /// Window-resize callback; always re-measures and redraws.
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

    /// Re-derives scale ranges from the host size, resizes both surfaces and
    /// redraws. A size override in the config pins the size.
    pub fn resize_chart(&mut self) -> ChartResult<()> {
        let measured = self.config.size.or_else(|| self.host.measure());
        let Some(viewport) = measured.filter(|viewport| viewport.is_valid()) else {
            warn!("skipping resize: host has no measurable size");
            return Ok(());
        };

        self.viewport = viewport;
        self.time_scale
            .set_range(time_range(&self.config, viewport))?;
        let height = plot_height(&self.config, viewport);
        self.left_scale.set_height_px(height)?;
        self.right_scale.set_height_px(height)?;
        self.interaction_surface.resize(viewport)?;

        debug!(
            width = viewport.width,
            height = viewport.height,
            "chart resized"
        );
        self.draw()
    }

    /// Detaches the resize poll and window listener. Pointer handlers become
    /// no-ops. Explicit `draw` calls still work.
    pub fn dispose(&mut self) {
        if self.resize_watch.is_attached() {
            self.resize_watch.detach();
            debug!("chart engine disposed");
        }
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        !self.resize_watch.is_attached()
    }
}

impl<R: Renderer> Drop for ChartEngine<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}
