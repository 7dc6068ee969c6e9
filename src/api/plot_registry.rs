use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartEngine, Plot};

impl<R: Renderer> ChartEngine<R> {
    /// Registers a plot under its config id. Plots draw in registration order.
    pub fn add_plot(&mut self, plot: Box<dyn Plot>) -> ChartResult<()> {
        plot.config().validate()?;
        let plot_id = plot.id().to_owned();
        if self.plots.contains_key(&plot_id) {
            return Err(ChartError::InvalidConfig(format!(
                "plot with id `{plot_id}` is already registered"
            )));
        }
        debug!(plot = %plot_id, key = %plot.config().key, "plot registered");
        self.plots.insert(plot_id, plot);
        Ok(())
    }

    /// Unregisters a plot by id. Returns `true` when removed.
    pub fn remove_plot(&mut self, plot_id: &str) -> bool {
        self.plots.shift_remove(plot_id).is_some()
    }

    #[must_use]
    pub fn has_plot(&self, plot_id: &str) -> bool {
        self.plots.contains_key(plot_id)
    }

    #[must_use]
    pub fn plot_count(&self) -> usize {
        self.plots.len()
    }

    pub fn plot_ids(&self) -> impl Iterator<Item = &str> {
        self.plots.keys().map(String::as_str)
    }
}
