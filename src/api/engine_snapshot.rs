use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartEngine, LegendEntry};

/// Serializable view of engine state after the latest draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub time_domain: (DateTime<Utc>, DateTime<Utc>),
    pub left_domain: (f64, f64),
    pub right_domain: (f64, f64),
    pub points_len: usize,
    pub hover_index: Option<usize>,
    pub plot_ids: Vec<String>,
    pub legend: Vec<LegendEntry>,
    pub figure_count: usize,
    pub draw_count: u64,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            viewport: self.viewport,
            time_domain: self.time_scale.domain(),
            left_domain: self.left_scale.domain(),
            right_domain: self.right_scale.domain(),
            points_len: self.data.len(),
            hover_index: self.hover.and_then(|hover| hover.index),
            plot_ids: self.plots.keys().cloned().collect(),
            legend: self.legend.clone(),
            figure_count: self.figures.len(),
            draw_count: self.draw_count,
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|err| ChartError::InvalidData(format!("failed to serialize snapshot: {err}")))
    }
}
