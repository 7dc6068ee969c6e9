use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::api::{ChartView, Plot, PlotConfig, PlotContext};
use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{Color, LinePrimitive};

const MARKER_SPACING_PX: f64 = 18.0;
const MARKER_TOP_OFFSET_PX: f64 = 10.0;

/// A discrete, non-numeric occurrence shown as an icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEvent {
    pub date: DateTime<Utc>,
    pub icon: String,
    pub label: String,
}

impl ChartEvent {
    #[must_use]
    pub fn new(date: DateTime<Utc>, icon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            date,
            icon: icon.into(),
            label: label.into(),
        }
    }
}

/// Events sharing one timestamp, laid out as a horizontal row of icons
/// centered on `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCluster {
    pub date: DateTime<Utc>,
    pub x: f64,
    pub y: f64,
    pub spacing: f64,
    pub events: SmallVec<[ChartEvent; 4]>,
}

impl EventCluster {
    /// Icon centers, left to right.
    #[must_use]
    pub fn marker_positions(&self) -> Vec<(f64, f64)> {
        let count = self.events.len();
        let start = self.x - self.spacing * count.saturating_sub(1) as f64 / 2.0;
        (0..count)
            .map(|slot| (start + self.spacing * slot as f64, self.y))
            .collect()
    }
}

/// Event markers grouped by timestamp.
///
/// Cluster layout feeds host-side icon elements, which are costly to
/// rebuild; it is only recomputed when the surface size changes.
#[derive(Debug, Clone, PartialEq)]
pub struct EventsPlot {
    config: PlotConfig,
    groups: IndexMap<DateTime<Utc>, SmallVec<[ChartEvent; 4]>>,
    clusters: Vec<EventCluster>,
    laid_out_for: Option<Viewport>,
    layout_revision: u64,
}

impl EventsPlot {
    #[must_use]
    pub fn new(config: PlotConfig, events: Vec<ChartEvent>) -> Self {
        let mut sorted = events;
        sorted.sort_by_key(|event| event.date);
        let mut groups: IndexMap<DateTime<Utc>, SmallVec<[ChartEvent; 4]>> = IndexMap::new();
        for event in sorted {
            groups.entry(event.date).or_default().push(event);
        }
        Self {
            config,
            groups,
            clusters: Vec::new(),
            laid_out_for: None,
            layout_revision: 0,
        }
    }

    /// Number of times the cluster layout was rebuilt.
    #[must_use]
    pub fn layout_revision(&self) -> u64 {
        self.layout_revision
    }

    #[must_use]
    pub fn clusters(&self) -> &[EventCluster] {
        &self.clusters
    }

    fn relayout(&mut self, view: &ChartView<'_>) {
        let y = view.plot_top() + MARKER_TOP_OFFSET_PX;
        self.clusters = self
            .groups
            .iter()
            .map(|(date, events)| EventCluster {
                date: *date,
                x: view.x_point(*date),
                y,
                spacing: MARKER_SPACING_PX,
                events: events.clone(),
            })
            .collect();
        self.laid_out_for = Some(view.viewport);
        self.layout_revision += 1;
        trace!(
            plot = %self.config.id,
            clusters = self.clusters.len(),
            revision = self.layout_revision,
            "event clusters laid out"
        );
    }
}

impl Plot for EventsPlot {
    fn config(&self) -> &PlotConfig {
        &self.config
    }

    fn draw(&mut self, ctx: &mut PlotContext<'_>) -> ChartResult<()> {
        let view = ctx.view;
        if self.laid_out_for != Some(view.viewport) {
            self.relayout(&view);
        }

        let color = self.config.color.lerp(Color::WHITE, 0.5);
        for cluster in &self.clusters {
            ctx.visible.push_line(LinePrimitive::new(
                cluster.x,
                view.plot_top(),
                cluster.x,
                view.offset(),
                1.0,
                color,
            ));
        }
        Ok(())
    }

    fn legend_text(&self, view: &ChartView<'_>, index: usize) -> String {
        let Some(point) = view.data.get(index) else {
            return String::new();
        };
        let bucket_end = point.date + view.tick;
        self.groups
            .iter()
            .filter(|(date, _)| **date >= point.date && **date < bucket_end)
            .flat_map(|(_, events)| events.iter().map(|event| event.label.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn event_clusters(&self) -> &[EventCluster] {
        &self.clusters
    }
}
