use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FlowData, FlowDirection, FlowMetric};

/// Share of the larger side total under which an entity is folded into the
/// small-channel aggregate.
pub const DEFAULT_SMALL_CHANNEL_RATIO: f64 = 0.02;

/// One laid-out entity on one side of the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub entity: FlowData,
    /// Active metric on this node's side.
    pub value: f64,
    /// Number of entities folded in; zero for regular entities.
    pub folded: usize,
}

impl FlowNode {
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        self.folded > 0
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.entity.name
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.entity.id.as_deref()
    }
}

/// Derived flow state, recomputed on every draw.
///
/// Node lists are sorted by value, largest first, and exclude zero-valued
/// entities. Small entities drop out and are summed into one
/// `"(<n> small channels)"` node per side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDiagramState {
    pub metric: FlowMetric,
    pub total_inbound: f64,
    pub total_outbound: f64,
    pub threshold: f64,
    pub outbound: Vec<FlowNode>,
    pub inbound: Vec<FlowNode>,
}

impl FlowDiagramState {
    #[must_use]
    pub fn compute(data: &[FlowData], metric: FlowMetric, small_channel_ratio: f64) -> Self {
        let total = |direction| {
            data.iter()
                .map(|entity| entity.value(metric, direction))
                .sum::<f64>()
        };
        let total_inbound = total(FlowDirection::Inbound);
        let total_outbound = total(FlowDirection::Outbound);
        let threshold = total_inbound.max(total_outbound) * small_channel_ratio;

        let outbound = side_nodes(data, metric, FlowDirection::Outbound, threshold);
        let inbound = side_nodes(data, metric, FlowDirection::Inbound, threshold);

        debug!(
            ?metric,
            total_inbound,
            total_outbound,
            threshold,
            outbound_nodes = outbound.len(),
            inbound_nodes = inbound.len(),
            "flow aggregation computed"
        );

        Self {
            metric,
            total_inbound,
            total_outbound,
            threshold,
            outbound,
            inbound,
        }
    }

    #[must_use]
    pub fn nodes(&self, direction: FlowDirection) -> &[FlowNode] {
        match direction {
            FlowDirection::Inbound => &self.inbound,
            FlowDirection::Outbound => &self.outbound,
        }
    }

    #[must_use]
    pub fn total(&self, direction: FlowDirection) -> f64 {
        match direction {
            FlowDirection::Inbound => self.total_inbound,
            FlowDirection::Outbound => self.total_outbound,
        }
    }

    #[must_use]
    pub fn max_total(&self) -> f64 {
        self.total_inbound.max(self.total_outbound)
    }

    /// Node count of the longer side.
    #[must_use]
    pub fn longest_side_count(&self) -> usize {
        self.outbound.len().max(self.inbound.len())
    }

    #[must_use]
    pub fn aggregate(&self, direction: FlowDirection) -> Option<&FlowNode> {
        self.nodes(direction).iter().find(|node| node.is_aggregate())
    }
}

fn side_nodes(
    data: &[FlowData],
    metric: FlowMetric,
    direction: FlowDirection,
    threshold: f64,
) -> Vec<FlowNode> {
    let mut nodes = Vec::with_capacity(data.len() + 1);
    let mut aggregate = FlowData::synthetic(String::new());
    let mut folded = 0usize;

    for entity in data {
        let value = entity.value(metric, direction);
        if value <= 0.0 {
            continue;
        }
        if value < threshold {
            aggregate.absorb(entity, direction);
            folded += 1;
            continue;
        }
        nodes.push(FlowNode {
            entity: entity.clone(),
            value,
            folded: 0,
        });
    }

    if folded > 0 {
        aggregate.name = format!("({folded} small channels)");
        nodes.push(FlowNode {
            value: aggregate.value(metric, direction),
            entity: aggregate,
            folded,
        });
    }

    nodes.sort_by_key(|node| Reverse(OrderedFloat(node.value)));
    nodes
}
