use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, Viewport};
use crate::error::ChartResult;

use super::{FlowDiagramConfig, FlowDiagramState, FlowDirection};

/// Headroom above the larger side total.
pub const TOTAL_HEADROOM: f64 = 1.02;

const CURVE_SEGMENTS: usize = 24;
const LABEL_GAP_PX: f64 = 4.0;
const TOTAL_LABEL_OFFSET_PX: f64 = 6.0;

/// Axis-aligned bar in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowBar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FlowBar {
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Geometry of one node: its staggered bar, its segment in the total
/// column and the connector between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNodeLayout {
    pub direction: FlowDirection,
    pub index: usize,
    pub stagger: FlowBar,
    pub total: FlowBar,
    pub connector: Vec<(f64, f64)>,
    pub label_anchor: (f64, f64),
}

/// Pixel layout for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLayout {
    /// Upper bound of the vertical value domain.
    pub domain_max: f64,
    /// Effective staggering gap after clamping to the available height.
    pub vertical_gap: f64,
    pub outbound: Vec<FlowNodeLayout>,
    pub inbound: Vec<FlowNodeLayout>,
    pub outbound_total_anchor: (f64, f64),
    pub inbound_total_anchor: (f64, f64),
}

struct Columns {
    outbound_stagger: f64,
    outbound_total: f64,
    inbound_total: f64,
    inbound_stagger: f64,
}

impl FlowLayout {
    pub fn compute(
        state: &FlowDiagramState,
        viewport: Viewport,
        config: &FlowDiagramConfig,
    ) -> ChartResult<Self> {
        let top = config.margin.top;
        let plot_height =
            (f64::from(viewport.height) - config.margin.top - config.margin.bottom).max(0.0);
        let longest = state.longest_side_count();
        let vertical_gap = effective_gap(config.vertical_gap, longest, plot_height);
        let domain_max = domain_max(state.max_total(), vertical_gap, longest, plot_height);
        let scale = LinearScale::new((0.0, domain_max), (0.0, plot_height))?;

        let bar_width = config.bar_width;
        let left = config.margin.left;
        let right = (f64::from(viewport.width) - config.margin.right).max(left);
        let center = (left + right) / 2.0;
        let columns = Columns {
            outbound_stagger: left,
            outbound_total: center - config.center_gap / 2.0 - bar_width,
            inbound_total: center + config.center_gap / 2.0,
            inbound_stagger: right - bar_width,
        };

        let side = |direction| {
            let mut running = 0.0;
            state
                .nodes(direction)
                .iter()
                .enumerate()
                .map(|(index, node)| {
                    let y = top + scale.map(running);
                    let height = scale.span_px(node.value);
                    running += node.value;
                    node_layout(
                        direction,
                        index,
                        y,
                        height,
                        index as f64 * vertical_gap,
                        bar_width,
                        &columns,
                    )
                })
                .collect::<Vec<_>>()
        };
        let outbound = side(FlowDirection::Outbound);
        let inbound = side(FlowDirection::Inbound);

        let label_y = top - TOTAL_LABEL_OFFSET_PX;
        Ok(Self {
            domain_max,
            vertical_gap,
            outbound,
            inbound,
            outbound_total_anchor: (columns.outbound_total + bar_width / 2.0, label_y),
            inbound_total_anchor: (columns.inbound_total + bar_width / 2.0, label_y),
        })
    }

    #[must_use]
    pub fn nodes(&self, direction: FlowDirection) -> &[FlowNodeLayout] {
        match direction {
            FlowDirection::Inbound => &self.inbound,
            FlowDirection::Outbound => &self.outbound,
        }
    }

    #[must_use]
    pub fn total_anchor(&self, direction: FlowDirection) -> (f64, f64) {
        match direction {
            FlowDirection::Inbound => self.inbound_total_anchor,
            FlowDirection::Outbound => self.outbound_total_anchor,
        }
    }
}

/// Keeps the summed stagger gaps within half of the plot height.
fn effective_gap(requested: f64, longest: usize, plot_height: f64) -> f64 {
    if longest == 0 {
        return requested;
    }
    requested.min(plot_height / 2.0 / longest as f64)
}

/// `max_total * TOTAL_HEADROOM` plus the value-space equivalent of the
/// stagger gaps, solved so the gaps fit the remaining pixel height.
fn domain_max(max_total: f64, gap: f64, longest: usize, plot_height: f64) -> f64 {
    if !max_total.is_finite() || max_total <= 0.0 {
        return 1.0;
    }
    let base = max_total * TOTAL_HEADROOM;
    let gap_px = gap * longest as f64;
    if plot_height <= 0.0 || gap_px >= plot_height {
        return base;
    }
    base * plot_height / (plot_height - gap_px)
}

fn node_layout(
    direction: FlowDirection,
    index: usize,
    y: f64,
    height: f64,
    stagger_offset: f64,
    bar_width: f64,
    columns: &Columns,
) -> FlowNodeLayout {
    let (stagger_x, total_x) = match direction {
        FlowDirection::Outbound => (columns.outbound_stagger, columns.outbound_total),
        FlowDirection::Inbound => (columns.inbound_stagger, columns.inbound_total),
    };
    let stagger = FlowBar {
        x: stagger_x,
        y: y + stagger_offset,
        width: bar_width,
        height,
    };
    let total = FlowBar {
        x: total_x,
        y,
        width: bar_width,
        height,
    };

    let (start, end, label_anchor) = match direction {
        FlowDirection::Outbound => (
            (stagger.x + bar_width, stagger.center().1),
            (total.x, total.center().1),
            (stagger.x + bar_width + LABEL_GAP_PX, stagger.center().1),
        ),
        FlowDirection::Inbound => (
            (stagger.x, stagger.center().1),
            (total.x + bar_width, total.center().1),
            (stagger.x - LABEL_GAP_PX, stagger.center().1),
        ),
    };
    let connector = if index == 0 {
        vec![start, end]
    } else {
        connector_curve(start, end)
    };

    FlowNodeLayout {
        direction,
        index,
        stagger,
        total,
        connector,
        label_anchor,
    }
}

/// Cubic ease between two points with both control points on the
/// horizontal midpoint, flattened to a polyline.
#[must_use]
pub fn connector_curve(start: (f64, f64), end: (f64, f64)) -> Vec<(f64, f64)> {
    let mid_x = (start.0 + end.0) / 2.0;
    let controls = [start, (mid_x, start.1), (mid_x, end.1), end];
    (0..=CURVE_SEGMENTS)
        .map(|step| cubic_point(controls, step as f64 / CURVE_SEGMENTS as f64))
        .collect()
}

fn cubic_point(controls: [(f64, f64); 4], t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let weights = [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t];
    controls
        .iter()
        .zip(weights)
        .fold((0.0, 0.0), |(x, y), (point, weight)| {
            (x + point.0 * weight, y + point.1 * weight)
        })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{FlowLayout, connector_curve, domain_max};
    use crate::core::Viewport;
    use crate::flow::{FlowData, FlowDiagramConfig, FlowDiagramState, FlowDirection, FlowMetric};

    #[test]
    fn gap_allowance_extends_domain() {
        assert_relative_eq!(domain_max(100.0, 0.0, 3, 200.0), 102.0);
        assert_relative_eq!(domain_max(100.0, 10.0, 10, 200.0), 204.0);
        assert_relative_eq!(domain_max(0.0, 10.0, 0, 200.0), 1.0);
    }

    #[test]
    fn curve_keeps_endpoints_and_midpoint() {
        let curve = connector_curve((0.0, 10.0), (100.0, 50.0));
        assert_eq!(curve.first(), Some(&(0.0, 10.0)));
        assert_eq!(curve.last(), Some(&(100.0, 50.0)));
        let mid = curve[curve.len() / 2];
        assert_relative_eq!(mid.0, 50.0, epsilon = 1e-9);
        assert_relative_eq!(mid.1, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn first_node_connector_is_straight_and_total_column_is_contiguous() {
        let data = vec![
            FlowData::new("a", "a").with_amount(0.0, 600.0),
            FlowData::new("b", "b").with_amount(0.0, 400.0),
        ];
        let config = FlowDiagramConfig::default();
        let state = FlowDiagramState::compute(&data, FlowMetric::Amount, 0.02);
        let layout =
            FlowLayout::compute(&state, Viewport::new(600, 300), &config).expect("layout");

        let nodes = layout.nodes(FlowDirection::Outbound);
        assert_eq!(nodes[0].connector.len(), 2);
        assert!(nodes[1].connector.len() > 2);
        assert_relative_eq!(nodes[0].total.bottom(), nodes[1].total.y, epsilon = 1e-9);
        assert_relative_eq!(
            nodes[1].stagger.y - nodes[1].total.y,
            layout.vertical_gap,
            epsilon = 1e-9
        );
    }
}
