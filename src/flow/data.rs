use serde::{Deserialize, Serialize};

/// One inbound/outbound measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowPair {
    #[serde(default)]
    pub inbound: f64,
    #[serde(default)]
    pub outbound: f64,
}

impl FlowPair {
    #[must_use]
    pub const fn new(inbound: f64, outbound: f64) -> Self {
        Self { inbound, outbound }
    }

    /// Side of the pair for `direction`. Negative and non-finite values read
    /// as zero.
    #[must_use]
    pub fn get(self, direction: FlowDirection) -> f64 {
        let value = match direction {
            FlowDirection::Inbound => self.inbound,
            FlowDirection::Outbound => self.outbound,
        };
        if value.is_finite() { value.max(0.0) } else { 0.0 }
    }

    fn set(&mut self, direction: FlowDirection, value: f64) {
        match direction {
            FlowDirection::Inbound => self.inbound = value,
            FlowDirection::Outbound => self.outbound = value,
        }
    }
}

/// Which metric pair drives one diagram instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowMetric {
    #[default]
    Amount,
    Revenue,
    Count,
}

/// Side of the diagram an entity is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    Inbound,
    Outbound,
}

impl FlowDirection {
    pub const ALL: [Self; 2] = [Self::Outbound, Self::Inbound];
}

/// One network entity with paired metrics.
///
/// `id` is `None` for synthetic aggregate nodes, which never reach click
/// callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowData {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub amount: FlowPair,
    #[serde(default)]
    pub revenue: FlowPair,
    #[serde(default)]
    pub count: FlowPair,
}

impl FlowData {
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Some(id.into()),
            amount: FlowPair::default(),
            revenue: FlowPair::default(),
            count: FlowPair::default(),
        }
    }

    pub(crate) fn synthetic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            amount: FlowPair::default(),
            revenue: FlowPair::default(),
            count: FlowPair::default(),
        }
    }

    #[must_use]
    pub fn with_amount(mut self, inbound: f64, outbound: f64) -> Self {
        self.amount = FlowPair::new(inbound, outbound);
        self
    }

    #[must_use]
    pub fn with_revenue(mut self, inbound: f64, outbound: f64) -> Self {
        self.revenue = FlowPair::new(inbound, outbound);
        self
    }

    #[must_use]
    pub fn with_count(mut self, inbound: f64, outbound: f64) -> Self {
        self.count = FlowPair::new(inbound, outbound);
        self
    }

    #[must_use]
    pub fn pair(&self, metric: FlowMetric) -> FlowPair {
        match metric {
            FlowMetric::Amount => self.amount,
            FlowMetric::Revenue => self.revenue,
            FlowMetric::Count => self.count,
        }
    }

    #[must_use]
    pub fn value(&self, metric: FlowMetric, direction: FlowDirection) -> f64 {
        self.pair(metric).get(direction)
    }

    fn pair_mut(&mut self, metric: FlowMetric) -> &mut FlowPair {
        match metric {
            FlowMetric::Amount => &mut self.amount,
            FlowMetric::Revenue => &mut self.revenue,
            FlowMetric::Count => &mut self.count,
        }
    }

    /// Adds every metric of `other` on `direction` into `self`.
    pub(crate) fn absorb(&mut self, other: &Self, direction: FlowDirection) {
        for metric in [FlowMetric::Amount, FlowMetric::Revenue, FlowMetric::Count] {
            let add = other.value(metric, direction);
            let pair = self.pair_mut(metric);
            let current = pair.get(direction);
            pair.set(direction, current + add);
        }
    }
}
