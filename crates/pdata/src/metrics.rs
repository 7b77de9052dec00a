//! Metric payload: an ordered batch of named metrics, each with its data points.

use serde::{Deserialize, Serialize};

use crate::{Attributes, Timestamp};

/// A single numeric measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberDataPoint {
    /// When the measurement was taken.
    pub timestamp: Timestamp,
    /// Measured value.
    pub value: f64,
    /// Dimensions distinguishing this point from others in the same metric.
    pub attributes: Attributes,
}

impl NumberDataPoint {
    /// Creates a data point recorded now, with no attributes.
    pub fn new(value: f64) -> Self {
        Self {
            timestamp: Timestamp::now(),
            value,
            attributes: Attributes::new(),
        }
    }
}

/// A named metric stream and the data points collected for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric stream name (e.g. `"http.server.duration"`).
    pub name: String,
    /// Unit of measure (e.g. `"ms"`, `"By"`); empty when dimensionless.
    pub unit: String,
    /// Measurements collected for this metric, in recording order.
    pub data_points: Vec<NumberDataPoint>,
}

impl Metric {
    /// Creates a dimensionless metric with the given data points.
    pub fn new(name: impl Into<String>, data_points: Vec<NumberDataPoint>) -> Self {
        Self {
            name: name.into(),
            unit: String::new(),
            data_points,
        }
    }
}

batch! {
    /// A batch of metrics, as handed from one pipeline component to the next.
    Metrics { metrics: Metric }
}

impl Metrics {
    /// Returns the number of metrics in the batch.
    pub fn metric_count(&self) -> usize {
        self.len()
    }

    /// Returns the total number of data points across every metric.
    pub fn data_point_count(&self) -> usize {
        self.iter().map(|m| m.data_points.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_point_count_sums_all_metrics() {
        let metrics: Metrics = vec![
            Metric::new("requests", vec![NumberDataPoint::new(1.0), NumberDataPoint::new(2.0)]),
            Metric::new("errors", vec![NumberDataPoint::new(0.0)]),
            Metric::new("idle", Vec::new()),
        ]
        .into();

        assert_eq!(metrics.metric_count(), 3);
        assert_eq!(metrics.data_point_count(), 3);
    }

    #[test]
    fn test_empty_batch() {
        let metrics = Metrics::new();
        assert!(metrics.is_empty());
        assert_eq!(metrics.data_point_count(), 0);
    }
}
