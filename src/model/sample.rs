use super::labels::{Labels, LabelsTrait, METRIC_NAME_LABEL};
use super::MetricName;

pub type SampleValue = f64;

/// One labeled observation. Samples carry no timestamp; encoders stamp
/// each output line themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    labels: Labels,
    value: SampleValue,
}

impl Sample {
    pub fn new(labels: Labels, value: SampleValue) -> Self {
        Self { labels, value }
    }

    pub fn with_name(name: MetricName, mut labels: Labels, value: SampleValue) -> Self {
        labels.insert(METRIC_NAME_LABEL.into(), name);
        Self { labels, value }
    }

    #[inline]
    pub fn value(&self) -> SampleValue {
        self.value
    }

    #[inline]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Metric name, or the empty string when the sample has none.
    pub fn name(&self) -> &str {
        self.labels.name().map(String::as_str).unwrap_or("")
    }
}
