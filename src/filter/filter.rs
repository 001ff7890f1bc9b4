use regex::Regex;

use crate::error::{Error, ErrorKind, Result};
use crate::model::{LabelsTrait, Sample};

/// Include/exclude patterns matched against the rendered label set of each
/// sample, e.g. `node_load1{instance="a:9100", job="node"}`.
#[derive(Debug)]
pub struct SampleFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl SampleFilter {
    /// Compiles both patterns up front. Empty patterns are treated as absent.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self> {
        Ok(Self {
            include: compile(include, "include")?,
            exclude: compile(exclude, "exclude")?,
        })
    }

    pub fn is_noop(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }

    pub fn matches(&self, sample: &Sample) -> bool {
        if self.is_noop() {
            return true;
        }

        let rendered = sample.labels().render();

        let included = match &self.include {
            Some(re) => re.is_match(&rendered),
            None => true,
        };

        let excluded = match &self.exclude {
            Some(re) => re.is_match(&rendered),
            None => false,
        };

        included && !excluded
    }

    pub fn apply(&self, samples: &[Sample]) -> Vec<Sample> {
        if self.is_noop() {
            return samples.to_vec();
        }

        samples
            .iter()
            .filter(|sample| self.matches(sample))
            .cloned()
            .collect()
    }
}

pub fn filter_samples(
    samples: &[Sample],
    include: Option<&str>,
    exclude: Option<&str>,
) -> Result<Vec<Sample>> {
    Ok(SampleFilter::new(include, exclude)?.apply(samples))
}

fn compile(pattern: Option<&str>, which: &str) -> Result<Option<Regex>> {
    match pattern {
        None | Some("") => Ok(None),
        Some(pattern) => Regex::new(pattern).map(Some).map_err(|e| {
            Error::from((format!("bad {} regex pattern '{}'", which, pattern), e))
                .with_kind(ErrorKind::Configuration)
        }),
    }
}
