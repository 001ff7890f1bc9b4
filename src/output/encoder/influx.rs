use log::debug;

use super::encoder::Encoder;
use crate::error::Result;
use crate::model::{format_value, unix_now, Clock, LabelsTrait, Sample};

/// Influx line protocol: `<prefix><name>[,<label>=<value>]* value=<value> <unixSeconds>\n`.
///
/// Labels are copied verbatim, without line protocol escaping. To keep the
/// output parseable, label fragments containing a newline or more than one
/// `=` are skipped, and a line that still does not split into exactly three
/// space separated fields (e.g. because of a space in a label value) is
/// dropped. Bad input never fails the batch.
pub struct InfluxEncoder {
    prefix: String,
    clock: Clock,
}

impl InfluxEncoder {
    pub fn new(prefix: &str) -> Self {
        Self::with_clock(prefix, unix_now)
    }

    pub fn with_clock(prefix: &str, clock: Clock) -> Self {
        Self {
            prefix: prefix.to_string(),
            clock,
        }
    }

    fn format_sample(&self, sample: &Sample) -> Option<String> {
        let mut metric = format!("{}{}", self.prefix, sample.name());

        for (label, value) in sample.labels().tags() {
            let fragment = format!(",{}={}", label, value);
            if fragment.contains('\n') || fragment.matches('=').count() != 1 {
                debug!("influx: skipping label fragment {:?} of {}", fragment, sample.name());
                continue;
            }
            metric.push_str(&fragment);
        }

        let mut line = metric.replace('\n', "");
        line.push_str(&format!(
            " value={} {}\n",
            format_value(sample.value()),
            (self.clock)()
        ));

        if line.split(' ').count() != 3 {
            debug!("influx: dropping malformed line {:?}", line);
            return None;
        }

        Some(line)
    }
}

impl Encoder for InfluxEncoder {
    fn encode(&self, samples: &[Sample]) -> Result<Vec<u8>> {
        let lines = samples
            .iter()
            .filter_map(|sample| self.format_sample(sample))
            .collect::<Vec<_>>();

        if lines.len() < samples.len() {
            debug!(
                "influx: dropped {} of {} samples",
                samples.len() - lines.len(),
                samples.len()
            );
        }

        Ok(lines.concat().into_bytes())
    }
}
