use super::encoder::Encoder;
use crate::error::Result;
use crate::model::{format_value, unix_now, Clock, Sample};

/// Graphite plaintext protocol: `<prefix><name> <value> <unixSeconds>\n`.
pub struct GraphiteEncoder {
    prefix: String,
    clock: Clock,
}

impl GraphiteEncoder {
    pub fn new(prefix: &str) -> Self {
        Self::with_clock(prefix, unix_now)
    }

    pub fn with_clock(prefix: &str, clock: Clock) -> Self {
        Self {
            prefix: prefix.to_string(),
            clock,
        }
    }

    fn format_sample(&self, sample: &Sample) -> String {
        format!(
            "{}{} {} {}\n",
            self.prefix,
            sample.name(),
            format_value(sample.value()),
            (self.clock)()
        )
    }
}

impl Encoder for GraphiteEncoder {
    fn encode(&self, samples: &[Sample]) -> Result<Vec<u8>> {
        Ok(samples
            .iter()
            .map(|sample| self.format_sample(sample))
            .collect::<String>()
            .into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;
    use crate::model::Labels;

    fn sample(labels: &[(&str, &str)], value: f64) -> Sample {
        Sample::new(
            labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Labels>(),
            value,
        )
    }

    fn fixed_clock() -> i64 {
        1_600_000_000
    }

    #[test]
    fn test_encode() -> Result<()> {
        #[rustfmt::skip]
        let tests = [
            ("", vec![], ""),
            ("app.", vec![sample(&[("__name__", "cpu"), ("host", "a")], 42.0)],
             "app.cpu 42 1600000000\n"),
            ("", vec![sample(&[("__name__", "load1")], 0.5), sample(&[("job", "x")], -1.0)],
             "load1 0.5 1600000000\n -1 1600000000\n"),
            ("", vec![sample(&[("__name__", "up")], f64::INFINITY)], "up +Inf 1600000000\n"),
        ];

        for (prefix, input, expected) in &tests {
            let actual = GraphiteEncoder::with_clock(prefix, fixed_clock).encode(input)?;
            assert_eq!(String::from_utf8_lossy(&actual), *expected);
        }
        Ok(())
    }

    static TICKS: AtomicI64 = AtomicI64::new(100);

    fn ticking_clock() -> i64 {
        TICKS.fetch_add(1, Ordering::SeqCst)
    }

    #[test]
    fn test_timestamp_taken_per_sample() -> Result<()> {
        let input = vec![
            sample(&[("__name__", "a")], 1.0),
            sample(&[("__name__", "b")], 2.0),
        ];

        let actual = GraphiteEncoder::with_clock("", ticking_clock).encode(&input)?;
        assert_eq!(String::from_utf8_lossy(&actual), "a 1 100\nb 2 101\n");
        Ok(())
    }
}
