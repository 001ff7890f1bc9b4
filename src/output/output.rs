use log::debug;

use super::encoder::{Encoder, GraphiteEncoder, InfluxEncoder, JSONEncoder};
use super::format::OutputFormat;
use super::statsd::{StatsdEmitter, Tag};
use super::writer::Writer;
use crate::error::{Error, ErrorKind, Result};
use crate::model::Sample;

pub struct OutputOptions {
    pub metric_prefix: String,
    pub statsd_host: String,
    pub statsd_port: String,
    pub global_tags: Vec<Tag>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            metric_prefix: String::new(),
            statsd_host: String::from("localhost"),
            statsd_port: String::from("8125"),
            global_tags: vec![],
        }
    }
}

/// Routes a batch to exactly one encoder. Text formats end up in the
/// writer as a single blob; `sendtostatsd` writes nothing there.
pub enum Output {
    Text(OutputFormat, Box<dyn Encoder>),
    Statsd(StatsdEmitter),
}

impl Output {
    pub fn new(format: OutputFormat, options: OutputOptions) -> Self {
        let prefix = options.metric_prefix.as_str();
        match format {
            OutputFormat::Influx => Output::Text(format, Box::new(InfluxEncoder::new(prefix))),
            OutputFormat::Graphite => Output::Text(format, Box::new(GraphiteEncoder::new(prefix))),
            OutputFormat::JSON => Output::Text(format, Box::new(JSONEncoder::new())),
            OutputFormat::SendToStatsd => Output::Statsd(StatsdEmitter::new(
                &options.statsd_host,
                &options.statsd_port,
                prefix,
                options.global_tags,
            )),
        }
    }

    pub fn emit(&self, samples: &[Sample], writer: &mut dyn Writer) -> Result<()> {
        match self {
            Output::Text(format, encoder) => {
                let buf = encoder.encode(samples)?;
                debug!("{}: encoded {} samples into {} bytes", format, samples.len(), buf.len());

                writer.write(&buf).map_err(|e| {
                    Error::from(("writer failed", e)).with_kind(ErrorKind::Output)
                })
            }
            Output::Statsd(emitter) => emitter.emit(samples),
        }
    }
}
