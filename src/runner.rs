use std::io;

use log::info;

use crate::cliopt::CliOpt;
use crate::error::Result;
use crate::filter::SampleFilter;
use crate::input::{ExporterSource, PromApiSource, SampleSource};
use crate::model::Sample;
use crate::output::statsd::parse_global_tags;
use crate::output::writer::{BlobWriter, Writer};
use crate::output::{Output, OutputFormat, OutputOptions};

// Source -> Filter -> Output -> (Encoder -> Writer | StatsD)
//
// Source  == Prometheus API or exporter  ->  Vec<Sample>
// Filter  == &[Sample]                   ->  Vec<Sample>
// Encoder == &[Sample]                   ->  Vec<u8>
// Writer  == Vec<u8>                     ->  stdout
//
// Everything that can be misconfigured is checked in Pipeline::from_opt,
// before the source is contacted.

pub struct Pipeline {
    filter: SampleFilter,
    output: Output,
}

impl Pipeline {
    pub fn new(filter: SampleFilter, output: Output) -> Self {
        Self { filter, output }
    }

    pub fn from_opt(opt: &CliOpt) -> Result<Self> {
        let format: OutputFormat = opt.output_format.parse()?;
        let filter = SampleFilter::new(opt.include_regex(), opt.exclude_regex())?;
        let global_tags = parse_global_tags(&opt.global_tags())?;

        let output = Output::new(
            format,
            OutputOptions {
                metric_prefix: opt.metric_prefix.clone(),
                statsd_host: opt.statsd_host.clone(),
                statsd_port: opt.statsd_port.clone(),
                global_tags,
            },
        );

        Ok(Self::new(filter, output))
    }

    pub fn run(&self, samples: &[Sample], writer: &mut dyn Writer) -> Result<()> {
        let samples = self.filter.apply(samples);
        info!("{} samples left after filtering", samples.len());

        self.output.emit(&samples, writer)
    }
}

pub fn source_from_opt(opt: &CliOpt) -> Result<Box<dyn SampleSource>> {
    Ok(match opt.exporter_url() {
        Some(url) => Box::new(ExporterSource::new(
            url,
            opt.exporter_auth(),
            opt.insecure_skip_verify,
        )?),
        None => Box::new(PromApiSource::new(&opt.prom_url, &opt.prom_query)?),
    })
}

pub fn run(opt: &CliOpt) -> Result<()> {
    let pipeline = Pipeline::from_opt(opt)?;
    let source = source_from_opt(opt)?;

    let samples = source.fetch()?;
    info!("retrieved {} samples", samples.len());

    pipeline.run(&samples, &mut BlobWriter::new(io::stdout()))
}
