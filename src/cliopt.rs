use structopt::StructOpt;

use crate::input::ExporterAuth;
use crate::output::statsd::split_global_tags;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "promconv",
    about = "Converts Prometheus metrics into JSON, Graphite, Influx or StatsD gauges"
)]
pub struct CliOpt {
    /// Prometheus exporter URL to pull metrics from. Takes precedence over --prom-url.
    #[structopt(long = "exporter-url")]
    pub exporter_url: Option<String>,

    /// Prometheus exporter basic auth user.
    #[structopt(long = "exporter-user", env = "EXPORTER_USER", hide_env_values = true)]
    pub exporter_user: Option<String>,

    /// Prometheus exporter basic auth password.
    #[structopt(long = "exporter-password", env = "EXPORTER_PASSWORD", hide_env_values = true)]
    pub exporter_password: Option<String>,

    /// Prometheus exporter Authorization header.
    #[structopt(long = "exporter-authorization", env = "EXPORTER_HEADER", hide_env_values = true)]
    pub exporter_authorization: Option<String>,

    /// Prometheus API URL.
    #[structopt(long = "prom-url", default_value = "http://localhost:9090")]
    pub prom_url: String,

    /// Prometheus API query string.
    #[structopt(long = "prom-query", default_value = "up")]
    pub prom_query: String,

    /// Output format: influx, graphite, json or sendtostatsd.
    #[structopt(long = "output-format", default_value = "influx")]
    pub output_format: String,

    /// Regex to include metrics, matched against the metric in Prometheus exposition format.
    #[structopt(long = "include-regex")]
    pub include_regex: Option<String>,

    /// Regex to exclude metrics, applied after --include-regex.
    #[structopt(long = "exclude-regex")]
    pub exclude_regex: Option<String>,

    /// StatsD hostname for sendtostatsd.
    #[structopt(long = "statsd-host", default_value = "localhost")]
    pub statsd_host: String,

    /// StatsD port for sendtostatsd.
    #[structopt(long = "statsd-port", default_value = "8125")]
    pub statsd_port: String,

    /// Metric name prefix. Not applied to json output.
    #[structopt(long = "metric-prefix", default_value = "")]
    pub metric_prefix: String,

    /// Tags added to every StatsD gauge, e.g. foo:bar,baz:qux.
    #[structopt(long = "global-tags", default_value = "")]
    pub global_tags: String,

    /// Skip TLS peer verification when scraping the exporter.
    #[structopt(long = "insecure-skip-verify")]
    pub insecure_skip_verify: bool,

    /// Log level for messages on stderr. RUST_LOG overrides it.
    #[structopt(long = "log-level", default_value = "warn")]
    pub log_level: log::LevelFilter,
}

impl CliOpt {
    pub fn include_regex(&self) -> Option<&str> {
        self.include_regex.as_deref()
    }

    pub fn exclude_regex(&self) -> Option<&str> {
        self.exclude_regex.as_deref()
    }

    pub fn global_tags(&self) -> Vec<String> {
        split_global_tags(&self.global_tags)
    }

    pub fn exporter_url(&self) -> Option<&str> {
        self.exporter_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn exporter_auth(&self) -> ExporterAuth {
        ExporterAuth {
            user: self.exporter_user.clone().unwrap_or_default(),
            password: self.exporter_password.clone().unwrap_or_default(),
            header: self.exporter_authorization.clone().unwrap_or_default(),
        }
    }
}
