//! Converts one batch of Prometheus samples, taken from the query API or
//! scraped from an exporter, into JSON, Graphite or Influx line protocol on
//! stdout, or into DogStatsD gauges.
pub mod cliopt;
pub mod error;
pub mod filter;
pub mod input;
pub mod model;
pub mod output;
pub mod parser;
pub mod runner;
