pub mod encoder;
mod format;
mod output;
pub mod statsd;
pub mod writer;

pub use format::OutputFormat;
pub use output::{Output, OutputOptions};
