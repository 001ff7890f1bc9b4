mod exporter;
mod promapi;
mod source;

pub use exporter::{ExporterAuth, ExporterSource};
pub use promapi::{decode_query_response, PromApiSource};
pub use source::SampleSource;
