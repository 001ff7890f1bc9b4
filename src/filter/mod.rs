mod filter;

pub use filter::{filter_samples, SampleFilter};
