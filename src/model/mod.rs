mod labels;
mod sample;
mod timestamp;
mod value;

pub use labels::*;
pub use sample::*;
pub use timestamp::*;
pub use value::*;

pub type MetricName = String;
