mod encoder;
mod graphite;
mod influx;
mod json;

pub use encoder::Encoder;
pub use graphite::GraphiteEncoder;
pub use influx::InfluxEncoder;
pub use json::JSONEncoder;
