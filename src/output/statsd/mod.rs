mod client;
mod emitter;
mod tags;

pub use client::{gauge_value, StatsdClient};
pub use emitter::StatsdEmitter;
pub use tags::{merge_tags, parse_global_tags, split_global_tags, Tag};
