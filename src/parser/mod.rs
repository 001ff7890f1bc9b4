mod common;
mod exposition;
mod result;
mod string;

pub use exposition::parse_exposition;
pub use result::{IResult, ParseError, Span};
