use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    Influx,
    Graphite,
    JSON,
    SendToStatsd,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Influx => "influx",
            OutputFormat::Graphite => "graphite",
            OutputFormat::JSON => "json",
            OutputFormat::SendToStatsd => "sendtostatsd",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "influx" => Ok(OutputFormat::Influx),
            "graphite" => Ok(OutputFormat::Graphite),
            "json" => Ok(OutputFormat::JSON),
            "sendtostatsd" => Ok(OutputFormat::SendToStatsd),
            _ => Err(Error::config(&format!(
                "unknown output format '{}', expected one of influx, graphite, json, sendtostatsd",
                s
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_from_str() -> Result<()> {
        for format in &[
            OutputFormat::Influx,
            OutputFormat::Graphite,
            OutputFormat::JSON,
            OutputFormat::SendToStatsd,
        ] {
            assert_eq!(format.name().parse::<OutputFormat>()?, *format);
        }

        for name in &["", "JSON", "statsd", "influx "] {
            match name.parse::<OutputFormat>() {
                Ok(format) => panic!("expected error for {:?}, got {}", name, format),
                Err(err) => assert_eq!(err.kind(), ErrorKind::Configuration),
            }
        }
        Ok(())
    }
}
