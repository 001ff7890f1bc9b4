use serde::{ser, Serialize, Serializer};
use serde_json;
use serde_json::value::RawValue;

use super::encoder::Encoder;
use crate::error::{Error, ErrorKind, Result};
use crate::model::{format_value, Sample, SampleValue};

// [
//   {
//     "Tags": [{"Name": "__name__", "Value": "up"}, {"Name": "job", "Value": "node"}],
//     "Value": 1
//   }
// ]
#[derive(Serialize)]
struct TagRepr<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Value")]
    value: &'a str,
}

#[derive(Serialize)]
struct MetricRepr<'a> {
    // A sample without labels renders as `"Tags": null`.
    #[serde(rename = "Tags")]
    tags: Option<Vec<TagRepr<'a>>>,
    #[serde(rename = "Value", serialize_with = "serialize_value")]
    value: SampleValue,
}

impl<'a> MetricRepr<'a> {
    fn new(sample: &'a Sample) -> Self {
        let tags = sample
            .labels()
            .iter()
            .map(|(name, value)| TagRepr { name, value })
            .collect::<Vec<_>>();

        Self {
            tags: if tags.is_empty() { None } else { Some(tags) },
            value: sample.value(),
        }
    }
}

// Within this range values are written as plain decimals (`42`, `0.0000015`,
// `100000000000000000000`), outside of it in exponent form.
const MIN_PLAIN_DECIMAL: f64 = 1e-6;
const MAX_PLAIN_DECIMAL: f64 = 1e21;

fn serialize_value<S>(value: &SampleValue, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !value.is_finite() {
        return Err(ser::Error::custom(format!(
            "unsupported value: {}",
            format_value(*value)
        )));
    }

    let abs = value.abs();
    if abs == 0.0 || (abs >= MIN_PLAIN_DECIMAL && abs < MAX_PLAIN_DECIMAL) {
        RawValue::from_string(format_value(*value))
            .map_err(<S::Error as ser::Error>::custom)?
            .serialize(serializer)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub struct JSONEncoder {}

impl JSONEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Encoder for JSONEncoder {
    fn encode(&self, samples: &[Sample]) -> Result<Vec<u8>> {
        let metrics = samples.iter().map(MetricRepr::new).collect::<Vec<_>>();

        serde_json::to_vec(&metrics).map_err(|e| {
            Error::from(("JSON serialization failed", e)).with_kind(ErrorKind::Encoding)
        })
    }
}
