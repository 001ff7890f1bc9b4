use std::collections::BTreeMap;

use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json;

use super::source::SampleSource;
use crate::error::{Error, Result};
use crate::model::{parse_value, unix_now, Sample};

// Instant query - instant vector
// {
//   "status": "success",
//   "data": {
//     "resultType": "vector",
//     "result": [
//       {
//         "metric": {"__name__": "up", "job": "node"},
//         "value": [1622104500.123, "1"]
//       }
//     ]
//   }
// }
//
// Failed query
// {
//   "status": "error",
//   "errorType": "bad_data",
//   "error": "invalid parameter \"query\": ..."
// }
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    status: String,
    data: Option<QueryData>,
    error_type: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryData {
    result_type: String,
    result: serde_json::Value,
}

#[derive(Deserialize)]
struct VectorItem {
    metric: BTreeMap<String, String>,
    value: (f64, String),
}

/// Decodes a `/api/v1/query` response body into samples. Only instant
/// vector results are accepted.
pub fn decode_query_response(body: &[u8]) -> Result<Vec<Sample>> {
    let response: QueryResponse = serde_json::from_slice(body)
        .map_err(|e| ("couldn't decode Prometheus API response", e))?;

    if response.status != "success" {
        return Err(Error::source_failure(&format!(
            "Prometheus query failed: {}: {}",
            response.error_type.as_deref().unwrap_or("unknown"),
            response.error.as_deref().unwrap_or("no error message"),
        )));
    }

    let data = response
        .data
        .ok_or("Prometheus API response carries no data")?;

    if data.result_type != "vector" {
        return Err(Error::source_failure(&format!(
            "unexpected response type '{}'",
            data.result_type
        )));
    }

    let items: Vec<VectorItem> = serde_json::from_value(data.result)
        .map_err(|e| ("couldn't decode instant vector", e))?;

    items
        .into_iter()
        .map(|item| {
            let value = parse_value(&item.value.1).ok_or_else(|| {
                Error::source_failure(&format!("invalid sample value '{}'", item.value.1))
            })?;
            Ok(Sample::new(item.metric, value))
        })
        .collect()
}

/// Runs one instant query against the Prometheus HTTP API.
pub struct PromApiSource {
    url: String,
    query: String,
    client: Client,
}

impl PromApiSource {
    pub fn new(url: &str, query: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ("couldn't build HTTP client", e))?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            query: query.to_string(),
            client,
        })
    }
}

impl SampleSource for PromApiSource {
    fn fetch(&self) -> Result<Vec<Sample>> {
        let endpoint = format!("{}/api/v1/query", self.url);
        info!("querying {} for '{}'", endpoint, self.query);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("query", self.query.clone()), ("time", unix_now().to_string())])
            .send()
            .map_err(|e| ("Prometheus API request failed", e))?;

        // Error responses (400, 422, 503) still carry a JSON body explaining why.
        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| ("couldn't read Prometheus API response", e))?;
        debug!("Prometheus API answered {} with {} bytes", status, body.len());

        decode_query_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::LabelsTrait;

    #[test]
    fn test_decode_vector() -> Result<()> {
        let body = br#"{
            "status": "success",
            "data": {
                "resultType": "vector",
                "result": [
                    {"metric": {"__name__": "up", "job": "node", "instance": "a:9100"}, "value": [1622104500.123, "1"]},
                    {"metric": {"job": "calc"}, "value": [1622104500.123, "NaN"]},
                    {"metric": {"__name__": "temp"}, "value": [1622104500.123, "-3.9"]}
                ]
            }
        }"#;

        let samples = decode_query_response(body)?;

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].labels().render(), r#"up{instance="a:9100", job="node"}"#);
        assert_eq!(samples[0].value(), 1.0);
        assert_eq!(samples[1].name(), "");
        assert!(samples[1].value().is_nan());
        assert_eq!(samples[2].value(), -3.9);
        Ok(())
    }

    #[test]
    fn test_decode_failures() {
        #[rustfmt::skip]
        let tests: [&[u8]; 5] = [
            br#"{"status": "error", "errorType": "bad_data", "error": "parse error"}"#,
            br#"{"status": "success", "data": {"resultType": "matrix", "result": []}}"#,
            br#"{"status": "success", "data": {"resultType": "scalar", "result": [1, "1"]}}"#,
            br#"{"status": "success", "data": {"resultType": "vector", "result": [{"metric": {}, "value": [1, "x"]}]}}"#,
            b"<html>not json</html>",
        ];

        for body in &tests {
            match decode_query_response(body) {
                Ok(samples) => panic!("expected error, got {:?}", samples),
                Err(err) => assert_eq!(err.kind(), ErrorKind::Source),
            }
        }
    }

    #[test]
    fn test_decode_error_message() {
        let body = br#"{"status": "error", "errorType": "bad_data", "error": "parse error"}"#;
        match decode_query_response(body) {
            Ok(_) => panic!("expected error"),
            Err(err) => assert_eq!(err.message(), "Prometheus query failed: bad_data: parse error"),
        }
    }
}
