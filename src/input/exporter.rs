use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;

use super::source::SampleSource;
use crate::error::{Error, Result};
use crate::model::Sample;
use crate::parser::parse_exposition;

/// Credentials for the exporter endpoint. Empty strings mean "not set".
#[derive(Debug, Clone, Default)]
pub struct ExporterAuth {
    pub user: String,
    pub password: String,
    pub header: String,
}

impl ExporterAuth {
    pub fn basic(&self) -> Option<(&str, &str)> {
        if self.user.is_empty() || self.password.is_empty() {
            None
        } else {
            Some((&self.user, &self.password))
        }
    }

    pub fn authorization(&self) -> Option<&str> {
        if self.header.is_empty() {
            None
        } else {
            Some(&self.header)
        }
    }
}

/// Scrapes an exporter endpoint serving the Prometheus text exposition format.
pub struct ExporterSource {
    url: String,
    auth: ExporterAuth,
    client: Client,
}

impl ExporterSource {
    pub fn new(url: &str, auth: ExporterAuth, insecure_skip_verify: bool) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(insecure_skip_verify)
            .build()
            .map_err(|e| ("couldn't build HTTP client", e))?;

        Ok(Self {
            url: url.to_string(),
            auth,
            client,
        })
    }
}

impl SampleSource for ExporterSource {
    fn fetch(&self) -> Result<Vec<Sample>> {
        info!("scraping exporter {}", self.url);

        let mut request = self.client.get(&self.url);
        if let Some((user, password)) = self.auth.basic() {
            request = request.basic_auth(user, Some(password));
        }
        if let Some(header) = self.auth.authorization() {
            request = request.header(AUTHORIZATION, header);
        }

        let response = request
            .send()
            .map_err(|e| ("exporter request failed", e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::source_failure(&format!(
                "exporter returned non OK HTTP response status: {}",
                status
            )));
        }

        let body = response
            .text()
            .map_err(|e| ("couldn't read exporter response", e))?;
        debug!("exporter answered with {} bytes", body.len());

        parse_exposition(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth() {
        #[rustfmt::skip]
        let tests = [
            (("", "", ""), None, None),
            (("user", "", ""), None, None),
            (("", "secret", "Bearer t"), None, Some("Bearer t")),
            (("user", "secret", ""), Some(("user", "secret")), None),
        ];

        for ((user, password, header), basic, authorization) in &tests {
            let auth = ExporterAuth {
                user: user.to_string(),
                password: password.to_string(),
                header: header.to_string(),
            };
            assert_eq!(auth.basic(), *basic);
            assert_eq!(auth.authorization(), *authorization);
        }
    }
}
