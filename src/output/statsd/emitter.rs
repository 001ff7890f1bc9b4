use log::{debug, warn};

use super::client::{gauge_value, StatsdClient};
use super::tags::{merge_tags, Tag};
use crate::error::{Error, ErrorKind, Result};
use crate::model::Sample;

/// Sends every sample of a batch as a DogStatsD gauge through one client.
///
/// Emission is not transactional: a failed send does not stop the batch,
/// and gauges already sent stay sent. Failures are reported together once
/// the batch is done.
pub struct StatsdEmitter {
    host: String,
    port: String,
    prefix: String,
    global_tags: Vec<Tag>,
}

impl StatsdEmitter {
    pub fn new(host: &str, port: &str, prefix: &str, global_tags: Vec<Tag>) -> Self {
        Self {
            host: host.to_string(),
            port: port.to_string(),
            prefix: prefix.to_string(),
            global_tags,
        }
    }

    pub fn emit(&self, samples: &[Sample]) -> Result<()> {
        let mut client = StatsdClient::connect(&self.host, &self.port, &self.prefix)?;

        let mut failed = 0;
        let mut first_failure: Option<Error> = None;

        for sample in samples {
            let tags = merge_tags(&self.global_tags, sample);
            if let Err(err) = client.gauge(sample.name(), gauge_value(sample.value()), &tags) {
                warn!("{}", err);
                failed += 1;
                first_failure.get_or_insert(err);
            }
        }

        debug!(
            "sent {} of {} gauges to {}",
            samples.len() - failed,
            samples.len(),
            client.target()
        );

        match first_failure {
            None => Ok(()),
            Some(err) => Err(Error::new(
                ErrorKind::Transmission,
                &format!(
                    "{} of {} gauges were not sent to {}, first failure: {}",
                    failed,
                    samples.len(),
                    client.target(),
                    err
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::UdpSocket;
    use std::time::Duration;

    use super::*;
    use crate::model::Labels;

    fn sample(labels: &[(&str, &str)], value: f64) -> Sample {
        Sample::new(
            labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Labels>(),
            value,
        )
    }

    #[test]
    fn test_emit() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let server = UdpSocket::bind("127.0.0.1:0")?;
        server.set_read_timeout(Some(Duration::from_secs(5)))?;
        let port = server.local_addr()?.port().to_string();

        let emitter = StatsdEmitter::new(
            "127.0.0.1",
            &port,
            "app.",
            vec![Tag::new("env", "prod")],
        );

        emitter.emit(&[
            sample(&[("__name__", "cpu"), ("host", "a")], 3.9),
            sample(&[("__name__", "temp")], -3.9),
            sample(&[("job", "x")], 1.0),
        ])?;

        let mut received = Vec::new();
        let mut buf = [0u8; 512];
        for _ in 0..3 {
            let n = server.recv(&mut buf)?;
            received.push(String::from_utf8_lossy(&buf[..n]).into_owned());
        }

        assert_eq!(
            received,
            vec![
                "app.cpu:3|g|#env:prod,host:a\n",
                "app.temp:-3|g|#env:prod\n",
                "app.:1|g|#env:prod,job:x\n",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_emit_unresolvable_host() {
        let emitter = StatsdEmitter::new("127.0.0.1", "99999", "", vec![]);
        match emitter.emit(&[sample(&[("__name__", "up")], 1.0)]) {
            Ok(_) => panic!("expected error"),
            Err(err) => assert_eq!(err.kind(), ErrorKind::Transmission),
        }
    }
}
