use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use log::debug;

use super::tags::Tag;
use crate::error::{Error, ErrorKind, Result};
use crate::model::SampleValue;

/// Gauges are sent as integers: the fraction is cut off, not rounded
/// (3.9 -> 3, -3.9 -> -3). NaN becomes 0 and infinities saturate.
pub fn gauge_value(value: SampleValue) -> i64 {
    value.trunc() as i64
}

/// UDP DogStatsD client. The socket is released when the client is dropped.
pub struct StatsdClient {
    socket: UdpSocket,
    target: SocketAddr,
    prefix: String,
    buffer: String,
}

impl StatsdClient {
    pub fn connect(host: &str, port: &str, prefix: &str) -> Result<Self> {
        let address = format!("{}:{}", host, port);

        let target = address
            .to_socket_addrs()
            .map_err(|e| {
                Error::from((format!("couldn't resolve statsd address {}", address), e))
                    .with_kind(ErrorKind::Transmission)
            })?
            .next()
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::Transmission,
                    &format!("statsd address {} resolved to nothing", address),
                )
            })?;

        let bind_addr = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr)
            .and_then(|socket| socket.connect(target).map(|_| socket))
            .map_err(|e| {
                Error::from((format!("couldn't open statsd socket to {}", target), e))
                    .with_kind(ErrorKind::Transmission)
            })?;

        debug!("statsd client connected to {}", target);

        Ok(Self {
            socket,
            target,
            prefix: prefix.to_string(),
            buffer: String::new(),
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Sends one gauge datagram: `<prefix><name>:<value>|g|#k:v,k:v\n`.
    pub fn gauge(&mut self, name: &str, value: i64, tags: &[Tag]) -> Result<()> {
        self.buffer.clear();
        write_gauge_line(&mut self.buffer, &self.prefix, name, value, tags);

        let sent = self.socket.send(self.buffer.as_bytes()).map_err(|e| {
            Error::from((format!("couldn't send gauge {}{}", self.prefix, name), e))
                .with_kind(ErrorKind::Transmission)
        })?;

        if sent != self.buffer.len() {
            return Err(Error::new(
                ErrorKind::Transmission,
                &format!(
                    "tried to send {} bytes for gauge {}{} but only sent {}",
                    self.buffer.len(),
                    self.prefix,
                    name,
                    sent
                ),
            ));
        }

        Ok(())
    }
}

impl Drop for StatsdClient {
    fn drop(&mut self) {
        debug!("statsd client to {} closed", self.target);
    }
}

fn write_gauge_line(buffer: &mut String, prefix: &str, name: &str, value: i64, tags: &[Tag]) {
    buffer.push_str(prefix);
    buffer.push_str(name);
    buffer.push(':');
    buffer.push_str(&value.to_string());
    buffer.push_str("|g");

    if !tags.is_empty() {
        buffer.push_str("|#");

        let mut first = true;
        for tag in tags {
            if first {
                first = false;
            } else {
                buffer.push(',');
            }
            buffer.push_str(tag.key());
            buffer.push(':');
            buffer.push_str(tag.value());
        }
    }

    buffer.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_value_truncates() {
        #[rustfmt::skip]
        let tests = [
            (3.9, 3),
            (-3.9, -3),
            (0.999, 0),
            (-0.5, 0),
            (42.0, 42),
            (f64::NAN, 0),
            (f64::INFINITY, i64::MAX),
            (f64::NEG_INFINITY, i64::MIN),
        ];

        for (input, expected) in &tests {
            assert_eq!(gauge_value(*input), *expected, "value {}", input);
        }
    }

    #[test]
    fn test_write_gauge_line() {
        #[rustfmt::skip]
        let tests = [
            ("", "up", 1, vec![], "up:1|g\n"),
            ("app.", "cpu", -3, vec![Tag::new("env", "prod")], "app.cpu:-3|g|#env:prod\n"),
            ("", "x", 0, vec![Tag::new("a", "1"), Tag::new("a", "2")], "x:0|g|#a:1,a:2\n"),
            ("", "", 7, vec![], ":7|g\n"),
        ];

        for (prefix, name, value, tags, expected) in &tests {
            let mut buffer = String::new();
            write_gauge_line(&mut buffer, prefix, name, *value, tags);
            assert_eq!(buffer, *expected);
        }
    }

    #[test]
    fn test_gauge_reaches_socket() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let server = UdpSocket::bind("127.0.0.1:0")?;
        let port = server.local_addr()?.port().to_string();

        let mut client = StatsdClient::connect("127.0.0.1", &port, "pfx.")?;
        client.gauge("mem", 12, &[Tag::new("host", "a")])?;

        let mut buf = [0u8; 512];
        let n = server.recv(&mut buf)?;
        assert_eq!(&buf[..n], b"pfx.mem:12|g|#host:a\n");
        Ok(())
    }

    #[test]
    fn test_connect_to_bad_address_fails() {
        match StatsdClient::connect("127.0.0.1", "not-a-port", "") {
            Ok(client) => panic!("expected error, connected to {}", client.target()),
            Err(err) => assert_eq!(err.kind(), ErrorKind::Transmission),
        }
    }
}
