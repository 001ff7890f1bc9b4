use std::{error, fmt};

/// Broad failure classes. Every kind is fatal for the current run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad regex, unknown output format, malformed global tag.
    Configuration,
    /// The metrics source failed or returned something unusable.
    Source,
    /// A batch could not be serialized.
    Encoding,
    /// StatsD client setup or gauge sends failed.
    Transmission,
    /// Writing the encoded batch failed.
    Output,
}

impl ErrorKind {
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Source => "source error",
            ErrorKind::Encoding => "encoding error",
            ErrorKind::Transmission => "transmission error",
            ErrorKind::Output => "output error",
        };
        write!(f, "{}", name)
    }
}

pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn error::Error>>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: &str) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn config(message: &str) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn source_failure(message: &str) -> Self {
        Self::new(ErrorKind::Source, message)
    }

    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unexpected {}: {}", self.kind, self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "{}. Source error: {}", self.message, err),
            None => write!(f, "{}", self.message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.source {
            Some(ref err) => Some(&**err),
            None => None,
        }
    }
}

// Conversions below default to ErrorKind::Source; call sites that mean
// something else re-tag with `with_kind`.

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self {
            kind: ErrorKind::Source,
            message,
            source: None,
        }
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self {
            kind: ErrorKind::Source,
            message: message.into(),
            source: None,
        }
    }
}

impl<E: error::Error + 'static> From<(String, E)> for Error {
    fn from((message, err): (String, E)) -> Self {
        Self {
            kind: ErrorKind::Source,
            message,
            source: Some(Box::new(err)),
        }
    }
}

impl<E: error::Error + 'static> From<(&str, E)> for Error {
    fn from((message, err): (&str, E)) -> Self {
        Self {
            kind: ErrorKind::Source,
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        format!("{}", err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = Error::from(("write failed", io_err)).with_kind(ErrorKind::Output);

        assert_eq!(err.kind(), ErrorKind::Output);
        assert_eq!(format!("{}", err), "write failed. Source error: boom");
    }

    #[test]
    fn test_every_kind_exits_with_two() {
        #[rustfmt::skip]
        let kinds = [
            ErrorKind::Configuration,
            ErrorKind::Source,
            ErrorKind::Encoding,
            ErrorKind::Transmission,
            ErrorKind::Output,
        ];

        for kind in &kinds {
            assert_eq!(kind.exit_code(), 2, "kind {}", kind);
        }
    }
}
