use simple_error::SimpleError;
use std::fmt;
use std::path::PathBuf;

/// Error types raised while converting solver results
#[derive(Debug)]
pub enum ConvertError {
    /// Solver output does not match the expected layout. Fatal for the run.
    Format(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Sidecar descriptor exists but could not be decoded.
    Metadata(String),
    Traversal(String),
    Numeric(String),
}

impl ConvertError {
    pub fn format(msg: impl Into<String>) -> Self {
        ConvertError::Format(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ConvertError::Format(_) | ConvertError::Io { .. })
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Format(msg) => write!(f, "Format error: {}", msg),
            ConvertError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            ConvertError::Metadata(msg) => write!(f, "Port metadata error: {}", msg),
            ConvertError::Traversal(msg) => write!(f, "Traversal error: {}", msg),
            ConvertError::Numeric(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SimpleError> for ConvertError {
    fn from(err: SimpleError) -> Self {
        ConvertError::Format(err.as_str().to_string())
    }
}

impl From<regex::Error> for ConvertError {
    fn from(err: regex::Error) -> Self {
        ConvertError::Format(format!("invalid pattern: {}", err))
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Metadata(err.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use simple_error::simple_error;

    #[test]
    fn display_names_the_category() {
        let err = ConvertError::format("missing unit");
        assert_eq!(err.to_string(), "Format error: missing unit");

        let err = ConvertError::Traversal("denied".to_string());
        assert_eq!(err.to_string(), "Traversal error: denied");
    }

    #[test]
    fn simple_error_becomes_format_error() {
        let err: ConvertError = simple_error!("bad unit").into();
        assert!(matches!(err, ConvertError::Format(ref msg) if msg == "bad unit"));
        assert!(err.is_fatal());
    }

    #[test]
    fn metadata_errors_are_not_fatal() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConvertError = json_err.into();
        assert!(matches!(err, ConvertError::Metadata(_)));
        assert!(!err.is_fatal());
    }
}
