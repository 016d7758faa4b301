use std::fmt;

/// Result type for logview-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the store layer
#[derive(Debug)]
pub enum Error {
    /// Requested view does not exist. Carries a remediation hint.
    NotFound(String),

    /// View already exists and would be overwritten
    AlreadyExists(String),

    /// View file exists but could not be parsed
    Parse(String),

    /// Types layer error (view validation)
    Types(logview_types::Error),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(msg) => write!(f, "{}", msg),
            Error::AlreadyExists(name) => write!(f, "View '{}' already exists", name),
            Error::Parse(msg) => write!(f, "Failed to read view file: {}", msg),
            Error::Types(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Types(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::NotFound(_) | Error::AlreadyExists(_) | Error::Parse(_) => None,
        }
    }
}

impl From<logview_types::Error> for Error {
    fn from(err: logview_types::Error) -> Self {
        Error::Types(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
