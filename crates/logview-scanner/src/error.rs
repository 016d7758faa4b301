use std::fmt;

/// Result type for logview-scanner operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the scanner layer
#[derive(Debug)]
pub enum Error {
    /// Scan root missing or not a directory
    InvalidRoot(String),

    /// File pattern did not compile as a regex
    Pattern(String),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRoot(msg) => write!(f, "Invalid scan root: {}", msg),
            Error::Pattern(msg) => write!(f, "Invalid regex pattern: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::InvalidRoot(_) | Error::Pattern(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
