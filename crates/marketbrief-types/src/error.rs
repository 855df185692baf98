use std::fmt;

/// Result type for marketbrief operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by every flow.
///
/// Every variant terminates the run: nothing is retried or recovered
/// locally. The CLI prints a single descriptive line and exits non-zero.
#[derive(Debug)]
pub enum Error {
    /// A required credential or input is missing or invalid.
    /// Carries the exact environment key (or parameter) that was missing.
    Configuration(String),

    /// The upstream API returned a non-success response, or the
    /// credential was rejected for the requested model/tool access.
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// The styling engine could not process the final text.
    Render(String),

    /// An output artifact could not be written.
    Filesystem(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(key) => write!(f, "missing configuration: {}", key),
            Error::Upstream {
                status: Some(code),
                message,
            } => write!(f, "upstream API error (HTTP {}): {}", code, message),
            Error::Upstream {
                status: None,
                message,
            } => write!(f, "upstream API error: {}", message),
            Error::Render(msg) => write!(f, "render error: {}", msg),
            Error::Filesystem(err) => write!(f, "filesystem error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Filesystem(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Filesystem(err)
    }
}
