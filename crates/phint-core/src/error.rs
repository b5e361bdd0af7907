use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Malformed {format} plan: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    #[error("EXPLAIN output contains no plan")]
    EmptyPlan,

    #[error("Unsupported: {0}")]
    Unsupported(String),

    // The core crate does not do I/O, but higher layers map their I/O
    // errors into this variant for convenience.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("EXPLAIN failed: {0}")]
    Explain(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode {
            format: "json",
            message: e.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Decode {
            format: "yaml",
            message: e.to_string(),
        }
    }
}
