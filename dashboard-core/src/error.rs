//! Failure kinds a single city fetch can end in.

use thiserror::Error;

/// Every way a fetch can fail, normalized at the client boundary.
///
/// `Display` is the human-readable message surfaced by the dashboard.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch weather data")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    #[error("{info}")]
    Provider { info: String },

    #[error("Failed to parse weather data")]
    Parse { detail: String },
}

impl FetchError {
    /// Short tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::HttpStatus { .. } => "http_status",
            Self::Provider { .. } => "provider",
            Self::Parse { .. } => "parse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(FetchError::HttpStatus { status: 500 }.to_string(), "HTTP error! status: 500");
        assert_eq!(
            FetchError::Provider { info: "Invalid API key".into() }.to_string(),
            "Invalid API key"
        );
        assert_eq!(
            FetchError::Parse { detail: "expected value".into() }.to_string(),
            "Failed to parse weather data"
        );
    }
}
