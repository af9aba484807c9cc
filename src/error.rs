use std::fmt;
use std::time::Duration;

/// Central error type of the feed engine
#[derive(Debug, Clone, PartialEq)]
pub enum FeedError {
    /// Transport failure or non-2xx response
    FetchError(String),
    /// Malformed JSON or a response of the wrong shape
    ParseError(String),
    /// The caller-level timeout expired before the fetch completed
    TimeoutError(Duration),
    /// Invalid configuration
    ConfigError(String),
}

pub type FeedResult<T> = Result<T, FeedError>;

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeedError::FetchError(msg) => write!(f, "Fetch error: {}", msg),
            FeedError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            FeedError::TimeoutError(after) => {
                write!(f, "Request timed out after {}ms", after.as_millis())
            }
            FeedError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}

impl From<toml::de::Error> for FeedError {
    fn from(e: toml::de::Error) -> Self {
        FeedError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::ParseError(e.to_string())
    }
}

impl FeedError {
    /// Whether a later attempt of the same load can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, FeedError::FetchError(_) | FeedError::TimeoutError(_))
    }

    /// Short message for a retry affordance in the UI
    pub fn user_message(&self) -> String {
        match self {
            FeedError::FetchError(_) => "Error loading media. Please try again.".to_string(),
            FeedError::ParseError(_) => "The server sent an unexpected response.".to_string(),
            FeedError::TimeoutError(_) => "Loading took too long. Please try again.".to_string(),
            FeedError::ConfigError(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(FeedError::FetchError("503".into()).is_retryable());
        assert!(FeedError::TimeoutError(Duration::from_secs(1)).is_retryable());
        assert!(!FeedError::ParseError("eof".into()).is_retryable());
        assert!(!FeedError::ConfigError("page_size".into()).is_retryable());
    }

    #[test]
    fn test_display() {
        let err = FeedError::TimeoutError(Duration::from_millis(250));
        assert_eq!(err.to_string(), "Request timed out after 250ms");
    }

    #[test]
    fn test_json_error_maps_to_parse_error() {
        let err: FeedError = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
        assert!(matches!(err, FeedError::ParseError(_)));
    }
}
