use thiserror::Error;

/// Result type alias for looking glass operations
pub type Result<T> = std::result::Result<T, GlassError>;

/// Errors that can occur while validating input or talking to the backends
#[derive(Error, Debug)]
pub enum GlassError {
    /// A token or command line failed the grammar
    #[error("\"{0}\" is not valid")]
    InvalidInput(String),

    /// An address could not be turned into a reverse name
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// A router or DoH endpoint answered with a non-2xx status
    #[error("HTTP error! status: {code}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Response body, if any
        message: String,
    },

    /// HTTP request failed before a status was received
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The DoH transport rejected the query
    #[error("DNS resolution failed: {0}")]
    Dns(String),

    /// The route result was null
    #[error("no route found")]
    NoRouteFound,

    /// The route result was not a JSON object
    #[error("invalid route format")]
    InvalidRouteFormat,

    /// A DNS answer was missing class, type, name or ttl
    #[error("invalid answer format")]
    InvalidAnswerFormat,

    /// A response had the right syntax but the wrong shape
    #[error("malformed payload: {0}")]
    Payload(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`GlassError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any network activity
    InputInvalid,
    /// The upstream service failed or answered with an error status
    Upstream,
    /// The upstream answered, but not in the expected shape
    MalformedPayload,
    /// Local configuration problem
    Config,
}

impl GlassError {
    /// Classify the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) | Self::InvalidAddress(_) => ErrorKind::InputInvalid,
            Self::Api { .. } | Self::Http(_) | Self::Dns(_) => ErrorKind::Upstream,
            Self::NoRouteFound
            | Self::InvalidRouteFormat
            | Self::InvalidAnswerFormat
            | Self::Payload(_)
            | Self::Json(_) => ErrorKind::MalformedPayload,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns the HTTP status code if this is an upstream status error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if the error came from a malformed response
    #[must_use]
    pub const fn is_malformed_payload(&self) -> bool {
        matches!(self.kind(), ErrorKind::MalformedPayload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message() {
        let err = GlassError::Api {
            code: 502,
            message: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 502");
        assert_eq!(err.status_code(), Some(502));
        assert_eq!(err.kind(), ErrorKind::Upstream);
    }

    #[test]
    fn payload_errors_are_malformed() {
        assert!(GlassError::NoRouteFound.is_malformed_payload());
        assert!(GlassError::InvalidRouteFormat.is_malformed_payload());
        assert!(GlassError::InvalidAnswerFormat.is_malformed_payload());
        assert!(!GlassError::Dns("refused".into()).is_malformed_payload());
    }

    #[test]
    fn invalid_input_message() {
        let err = GlassError::InvalidInput("ping".into());
        assert_eq!(err.to_string(), "\"ping\" is not valid");
        assert_eq!(err.kind(), ErrorKind::InputInvalid);
    }
}
