use thiserror::Error;

/// Errors returned by the places search client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("could not connect to the places service: {0}")]
    Connection(#[from] reqwest::Error),

    /// A 2xx response whose body is not the expected JSON envelope.
    #[error("malformed response from the places service: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The API answered with a non-2xx status.
    ///
    /// `message` is empty when the error body is missing or not JSON.
    #[error("Foursquare API error: {status} {reason}. {message}")]
    Service {
        status: u16,
        reason: String,
        message: String,
    },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl PlacesError {
    /// Returns `true` for transport-level failures: the request never produced
    /// a usable response.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Malformed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_formats_status_reason_and_message() {
        let err = PlacesError::Service {
            status: 401,
            reason: "Unauthorized".to_string(),
            message: "Invalid API key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Foursquare API error: 401 Unauthorized. Invalid API key"
        );
        assert!(!err.is_connection());
    }

    #[test]
    fn malformed_body_is_a_connection_error() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert!(PlacesError::Malformed(source).is_connection());
    }
}
