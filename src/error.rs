//! Error types for OpenSearch conversational search operations

use thiserror::Error;

/// Result type alias for conversational search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by configuration loading, transport, and search calls.
///
/// Response field extraction never produces an error: missing or malformed
/// optional fields degrade to "absent" so the presentation layer stays
/// resilient to partial responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The configuration source could not be located or read
    #[error("failed to load configuration from '{path}': {source}")]
    ConfigLoad {
        /// Path of the configuration source
        path: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A numeric configuration value failed to parse
    #[error("invalid integer for configuration key '{key}': '{value}'")]
    ConfigParse {
        /// The offending configuration key
        key: String,
        /// The raw value that failed to parse
        value: String,
        /// Underlying parse failure
        #[source]
        source: std::num::ParseIntError,
    },

    /// The transport to the cluster could not be established
    #[error("failed to establish OpenSearch connection: {0}")]
    Connection(String),

    /// Network-level failure during a request (connect, timeout, body read)
    #[error("OpenSearch transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The cluster answered with a non-success HTTP status
    #[error("OpenSearch returned HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code returned by the cluster
        status: reqwest::StatusCode,
        /// Response body text, as returned by the server
        body: String,
    },

    /// A specific search invocation failed; wraps the transport-class cause
    #[error("conversational search failed: {source}")]
    Search {
        /// The underlying transport or HTTP failure
        #[source]
        source: Box<Error>,
    },

    /// JSON serialization or parsing failed
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a transport-class failure as a search invocation failure
    #[must_use]
    pub fn search(source: Error) -> Self {
        Error::Search {
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load_display() {
        let err = Error::ConfigLoad {
            path: "opensearch.properties".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("opensearch.properties"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_config_parse_display() {
        let source = "abc".parse::<u32>().unwrap_err();
        let err = Error::ConfigParse {
            key: "opensearch.port".to_string(),
            value: "abc".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("opensearch.port"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_search_wraps_source() {
        let inner = Error::HttpStatus {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "shard failure".to_string(),
        };
        let err = Error::search(inner);
        assert!(matches!(err, Error::Search { .. }));
        // Source chain must preserve the underlying cause
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("shard failure"));
    }

    #[test]
    fn test_serialization_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_connection_display() {
        let err = Error::Connection("invalid URL 'bad://'".to_string());
        assert!(err.to_string().contains("invalid URL"));
    }
}
