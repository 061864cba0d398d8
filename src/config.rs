//! Configuration for the OpenSearch connection and default query parameters
//!
//! Configuration is loaded once from a properties-style key/value source and
//! is read-only afterwards. Every recognized key has a hard-coded fallback
//! default, so an empty source yields a usable configuration pointing at a
//! local cluster.
//!
//! Recognized keys:
//!
//! | Key | Default |
//! |-----|---------|
//! | `opensearch.host` | `localhost` |
//! | `opensearch.port` | `9200` |
//! | `opensearch.scheme` | `https` |
//! | `opensearch.index.name` | `opensearch_kl_index` |
//! | `opensearch.search.pipeline` | `my-conversation-search-pipeline-deepseek-zh` |
//! | `opensearch.embedding.model.id` | `<embedding-model-id>` |
//! | `opensearch.rag.context.size` | `5` |
//! | `opensearch.rag.timeout` | `15` |
//! | `opensearch.rag.llm.model` | `bedrock/claude` |
//! | `opensearch.rag.result.size` | `2` |
//! | `opensearch.neural.k` | `5` |
//! | `aws.region` | `us-east-1` |
//! | `aws.service` | `es` |
//!
//! The `aws.*` keys are carried through for callers that sign requests
//! themselves; the core client does not consume them.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Default configuration file name, resolved against the working directory
pub const DEFAULT_CONFIG_FILE: &str = "opensearch.properties";

/// Connection settings and default query parameters for conversational search.
///
/// Numeric values are parsed once at load time; a malformed integer fails the
/// load with [`Error::ConfigParse`] rather than surfacing later at query time.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenSearchConfig {
    host: String,
    port: u16,
    scheme: String,
    index_name: String,
    search_pipeline: String,
    embedding_model_id: String,
    context_size: u32,
    timeout_seconds: u32,
    llm_model: String,
    result_size: u32,
    neural_k: u32,
    aws_region: String,
    aws_service: String,
    /// All raw key/value pairs from the source, recognized or not
    properties: HashMap<String, String>,
}

impl Default for OpenSearchConfig {
    fn default() -> Self {
        // An empty source contains no malformed integers.
        #[allow(clippy::expect_used)]
        let config =
            Self::from_properties(HashMap::new()).expect("empty configuration cannot fail");
        config
    }
}

impl OpenSearchConfig {
    /// Load configuration from `opensearch.properties` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigLoad`] if the file cannot be read and
    /// [`Error::ConfigParse`] if a numeric value is malformed.
    pub fn load() -> Result<Self> {
        Self::from_file(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a properties file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigLoad`] if the file cannot be read and
    /// [`Error::ConfigParse`] if a numeric value is malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigLoad {
            path: path.display().to_string(),
            source,
        })?;
        text.parse()
    }

    /// Build a configuration from an already-collected key/value map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if a numeric value is malformed.
    pub fn from_properties(properties: HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            host: get_string(&properties, "opensearch.host", "localhost"),
            port: parse_int(&properties, "opensearch.port", 9200)?,
            scheme: get_string(&properties, "opensearch.scheme", "https"),
            index_name: get_string(&properties, "opensearch.index.name", "opensearch_kl_index"),
            search_pipeline: get_string(
                &properties,
                "opensearch.search.pipeline",
                "my-conversation-search-pipeline-deepseek-zh",
            ),
            embedding_model_id: get_string(
                &properties,
                "opensearch.embedding.model.id",
                "<embedding-model-id>",
            ),
            context_size: parse_int(&properties, "opensearch.rag.context.size", 5)?,
            timeout_seconds: parse_int(&properties, "opensearch.rag.timeout", 15)?,
            llm_model: get_string(&properties, "opensearch.rag.llm.model", "bedrock/claude"),
            result_size: parse_int(&properties, "opensearch.rag.result.size", 2)?,
            neural_k: parse_int(&properties, "opensearch.neural.k", 5)?,
            aws_region: get_string(&properties, "aws.region", "us-east-1"),
            aws_service: get_string(&properties, "aws.service", "es"),
            properties,
        })
    }

    /// Cluster host name
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Cluster port
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// URL scheme (`http` or `https`)
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Default index to search
    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Default server-side search pipeline
    #[must_use]
    pub fn search_pipeline(&self) -> &str {
        &self.search_pipeline
    }

    /// Deployed embedding model id used by the neural query clause
    #[must_use]
    pub fn embedding_model_id(&self) -> &str {
        &self.embedding_model_id
    }

    /// Number of retrieved documents fed to the generator
    #[must_use]
    pub fn context_size(&self) -> u32 {
        self.context_size
    }

    /// Generation timeout forwarded to the server, in seconds
    #[must_use]
    pub fn timeout_seconds(&self) -> u32 {
        self.timeout_seconds
    }

    /// LLM model identifier for answer generation
    #[must_use]
    pub fn llm_model(&self) -> &str {
        &self.llm_model
    }

    /// Number of hits to return
    #[must_use]
    pub fn result_size(&self) -> u32 {
        self.result_size
    }

    /// Number of nearest neighbors for the neural query
    #[must_use]
    pub fn neural_k(&self) -> u32 {
        self.neural_k
    }

    /// AWS region, carried through for request-signing callers
    #[must_use]
    pub fn aws_region(&self) -> &str {
        &self.aws_region
    }

    /// AWS service name, carried through for request-signing callers
    #[must_use]
    pub fn aws_service(&self) -> &str {
        &self.aws_service
    }

    /// Raw value for an arbitrary key from the source, if present
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl std::str::FromStr for OpenSearchConfig {
    type Err = Error;

    /// Parse properties-format text: one `key=value` per line, `#` or `!`
    /// comments, blank lines skipped, whitespace around keys and values
    /// trimmed. Lines without a `=` are ignored.
    fn from_str(text: &str) -> Result<Self> {
        let mut properties = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                properties.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self::from_properties(properties)
    }
}

fn get_string(properties: &HashMap<String, String>, key: &str, default: &str) -> String {
    properties
        .get(key)
        .map_or_else(|| default.to_string(), Clone::clone)
}

fn parse_int<T>(properties: &HashMap<String, String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    match properties.get(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|source| Error::ConfigParse {
            key: key.to_string(),
            value: value.clone(),
            source,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    // ==================== Default value tests ====================

    #[test]
    fn test_defaults_from_empty_source() {
        let config: OpenSearchConfig = "".parse().unwrap();
        assert_eq!(config.host(), "localhost");
        assert_eq!(config.port(), 9200);
        assert_eq!(config.scheme(), "https");
        assert_eq!(config.neural_k(), 5);
        assert_eq!(config.result_size(), 2);
    }

    #[test]
    fn test_defaults_query_parameters() {
        let config = OpenSearchConfig::default();
        assert_eq!(config.index_name(), "opensearch_kl_index");
        assert_eq!(
            config.search_pipeline(),
            "my-conversation-search-pipeline-deepseek-zh"
        );
        assert_eq!(config.embedding_model_id(), "<embedding-model-id>");
        assert_eq!(config.context_size(), 5);
        assert_eq!(config.timeout_seconds(), 15);
        assert_eq!(config.llm_model(), "bedrock/claude");
    }

    #[test]
    fn test_defaults_aws_passthrough() {
        let config = OpenSearchConfig::default();
        assert_eq!(config.aws_region(), "us-east-1");
        assert_eq!(config.aws_service(), "es");
    }

    #[test]
    fn test_default_matches_empty_properties() {
        let from_map = OpenSearchConfig::from_properties(HashMap::new()).unwrap();
        assert_eq!(OpenSearchConfig::default(), from_map);
    }

    // ==================== Properties parsing tests ====================

    #[test]
    fn test_parse_overrides() {
        let config: OpenSearchConfig = "\
            opensearch.host=search.example.com\n\
            opensearch.port=443\n\
            opensearch.scheme=https\n\
            opensearch.index.name=articles\n\
            opensearch.neural.k=10\n"
            .parse()
            .unwrap();
        assert_eq!(config.host(), "search.example.com");
        assert_eq!(config.port(), 443);
        assert_eq!(config.index_name(), "articles");
        assert_eq!(config.neural_k(), 10);
        // Unset keys keep their defaults
        assert_eq!(config.result_size(), 2);
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let config: OpenSearchConfig = "\
            # connection\n\
            ! legacy comment style\n\
            \n\
            opensearch.host=node1\n"
            .parse()
            .unwrap();
        assert_eq!(config.host(), "node1");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let config: OpenSearchConfig = "  opensearch.host =  node2  \n".parse().unwrap();
        assert_eq!(config.host(), "node2");
    }

    #[test]
    fn test_parse_value_containing_equals() {
        // Only the first '=' splits key from value
        let config: OpenSearchConfig = "opensearch.rag.llm.model=bedrock/claude=v2\n"
            .parse()
            .unwrap();
        assert_eq!(config.llm_model(), "bedrock/claude=v2");
    }

    #[test]
    fn test_parse_line_without_separator_ignored() {
        let config: OpenSearchConfig = "garbage line\nopensearch.port=9201\n".parse().unwrap();
        assert_eq!(config.port(), 9201);
    }

    #[test]
    fn test_arbitrary_key_passthrough() {
        let config: OpenSearchConfig = "aws.region=eu-west-1\ncustom.key=custom-value\n"
            .parse()
            .unwrap();
        assert_eq!(config.aws_region(), "eu-west-1");
        assert_eq!(config.get("custom.key"), Some("custom-value"));
        assert_eq!(config.get("missing.key"), None);
    }

    // ==================== Parse failure tests ====================

    #[test]
    fn test_malformed_port_fails() {
        let result = "opensearch.port=not-a-number\n".parse::<OpenSearchConfig>();
        match result {
            Err(Error::ConfigParse { key, value, .. }) => {
                assert_eq!(key, "opensearch.port");
                assert_eq!(value, "not-a-number");
            }
            other => panic!("expected ConfigParse error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_neural_k_fails() {
        let result = "opensearch.neural.k=five\n".parse::<OpenSearchConfig>();
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_negative_size_fails() {
        // Sizes are unsigned; a negative literal is a parse failure
        let result = "opensearch.rag.result.size=-1\n".parse::<OpenSearchConfig>();
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    // ==================== File loading tests ====================

    #[test]
    fn test_from_file_missing() {
        let result = OpenSearchConfig::from_file("/nonexistent/opensearch.properties");
        match result {
            Err(Error::ConfigLoad { path, .. }) => {
                assert!(path.contains("opensearch.properties"));
            }
            other => panic!("expected ConfigLoad error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("opensearch-rag-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.properties");
        std::fs::write(&path, "opensearch.host=filehost\nopensearch.port=9301\n").unwrap();

        let config = OpenSearchConfig::from_file(&path).unwrap();
        assert_eq!(config.host(), "filehost");
        assert_eq!(config.port(), 9301);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
