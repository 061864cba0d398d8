//! Search parameters and request-body construction
//!
//! The request body is the wire contract with the server-side search
//! pipeline: field names and nesting must match verbatim or the pipeline
//! will not recognize the query. The typed structs below serialize to
//! exactly:
//!
//! ```json
//! {
//!   "query": { "neural": { "text_embedding": {
//!       "query_text": "...", "model_id": "...", "k": 5 } } },
//!   "size": 2,
//!   "_source": ["text"],
//!   "ext": { "generative_qa_parameters": {
//!       "llm_model": "...", "llm_question": "...",
//!       "context_size": 5, "timeout": 15 } }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::OpenSearchConfig;

/// Fully-resolved parameters for one conversational search call.
///
/// Every field is present; defaults come from [`OpenSearchConfig`], not from
/// the request builder. Construct with [`SearchParameters::from_config`] and
/// adjust with [`SearchParameters::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    /// The user's question, sent both as the neural query text and as the
    /// LLM question
    pub question: String,
    /// Index to search
    pub index_name: String,
    /// Server-side search pipeline name
    pub search_pipeline: String,
    /// Deployed embedding model id
    pub embedding_model_id: String,
    /// Number of nearest neighbors for the neural query
    pub k: u32,
    /// Number of hits to return
    pub result_size: u32,
    /// `_source` fields to include in each hit. An empty list means
    /// "return no source fields" (the server's semantic for an empty
    /// array), not "return all fields".
    pub source_fields: Vec<String>,
    /// LLM model identifier for answer generation
    pub llm_model: String,
    /// Number of retrieved documents fed to the generator
    pub context_size: u32,
    /// Generation timeout forwarded to the server, in seconds
    pub timeout_seconds: u32,
}

impl SearchParameters {
    /// Resolve parameters for `question` from configuration defaults.
    ///
    /// The default source-field filter is `["text"]`, matching the fields
    /// the generator consumes.
    pub fn from_config(config: &OpenSearchConfig, question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            index_name: config.index_name().to_string(),
            search_pipeline: config.search_pipeline().to_string(),
            embedding_model_id: config.embedding_model_id().to_string(),
            k: config.neural_k(),
            result_size: config.result_size(),
            source_fields: vec!["text".to_string()],
            llm_model: config.llm_model().to_string(),
            context_size: config.context_size(),
            timeout_seconds: config.timeout_seconds(),
        }
    }

    /// Merge a partial override onto these parameters. Unset override
    /// fields leave the corresponding parameter unchanged.
    #[must_use]
    pub fn apply(mut self, overrides: SearchOverrides) -> Self {
        if let Some(index_name) = overrides.index_name {
            self.index_name = index_name;
        }
        if let Some(search_pipeline) = overrides.search_pipeline {
            self.search_pipeline = search_pipeline;
        }
        if let Some(embedding_model_id) = overrides.embedding_model_id {
            self.embedding_model_id = embedding_model_id;
        }
        if let Some(k) = overrides.k {
            self.k = k;
        }
        if let Some(result_size) = overrides.result_size {
            self.result_size = result_size;
        }
        if let Some(source_fields) = overrides.source_fields {
            self.source_fields = source_fields;
        }
        if let Some(llm_model) = overrides.llm_model {
            self.llm_model = llm_model;
        }
        if let Some(context_size) = overrides.context_size {
            self.context_size = context_size;
        }
        if let Some(timeout_seconds) = overrides.timeout_seconds {
            self.timeout_seconds = timeout_seconds;
        }
        self
    }
}

/// Partial override of configuration defaults for a single search call.
///
/// Only fields set to `Some` take effect; everything else falls back to the
/// configuration. This replaces a long positional parameter list with one
/// explicit structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOverrides {
    /// Override the index to search
    pub index_name: Option<String>,
    /// Override the search pipeline
    pub search_pipeline: Option<String>,
    /// Override the embedding model id
    pub embedding_model_id: Option<String>,
    /// Override the neural neighbor count
    pub k: Option<u32>,
    /// Override the number of hits returned
    pub result_size: Option<u32>,
    /// Override the `_source` field filter
    pub source_fields: Option<Vec<String>>,
    /// Override the LLM model
    pub llm_model: Option<String>,
    /// Override the generator context size
    pub context_size: Option<u32>,
    /// Override the server-side generation timeout
    pub timeout_seconds: Option<u32>,
}

/// Generative QA parameters forwarded to the RAG processor in the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerativeQaParameters {
    /// LLM model identifier
    pub llm_model: String,
    /// The question posed to the LLM
    pub llm_question: String,
    /// Number of retrieved documents used as generation context
    pub context_size: u32,
    /// Generation timeout in seconds
    pub timeout: u32,
}

/// `ext` section of the request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestExt {
    /// RAG processor parameters
    pub generative_qa_parameters: GenerativeQaParameters,
}

/// Neural query leaf clause against the `text_embedding` vector field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEmbeddingClause {
    /// Text sent to the remote embedding model
    pub query_text: String,
    /// Deployed embedding model id
    pub model_id: String,
    /// Number of nearest neighbors
    pub k: u32,
}

/// `neural` query clause wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeuralClause {
    /// Vector field clause
    pub text_embedding: TextEmbeddingClause,
}

/// Top-level `query` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryClause {
    /// Neural search clause
    pub neural: NeuralClause,
}

/// Complete conversational search request body.
///
/// Building a request is deterministic and total: equal parameters yield
/// structurally equal requests, and no parameter combination fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Neural retrieval query
    pub query: QueryClause,
    /// Number of hits to return
    pub size: u32,
    /// Source field filter; an empty list serializes to `[]` and is never
    /// omitted
    #[serde(rename = "_source")]
    pub source: Vec<String>,
    /// Generative QA extension
    pub ext: RequestExt,
}

impl SearchRequest {
    /// Build the request body for `params`
    #[must_use]
    pub fn build(params: &SearchParameters) -> Self {
        Self {
            query: QueryClause {
                neural: NeuralClause {
                    text_embedding: TextEmbeddingClause {
                        query_text: params.question.clone(),
                        model_id: params.embedding_model_id.clone(),
                        k: params.k,
                    },
                },
            },
            size: params.result_size,
            source: params.source_fields.clone(),
            ext: RequestExt {
                generative_qa_parameters: GenerativeQaParameters {
                    llm_model: params.llm_model.clone(),
                    llm_question: params.question.clone(),
                    context_size: params.context_size,
                    timeout: params.timeout_seconds,
                },
            },
        }
    }

    /// Serialize to a JSON tree, for callers that inspect or splice the body
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        // A struct of strings and integers cannot fail to serialize.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
