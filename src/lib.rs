//! # OpenSearch Conversational Search Client
//!
//! This crate provides a thin Rust client for issuing conversational search
//! (retrieval-augmented generation) queries against an OpenSearch cluster
//! with a neural-search + generative-QA search pipeline deployed.
//!
//! ## Features
//!
//! - **Neural search**: query clause that routes text through a remote
//!   embedding model for nearest-neighbor retrieval
//! - **Generative QA**: forwards RAG parameters (LLM model, context size,
//!   timeout) to the server-side pipeline
//! - **Properties configuration**: key/value configuration with documented
//!   defaults for every connection and query parameter
//! - **Authentication**: optional HTTP basic auth
//!
//! ## Example
//!
//! ```no_run
//! use opensearch_rag::{OpenSearchClient, OpenSearchConfig, SearchOverrides};
//! use opensearch_rag::response::{extract_answer, extract_hits};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OpenSearchConfig::load()?;
//!     let client = OpenSearchClient::connect(config)?;
//!
//!     let response = client
//!         .search("What is OpenSearch?", SearchOverrides::default())
//!         .await?;
//!
//!     if let Some(answer) = extract_answer(&response) {
//!         println!("{answer}");
//!     }
//!     for hit in extract_hits(&response).unwrap_or_default() {
//!         println!("{:.4}: {:?}", hit.score, hit.source);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;

pub use client::OpenSearchClient;
pub use config::OpenSearchConfig;
pub use error::{Error, Result};
pub use request::{
    GenerativeQaParameters, SearchOverrides, SearchParameters, SearchRequest,
};
pub use response::{extract_answer, extract_hits, render_results, SearchHit};
