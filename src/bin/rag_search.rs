//! Example CLI: ask a question against an OpenSearch conversational search
//! pipeline and print the generated answer with the retrieved documents.
//!
//! ```text
//! rag-search "What is OpenSearch?" --index articles --size 3
//! ```
//!
//! Exits with status 1 on configuration-load or search failure.

use clap::Parser;
use opensearch_rag::{OpenSearchClient, OpenSearchConfig, SearchOverrides};
use opensearch_rag::response::render_results;
use tracing::info;

/// Built-in sample question used when none is given on the command line
const DEFAULT_QUESTION: &str = "OpenSearch Serverless 是什么，和OpenSearch集群模式有什么区别，\
                                使用 OpenSearch Serverless，还需要管理服务器资源么？";

#[derive(Parser)]
#[command(
    name = "rag-search",
    about = "Conversational search (RAG) against an OpenSearch neural search pipeline"
)]
struct Cli {
    /// Question to ask; a built-in sample question is used when omitted
    question: Option<String>,

    /// Path to the properties configuration file
    #[arg(long, default_value = opensearch_rag::config::DEFAULT_CONFIG_FILE)]
    config: std::path::PathBuf,

    /// Username for HTTP basic auth
    #[arg(long, requires = "password")]
    username: Option<String>,

    /// Password for HTTP basic auth
    #[arg(long, requires = "username")]
    password: Option<String>,

    /// Override the index to search
    #[arg(long)]
    index: Option<String>,

    /// Override the search pipeline
    #[arg(long)]
    pipeline: Option<String>,

    /// Override the embedding model id
    #[arg(long)]
    model_id: Option<String>,

    /// Override the neural neighbor count
    #[arg(long)]
    k: Option<u32>,

    /// Override the number of hits returned
    #[arg(long)]
    size: Option<u32>,

    /// Override the `_source` field filter (repeatable)
    #[arg(long = "source-field")]
    source_fields: Vec<String>,

    /// Override the LLM model
    #[arg(long)]
    llm_model: Option<String>,

    /// Override the generator context size
    #[arg(long)]
    context_size: Option<u32>,

    /// Override the server-side generation timeout, in seconds
    #[arg(long)]
    timeout: Option<u32>,
}

impl Cli {
    fn overrides(&self) -> SearchOverrides {
        SearchOverrides {
            index_name: self.index.clone(),
            search_pipeline: self.pipeline.clone(),
            embedding_model_id: self.model_id.clone(),
            k: self.k,
            result_size: self.size,
            source_fields: if self.source_fields.is_empty() {
                None
            } else {
                Some(self.source_fields.clone())
            },
            llm_model: self.llm_model.clone(),
            context_size: self.context_size,
            timeout_seconds: self.timeout,
        }
    }
}

async fn run(cli: Cli) -> opensearch_rag::Result<()> {
    let config = OpenSearchConfig::from_file(&cli.config)?;

    let client = match (&cli.username, &cli.password) {
        (Some(username), Some(password)) => {
            OpenSearchClient::connect_with_auth(config, username, password)?
        }
        _ => OpenSearchClient::connect(config)?,
    };

    let question = cli
        .question
        .clone()
        .unwrap_or_else(|| DEFAULT_QUESTION.to_string());
    info!(%question, "executing conversational search");
    println!("Question: {question}");

    let response = client.search(&question, cli.overrides()).await?;
    print!("{}", render_results(&response));
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            eprintln!("Caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
