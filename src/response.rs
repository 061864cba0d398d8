//! Read-only extraction over conversational search responses
//!
//! The response is treated as an opaque JSON tree with two regions of
//! interest: the generated answer at
//! `ext.retrieval_augmented_generation.answer` and the ranked hits at
//! `hits.hits[]`. Extraction never fails; a missing or malformed region
//! degrades to "absent" so callers can render partial responses.

use serde_json::{Map, Value};

/// One ranked hit from a search response
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Relevance score; `0.0` when `_score` is missing or not a number
    pub score: f64,
    /// The `_source` document, with the field set determined by the
    /// `_source` filter sent in the request
    pub source: Map<String, Value>,
}

/// Extract the generated answer, if the pipeline produced one.
///
/// Returns `None` when any intermediate node is missing, null, or not a
/// string; a generation-less response is expected, not exceptional.
#[must_use]
pub fn extract_answer(response: &Value) -> Option<&str> {
    response
        .get("ext")?
        .get("retrieval_augmented_generation")?
        .get("answer")?
        .as_str()
}

/// Extract the ranked hits in server order.
///
/// Returns `None` when the `hits.hits` path is missing (distinct from
/// `Some` of an empty vector, which means the search matched nothing).
/// Individual hits with a malformed score keep their position with a score
/// of `0.0`.
#[must_use]
pub fn extract_hits(response: &Value) -> Option<Vec<SearchHit>> {
    let hits = response.get("hits")?.get("hits")?.as_array()?;
    Some(
        hits.iter()
            .map(|hit| SearchHit {
                score: hit.get("_score").and_then(Value::as_f64).unwrap_or(0.0),
                source: hit
                    .get("_source")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect(),
    )
}

/// Render a search response for human consumption.
///
/// Pure formatting over [`extract_answer`] and [`extract_hits`]; absent
/// regions are simply omitted from the output.
#[must_use]
pub fn render_results(response: &Value) -> String {
    let mut output = String::from("=== Conversational Search Results ===\n");

    if let Some(answer) = extract_answer(response) {
        output.push_str("\nGenerated Answer:\n");
        output.push_str(answer);
        output.push('\n');
    }

    if let Some(hits) = extract_hits(response) {
        if !hits.is_empty() {
            output.push_str("\nRetrieved Documents:\n");
            for (i, hit) in hits.iter().enumerate() {
                output.push_str(&format!("\nDocument {}:\n", i + 1));
                output.push_str(&format!("Score: {}\n", hit.score));
                output.push_str(&format!(
                    "Content: {}\n",
                    Value::Object(hit.source.clone())
                ));
            }
        }
    }

    output.push_str("\n======================================\n");
    output
}
