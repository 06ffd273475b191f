//! Search collaborator
//!
//! Thin layer over the fetch path: builds the DuckDuckGo Instant Answer
//! URL for a term, fetches it like any other URL (cache, redirects and
//! all), and formats the topics the rendered JSON contains.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::client::Session;
use crate::error::FetchError;
use crate::render::compile_pattern;

/// Instant Answer endpoint queried for search terms
const SEARCH_ENDPOINT: &str = "https://api.duckduckgo.com/";

// Within one topic object FirstURL sorts before Text, so a lazy scan
// between the two stays inside the object.
static TOPIC_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r#""FirstURL":\s*"([^"]*)"(?s:.*?)"Text":\s*"([^"]*)""#));

/// Searches for a term and formats the matched topics, one per line.
pub(crate) fn search_and_format(
    session: &mut Session,
    term: &str,
) -> Result<String, FetchError> {
    let encoded: String = form_urlencoded::byte_serialize(term.as_bytes()).collect();
    let url = format!("{SEARCH_ENDPOINT}?q={encoded}&format=json");
    debug!(term, %url, "searching");

    let rendered = session.fetch(&url)?;
    let formatted = format_topics(&rendered);
    if formatted.is_empty() {
        warn!(term, "no topics in search response");
    }
    Ok(formatted)
}

/// Formats every `(FirstURL, Text)` pair as a `"<Text>":"<FirstURL>"`
/// line.
fn format_topics(rendered: &str) -> String {
    TOPIC_RE
        .captures_iter(rendered)
        .map(|caps| format!("\"{}\":\"{}\"", &caps[2], &caps[1]))
        .collect::<Vec<_>>()
        .join("\n")
}
