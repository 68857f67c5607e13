// src/parse.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, instrument, trace};

/// Key under which the table section of a response is stored.
pub const TABLE_KEY: &str = "TABLE";

/// Metadata tag → value, plus the table payload under [`TABLE_KEY`].
pub type ParsedResponse = HashMap<String, String>;

/// `"KEY","VALUE"` at the start of a line.
static METADATA_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"([A-Z_]+)","([^"]+)""#).expect("metadata regex should compile"));

/// Parse the text body of an e-Stat response.
///
/// Metadata lines (`"STATUS","0"`, `"DATE","..."`) become entries keyed by
/// their tag. When a line reads exactly `"<table_tag>"`, everything after it
/// is joined back together and stored under [`TABLE_KEY`], and scanning stops
/// there. Any other line is skipped. This never fails: malformed input just
/// yields fewer entries, and an empty `table_tag` never matches.
#[instrument(level = "debug", skip(text), fields(text_len = text.len()))]
pub fn parse_response_text(text: &str, table_tag: &str) -> ParsedResponse {
    let lines: Vec<&str> = text.lines().collect();
    let marker = format!("\"{}\"", table_tag);

    let mut parsed = ParsedResponse::new();
    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = METADATA_LINE.captures(line) {
            trace!(key = &caps[1], "metadata line");
            parsed.insert(caps[1].to_owned(), caps[2].to_owned());
        } else if !table_tag.is_empty() && *line == marker {
            let table = lines[i + 1..].join("\n");
            debug!(line = i, table_lines = lines.len() - i - 1, "found table marker");
            parsed.insert(TABLE_KEY.to_owned(), table);
            break;
        }
    }

    debug!(keys = parsed.len(), "parsed response text");
    parsed
}
