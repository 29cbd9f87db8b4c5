//! Per-line event parsing and rendering
//!
//! Each stream-json line is classified by its `type` field and rendered to
//! zero or more display bodies. Missing or malformed fields are never
//! errors; a field that isn't there just means that branch doesn't apply.

use log::debug;
use serde_json::Value;

use crate::format::{MAX_LEN, truncate};

/// Trimmed text deltas at or below this length are dropped as streaming noise
const DELTA_NOISE_LEN: usize = 50;

/// Render one input line to zero or more display bodies (prefix added by
/// the caller at write time). Blank lines render to nothing; lines that
/// aren't JSON pass through verbatim.
pub fn render_line(line: &str) -> Vec<String> {
    if line.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(line) {
        Ok(event) => render_event(&event),
        Err(_) => vec![line.to_string()],
    }
}

/// Dispatch a parsed event on its `type` field. Unrecognized types are
/// dropped silently; the stream is noisy by design and only a fixed set of
/// variants is worth showing.
fn render_event(event: &Value) -> Vec<String> {
    match event.get("type").and_then(|v| v.as_str()) {
        Some("assistant") => render_assistant(event),
        Some("content_block_delta") => render_text_delta(event),
        Some("tool_use") => vec![render_tool_use(event)],
        Some("tool_result") | Some("result") => render_tool_result(event),
        Some("error") => vec![render_error(event)],
        Some("message_start") => render_message_start(event),
        Some("message_delta") => render_message_delta(event),
        other => {
            debug!("Dropping event with type {:?}", other);
            Vec::new()
        }
    }
}

/// One line per non-empty text block in the assistant message
fn render_assistant(event: &Value) -> Vec<String> {
    let Some(blocks) = event.pointer("/message/content").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    blocks
        .iter()
        .filter(|block| block.get("type").and_then(|v| v.as_str()) == Some("text"))
        .filter_map(|block| block.get("text").and_then(|v| v.as_str()))
        .filter(|text| !text.is_empty())
        .map(|text| truncate(text, MAX_LEN))
        .collect()
}

/// Streaming text deltas arrive token by token; only substantial chunks
/// get a line, the rest is suppressed as noise.
fn render_text_delta(event: &Value) -> Vec<String> {
    let delta = event.get("delta");
    let is_text = delta
        .and_then(|d| d.get("type"))
        .and_then(|v| v.as_str())
        == Some("text_delta");

    if !is_text {
        return Vec::new();
    }

    match delta.and_then(|d| d.get("text")).and_then(|v| v.as_str()) {
        Some(text) if text.trim().chars().count() > DELTA_NOISE_LEN => {
            vec![truncate(text, MAX_LEN)]
        }
        _ => Vec::new(),
    }
}

fn render_tool_use(event: &Value) -> String {
    let name = event
        .get("name")
        .or_else(|| event.pointer("/tool/name"))
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");

    let input = |field: &str| {
        event
            .pointer(&format!("/input/{}", field))
            .and_then(|v| v.as_str())
    };

    let detail = match name {
        "Bash" => input("command").map(|cmd| format!(": {}", truncate(cmd, 100))),
        "Read" | "Edit" | "Write" => input("file_path").map(|path| format!(" {}", path)),
        "Grep" | "Glob" => input("pattern").map(|pattern| format!(": {}", pattern)),
        _ => None,
    };

    format!("🔧 {}{}", name, detail.unwrap_or_default())
}

/// Tool results only matter when they failed; successful results are
/// dropped.
fn render_tool_result(event: &Value) -> Vec<String> {
    let failed = event.get("is_error").is_some_and(is_truthy) || event.get("error").is_some();
    if !failed {
        return Vec::new();
    }

    let message = event
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .or_else(|| event.get("content").map(as_display_text))
        .unwrap_or_else(|| "unknown error".to_string());

    vec![format!("❌ Tool error: {}", truncate(&message, MAX_LEN))]
}

fn render_error(event: &Value) -> String {
    let message = event
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .or_else(|| event.get("error").map(|err| err.to_string()))
        .unwrap_or_else(|| "unknown error".to_string());

    format!("❌ Error: {}", truncate(&message, MAX_LEN))
}

fn render_message_start(event: &Value) -> Vec<String> {
    let Some(usage) = event.pointer("/message/usage") else {
        return Vec::new();
    };

    vec![format!(
        "📊 Tokens: input={} output={}",
        token_count(usage, "input_tokens"),
        token_count(usage, "output_tokens"),
    )]
}

fn render_message_delta(event: &Value) -> Vec<String> {
    let Some(usage) = event.get("usage") else {
        return Vec::new();
    };

    vec![format!(
        "📊 Final tokens: output={}",
        token_count(usage, "output_tokens")
    )]
}

fn token_count(usage: &Value, field: &str) -> u64 {
    usage.get(field).and_then(|v| v.as_u64()).unwrap_or(0)
}

/// String content is shown as-is; anything else is serialized
fn as_display_text(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// JS-style truthiness: null, false, 0, and "" are falsy; arrays and
/// objects are always truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
