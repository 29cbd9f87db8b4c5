//! Output line prefix and display truncation

use chrono::Local;

/// Default display limit for truncated fields
pub const MAX_LEN: usize = 200;

/// Build the `[iter:N HH:MM:SS]` prefix. The timestamp is the wall-clock
/// time at the moment of the call.
pub fn prefix(iteration: &str) -> String {
    format!("[iter:{} {}]", iteration, Local::now().format("%H:%M:%S"))
}

/// Collapse a field to a single display line: newlines become spaces, the
/// result is trimmed, and anything longer than `max_len` is cut with a
/// `...` suffix.
pub fn truncate(text: &str, max_len: usize) -> String {
    let one_line = text.replace('\n', " ");
    let one_line = one_line.trim();
    if one_line.chars().count() > max_len {
        let cut: String = one_line.chars().take(max_len).collect();
        format!("{}...", cut)
    } else {
        one_line.to_string()
    }
}
