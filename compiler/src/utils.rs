use crate::error::GenError;

/// Longest fragment echoed back in a schema error before it is elided.
const MAX_FRAGMENT_LEN: usize = 200;

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

pub fn error(msg: &str, line: usize, column: usize) -> GenError {
    GenError::ParseError {
        msg: msg.to_string(),
        line,
        column,
    }
}

/// Builds a `SchemaError` that carries the offending JSON fragment.
pub fn schema_error(msg: &str, fragment: &str) -> GenError {
    let fragment = fragment.trim();
    let shown = if fragment.len() > MAX_FRAGMENT_LEN {
        let mut end = MAX_FRAGMENT_LEN;
        while !fragment.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &fragment[..end])
    } else {
        fragment.to_string()
    };
    GenError::SchemaError(format!("{}, got {}", msg, shown))
}
