//! Response envelope builders.

use serde_json::{Value, json};

/// Returns a 200 OK response whose body is `text` as-is, not JSON-wrapped.
#[must_use]
pub fn ok_text(text: &str) -> Value {
    json!({ "statusCode": 200, "body": text })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "body": json!({ "error": message }).to_string()
    })
}
