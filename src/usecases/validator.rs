//! Contact payload validation. Pure: no I/O, no logging, same input gives same output.

use crate::domain::schema::trim_text;
use crate::domain::{SubmissionDraft, SubmissionError};
use serde_json::Value;

/// Keys every contact payload must carry, in draft field order.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_FIELDS_BLANK: &str = "All fields must contain valid content (no empty spaces only)";

/// Turn a raw JSON payload into a trimmed draft.
///
/// A field that is absent, null, an empty string or not a string fails as "required".
/// Fields that are non-empty strings but whitespace-only (byte-order marks included)
/// fail as "blank".
/// Both are `SubmissionError::ValidationFailed`; only the wording differs.
pub fn validate_submission(payload: &Value) -> Result<SubmissionDraft, SubmissionError> {
    let Some(obj) = payload.as_object() else {
        return Err(required());
    };

    let mut raw: [&str; 4] = [""; 4];
    for (slot, key) in raw.iter_mut().zip(REQUIRED_FIELDS) {
        match obj.get(key).and_then(Value::as_str) {
            Some(s) if !s.is_empty() => *slot = s,
            _ => return Err(required()),
        }
    }

    let trimmed = raw.map(trim_text);
    if trimmed.iter().any(|s| s.is_empty()) {
        return Err(SubmissionError::ValidationFailed(MSG_FIELDS_BLANK.to_string()));
    }

    let [name, email, subject, message] = trimmed;
    Ok(SubmissionDraft {
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        message: message.to_string(),
    })
}

fn required() -> SubmissionError {
    SubmissionError::ValidationFailed(MSG_FIELDS_REQUIRED.to_string())
}
