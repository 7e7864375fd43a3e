//! Mapping failed submissions to user-facing errors
//!
//! Priority, highest first: a per-field `errors` map, a `message`, an
//! `error` string, the transport error text, then a generic fallback.

use projecthub_shared::FieldErrors;
use serde_json::Value;

use crate::directory::DirectoryError;

pub const GENERIC_SUBMISSION_ERROR: &str = "An unknown error occurred. Please try again.";

/// What a failed submission shows the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Shown inline next to each field
    Fields(FieldErrors),
    /// Shown as a single banner
    General(String),
}

impl SubmissionError {
    /// Extract the error from a response body, if it carries one
    pub fn from_body(body: &Value) -> Option<Self> {
        if let Some(errors) = body.get("errors").and_then(Value::as_object) {
            if !errors.is_empty() {
                let fields = errors
                    .iter()
                    .map(|(field, messages)| (field.clone(), messages_of(messages)))
                    .collect();
                return Some(SubmissionError::Fields(fields));
            }
        }

        ["message", "error"]
            .iter()
            .filter_map(|key| body.get(*key).and_then(Value::as_str))
            .find(|text| !text.trim().is_empty())
            .map(|text| SubmissionError::General(text.to_string()))
    }
}

impl From<&DirectoryError> for SubmissionError {
    fn from(err: &DirectoryError) -> Self {
        match err {
            DirectoryError::Rejected { body, .. } => SubmissionError::from_body(body)
                .unwrap_or_else(|| SubmissionError::General(format!("Network error: {}", err))),
            DirectoryError::HttpError(_) | DirectoryError::Timeout => {
                SubmissionError::General(format!("Network error: {}", err))
            }
            DirectoryError::InvalidResponse | DirectoryError::InvalidUrl(_) => {
                SubmissionError::General(GENERIC_SUBMISSION_ERROR.to_string())
            }
        }
    }
}

/// DRF-style error values are usually lists of strings, sometimes a bare string
fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) => vec![s.clone()],
        other => vec![other.to_string()],
    }
}
