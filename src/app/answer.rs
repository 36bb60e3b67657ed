//! Pulling the final answer out of an agent response.

use std::fmt;

use serde_json::Value;

/// What the result region shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalAnswer {
    /// Text of the last message.
    Text(String),
    /// The response did not have the expected shape; carries it unchanged.
    Unparsed(Value),
}

impl FinalAnswer {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl fmt::Display for FinalAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Unparsed(Value::String(raw)) => f.write_str(raw),
            Self::Unparsed(raw) => write!(f, "{raw}"),
        }
    }
}

/// Read `response["messages"][-1].content`.
///
/// `content` may be a string or a list of content parts; text parts are
/// concatenated. Anything else yields [`FinalAnswer::Unparsed`].
pub fn extract_answer(response: &Value) -> FinalAnswer {
    response
        .get("messages")
        .and_then(Value::as_array)
        .and_then(|messages| messages.last())
        .and_then(|last| last.get("content"))
        .and_then(content_text)
        .map(FinalAnswer::Text)
        .unwrap_or_else(|| FinalAnswer::Unparsed(response.clone()))
}

fn content_text(content: &Value) -> Option<String> {
    match content {
        Value::String(text) => Some(text.clone()),
        Value::Array(parts) => {
            let texts: Vec<&str> = parts
                .iter()
                .filter_map(|part| match part {
                    Value::String(text) => Some(text.as_str()),
                    Value::Object(obj) if obj.get("type").and_then(Value::as_str) == Some("text") => {
                        obj.get("text").and_then(Value::as_str)
                    }
                    _ => None,
                })
                .collect();
            (!texts.is_empty()).then(|| texts.concat())
        }
        _ => None,
    }
}
