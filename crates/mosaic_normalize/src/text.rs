//! Text reply shapes.

use serde_json::Value;

/// Pulls the reply string out of one response shape.
pub type TextDecoder = fn(&Value) -> Option<&str>;

/// A named text response shape.
#[derive(Debug, Clone, Copy)]
pub struct TextShape {
    /// JSON path the shape reads, for logs and diagnostics
    pub name: &'static str,
    /// Decoder returning the reply when the shape matches
    pub decode: TextDecoder,
}

/// Known text shapes in priority order. The first one that yields a JSON
/// string wins; an empty string is a valid reply.
pub const TEXT_SHAPES: &[TextShape] = &[
    TextShape {
        name: "choices[0].message.content",
        decode: choices_message_content,
    },
    TextShape {
        name: "choices[0].text",
        decode: choices_text,
    },
    TextShape {
        name: "output.content[*].text",
        decode: output_content_text,
    },
    TextShape {
        name: "output",
        decode: output_string,
    },
    TextShape {
        name: "responses[0].message.content",
        decode: responses_message_content,
    },
    TextShape {
        name: "output[*].content[*].text",
        decode: output_items_content_text,
    },
];

fn choices_message_content(raw: &Value) -> Option<&str> {
    raw.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

fn choices_text(raw: &Value) -> Option<&str> {
    raw.get("choices")?.get(0)?.get("text")?.as_str()
}

fn output_content_text(raw: &Value) -> Option<&str> {
    first_text(raw.get("output")?.get("content")?)
}

fn output_string(raw: &Value) -> Option<&str> {
    raw.get("output")?.as_str()
}

fn responses_message_content(raw: &Value) -> Option<&str> {
    raw.get("responses")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

fn output_items_content_text(raw: &Value) -> Option<&str> {
    raw.get("output")?
        .as_array()?
        .iter()
        .find_map(|item| first_text(item.get("content")?))
}

fn first_text(content: &Value) -> Option<&str> {
    content
        .as_array()?
        .iter()
        .find_map(|part| part.get("text")?.as_str())
}
