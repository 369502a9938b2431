//! Tool call results — ordered content items plus a tool-level error flag.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// MIME type used for image content produced from PNG bytes.
pub const PNG_MIME: &str = "image/png";

/// One unit of a tool's returned payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentItem {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image")]
    Image {
        #[serde(rename = "mimeType")]
        mime_type: String,
        data: String,
    },
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        ContentItem::Text { text: text.into() }
    }

    /// Image content from raw bytes; the bytes are base64-encoded.
    pub fn image(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        ContentItem::Image {
            mime_type: mime_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// A tool's output as delivered inside a successful response.
///
/// Built by value: every `with_*` call consumes the result and returns a new
/// one, so nothing is shared between calls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<ContentItem>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolCallResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new().with_text(text)
    }

    pub fn image_png(bytes: &[u8]) -> Self {
        Self::new().with_image_png(bytes)
    }

    pub fn json(value: &impl Serialize) -> Self {
        Self::new().with_json(value)
    }

    /// A tool-level failure: the envelope succeeds, `isError` is set.
    pub fn error(message: impl Into<String>) -> Self {
        Self::text(message).into_error()
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_item(ContentItem::text(text))
    }

    pub fn with_image(self, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        self.with_item(ContentItem::image(mime_type, bytes))
    }

    pub fn with_image_png(self, bytes: &[u8]) -> Self {
        self.with_image(PNG_MIME, bytes)
    }

    /// Append a value rendered as pretty-printed JSON text.
    pub fn with_json(self, value: &impl Serialize) -> Self {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|e| e.to_string());
        self.with_text(text)
    }

    pub fn with_item(self, item: ContentItem) -> Self {
        let mut content = self.content;
        content.push(item);
        Self { content, ..self }
    }

    pub fn into_error(self) -> Self {
        Self {
            is_error: true,
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_result_shape() {
        let value = serde_json::to_value(ToolCallResult::text("hi")).unwrap();
        assert_eq!(
            value,
            json!({ "content": [{ "type": "text", "text": "hi" }], "isError": false })
        );
    }

    #[test]
    fn test_items_keep_emission_order() {
        let result = ToolCallResult::text("first")
            .with_image_png(&[0x89, b'P', b'N', b'G'])
            .with_text("last");
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["content"][0]["text"], "first");
        assert_eq!(value["content"][1]["type"], "image");
        assert_eq!(value["content"][1]["mimeType"], "image/png");
        assert_eq!(value["content"][1]["data"], "iVBORw==");
        assert_eq!(value["content"][2]["text"], "last");
        assert_eq!(value["isError"], false);
    }

    #[test]
    fn test_error_flag() {
        let result = ToolCallResult::error("file not found");
        assert!(result.is_error);
        assert_eq!(result.content, vec![ContentItem::text("file not found")]);

        let flagged = ToolCallResult::text("partial").into_error();
        assert!(flagged.is_error);
    }

    #[test]
    fn test_json_content() {
        let result = ToolCallResult::json(&json!({ "total": 2 }));
        match &result.content[0] {
            ContentItem::Text { text } => {
                let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
                assert_eq!(parsed["total"], 2);
            }
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_does_not_mutate_original() {
        let base = ToolCallResult::text("a");
        let extended = base.clone().with_text("b");
        assert_eq!(base.content.len(), 1);
        assert_eq!(extended.content.len(), 2);
        assert!(ToolCallResult::new().is_empty());
    }
}
