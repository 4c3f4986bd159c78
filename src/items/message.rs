use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::MessageType;

/// Wire discriminant of a message record. Tags the server never documented
/// land on [`MessageKind::Unknown`] instead of failing the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    ActionRequest,
    #[serde(rename = "contacts")]
    ContactsRequest,
    #[serde(rename = "file_operator")]
    FileFromOperator,
    #[serde(rename = "file_visitor")]
    FileFromVisitor,
    ForOperator,
    Info,
    Keyboard,
    KeyboardResponse,
    Operator,
    OperatorBusy,
    StickerVisitor,
    Visitor,
    #[serde(other)]
    Unknown,
}

impl MessageKind {
    /// The public message type this kind surfaces as. Kinds internal to the
    /// server protocol (and unrecognized ones) have none and are dropped
    /// whole by the decoder.
    pub fn to_public(self) -> Option<MessageType> {
        match self {
            Self::ActionRequest => Some(MessageType::ActionRequest),
            Self::FileFromOperator => Some(MessageType::FileFromOperator),
            Self::FileFromVisitor => Some(MessageType::FileFromVisitor),
            Self::Info => Some(MessageType::Info),
            Self::Keyboard => Some(MessageType::Keyboard),
            Self::KeyboardResponse => Some(MessageType::KeyboardResponse),
            Self::Operator => Some(MessageType::Operator),
            Self::OperatorBusy => Some(MessageType::OperatorBusy),
            Self::StickerVisitor => Some(MessageType::StickerVisitor),
            Self::Visitor => Some(MessageType::Visitor),
            Self::ContactsRequest | Self::ForOperator | Self::Unknown => None,
        }
    }

    pub fn is_file(self) -> bool {
        matches!(self, Self::FileFromOperator | Self::FileFromVisitor)
    }

    pub fn is_from_operator(self) -> bool {
        matches!(self, Self::Operator | Self::FileFromOperator)
    }
}

/// One raw message record as delivered by the server, either in a history
/// page or on the live update channel. Every field is optional on the wire;
/// policy for absent fields lives in the decoder, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageItem {
    pub kind: Option<MessageKind>,
    #[serde(rename = "clientSideId")]
    pub client_side_id: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    #[serde(rename = "authorId", default, deserialize_with = "super::opt_string_or_number")]
    pub author_id: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<String>,
    /// Free-text body. For file kinds this is the serialized file descriptor,
    /// not display text.
    pub text: Option<String>,
    pub quote: Option<QuoteItem>,
    pub data: Option<Value>,
    #[serde(rename = "ts_m")]
    pub time_micros: Option<i64>,
    #[serde(rename = "ts")]
    pub time_seconds: Option<f64>,
    pub id: Option<String>,
    pub read: Option<bool>,
    #[serde(rename = "canBeEdited")]
    pub can_be_edited: Option<bool>,
    #[serde(rename = "canBeReplied")]
    pub can_be_replied: Option<bool>,
    pub edited: Option<bool>,
}

impl MessageItem {
    /// Server timestamp in microseconds. Old history records only carry
    /// whole seconds; scale those up.
    pub fn timestamp_micros(&self) -> Option<i64> {
        self.time_micros
            .or_else(|| self.time_seconds.map(|seconds| (seconds * 1_000_000.0) as i64))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteItem {
    pub state: Option<QuoteStateItem>,
    pub message: Option<QuotedMessageItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteStateItem {
    Pending,
    Filled,
    NotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotedMessageItem {
    pub id: Option<String>,
    #[serde(rename = "authorId", default, deserialize_with = "super::opt_string_or_number")]
    pub author_id: Option<String>,
    pub kind: Option<MessageKind>,
    pub name: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "ts")]
    pub time_seconds: Option<i64>,
}

/// File descriptor carried in the body text of file message records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileItem {
    pub client_content_type: Option<String>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
    pub guid: Option<String>,
    pub image: Option<FileImageItem>,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileImageItem {
    pub size: Option<FileImageSizeItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileImageSizeItem {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_tags_round_trip() {
        for (tag, kind) in [
            ("action_request", MessageKind::ActionRequest),
            ("contacts", MessageKind::ContactsRequest),
            ("file_operator", MessageKind::FileFromOperator),
            ("file_visitor", MessageKind::FileFromVisitor),
            ("for_operator", MessageKind::ForOperator),
            ("info", MessageKind::Info),
            ("keyboard", MessageKind::Keyboard),
            ("keyboard_response", MessageKind::KeyboardResponse),
            ("operator", MessageKind::Operator),
            ("operator_busy", MessageKind::OperatorBusy),
            ("sticker_visitor", MessageKind::StickerVisitor),
            ("visitor", MessageKind::Visitor),
        ] {
            let parsed: MessageKind = serde_json::from_value(json!(tag)).unwrap();
            assert_eq!(parsed, kind, "tag {tag}");
        }
    }

    #[test]
    fn unrecognized_kind_tag_parses_as_unknown() {
        let parsed: MessageKind = serde_json::from_value(json!("call_invitation")).unwrap();
        assert_eq!(parsed, MessageKind::Unknown);
    }

    #[test]
    fn internal_kinds_have_no_public_type() {
        assert_eq!(MessageKind::ContactsRequest.to_public(), None);
        assert_eq!(MessageKind::ForOperator.to_public(), None);
        assert_eq!(MessageKind::Unknown.to_public(), None);
        assert_eq!(
            MessageKind::Visitor.to_public(),
            Some(MessageType::Visitor)
        );
    }

    #[test]
    fn author_id_accepts_number_or_string() {
        let item: MessageItem =
            serde_json::from_value(json!({ "kind": "operator", "authorId": 2215 })).unwrap();
        assert_eq!(item.author_id.as_deref(), Some("2215"));

        let item: MessageItem =
            serde_json::from_value(json!({ "kind": "operator", "authorId": "2215" })).unwrap();
        assert_eq!(item.author_id.as_deref(), Some("2215"));

        let item: MessageItem = serde_json::from_value(json!({ "kind": "operator" })).unwrap();
        assert_eq!(item.author_id, None);
    }

    #[test]
    fn timestamp_prefers_micros_over_seconds() {
        let item: MessageItem =
            serde_json::from_value(json!({ "ts_m": 1_700_000_000_123_456i64, "ts": 1.0 }))
                .unwrap();
        assert_eq!(item.timestamp_micros(), Some(1_700_000_000_123_456));

        let item: MessageItem = serde_json::from_value(json!({ "ts": 1_700_000_000.5 })).unwrap();
        assert_eq!(item.timestamp_micros(), Some(1_700_000_000_500_000));

        let item: MessageItem = serde_json::from_value(json!({})).unwrap();
        assert_eq!(item.timestamp_micros(), None);
    }

    #[test]
    fn file_descriptor_parses_nested_image_size() {
        let file: FileItem = serde_json::from_value(json!({
            "content_type": "image/png",
            "filename": "photo.png",
            "guid": "aabbcc",
            "size": 10240,
            "image": { "size": { "width": 800, "height": 600 } }
        }))
        .unwrap();
        assert_eq!(file.guid.as_deref(), Some("aabbcc"));
        let size = file.image.unwrap().size.unwrap();
        assert_eq!((size.width, size.height), (Some(800), Some(600)));
    }
}
