//! Outbound construction: provisional messages for content the visitor is
//! sending, and operator values from raw operator records.

use chrono::Utc;

use crate::items::OperatorItem;
use crate::types::{
    MessageId, MessageType, Operator, OperatorId, OutgoingMessage, Quote, QuoteState, Sticker,
};

/// Builds provisional [`OutgoingMessage`] values shown to the visitor while
/// the server is still acknowledging. The caller supplies the locally
/// generated id; once confirmed, the inbound path replaces the value.
pub struct MessageBuilder {
    server_url: String,
}

impl MessageBuilder {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
        }
    }

    /// Server this builder's messages are destined for.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn build_text(&self, id: MessageId, text: impl Into<String>) -> OutgoingMessage {
        OutgoingMessage {
            id,
            r#type: MessageType::Visitor,
            text: text.into(),
            timestamp: Utc::now(),
            quote: None,
            sticker: None,
        }
    }

    /// Text message replying to an earlier message. The quote stays pending
    /// until the server matches it against the real quoted message, so ids,
    /// timestamp and attachment are unknown here.
    pub fn build_text_with_quote(
        &self,
        id: MessageId,
        text: impl Into<String>,
        quoted_type: MessageType,
        quoted_author: impl Into<String>,
        quoted_text: impl Into<String>,
    ) -> OutgoingMessage {
        let quote = Quote {
            state: QuoteState::Pending,
            author_id: None,
            message_id: None,
            message_type: Some(quoted_type),
            sender_name: Some(quoted_author.into()),
            text: Some(quoted_text.into()),
            timestamp: None,
            attachment: None,
        };
        OutgoingMessage {
            id,
            r#type: MessageType::Visitor,
            text: text.into(),
            timestamp: Utc::now(),
            quote: Some(quote),
            sticker: None,
        }
    }

    /// File upload in progress; the text slot carries the file name until
    /// the confirmed message brings the resolved attachment.
    pub fn build_file(&self, id: MessageId, file_name: impl Into<String>) -> OutgoingMessage {
        OutgoingMessage {
            id,
            r#type: MessageType::FileFromVisitor,
            text: file_name.into(),
            timestamp: Utc::now(),
            quote: None,
            sticker: None,
        }
    }

    pub fn build_sticker(&self, id: MessageId, sticker_id: i32) -> OutgoingMessage {
        OutgoingMessage {
            id,
            r#type: MessageType::StickerVisitor,
            text: String::new(),
            timestamp: Utc::now(),
            quote: None,
            sticker: Some(Sticker { sticker_id }),
        }
    }
}

/// Builds [`Operator`] values from raw operator records.
pub struct OperatorBuilder {
    server_url: String,
}

impl OperatorBuilder {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
        }
    }

    /// Absent in, absent out; a record without an id is dropped too.
    pub fn build_operator(&self, item: Option<&OperatorItem>) -> Option<Operator> {
        let item = item?;
        let id = item.id.clone()?;
        Some(Operator {
            id: OperatorId::from(id),
            name: item.fullname.clone().unwrap_or_default(),
            avatar_url: item
                .avatar
                .as_ref()
                .map(|path| format!("{}{path}", self.server_url)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_text_is_a_plain_pending_visitor_message() {
        let builder = MessageBuilder::new("https://x.test");
        let before = Utc::now();
        let message = builder.build_text(MessageId::from("local-1"), "hello");
        let after = Utc::now();

        assert_eq!(message.id, MessageId::from("local-1"));
        assert_eq!(message.r#type, MessageType::Visitor);
        assert_eq!(message.text, "hello");
        assert!(message.quote.is_none());
        assert!(message.sticker.is_none());
        assert!(before <= message.timestamp && message.timestamp <= after);
    }

    #[test]
    fn build_text_with_quote_carries_a_pending_quote() {
        let builder = MessageBuilder::new("https://x.test");
        let message = builder.build_text_with_quote(
            MessageId::from("local-2"),
            "reply",
            MessageType::Visitor,
            "Alice",
            "prev msg",
        );

        let quote = message.quote.unwrap();
        assert_eq!(quote.state, QuoteState::Pending);
        assert_eq!(quote.sender_name.as_deref(), Some("Alice"));
        assert_eq!(quote.text.as_deref(), Some("prev msg"));
        assert_eq!(quote.message_type, Some(MessageType::Visitor));
        assert!(quote.author_id.is_none());
        assert!(quote.message_id.is_none());
        assert!(quote.timestamp.is_none());
        assert!(quote.attachment.is_none());
    }

    #[test]
    fn build_file_uses_the_file_name_as_text() {
        let builder = MessageBuilder::new("https://x.test");
        let message = builder.build_file(MessageId::from("local-3"), "photo.png");
        assert_eq!(message.r#type, MessageType::FileFromVisitor);
        assert_eq!(message.text, "photo.png");
    }

    #[test]
    fn build_sticker_carries_the_sticker_and_no_text() {
        let builder = MessageBuilder::new("https://x.test");
        let message = builder.build_sticker(MessageId::from("local-4"), 5);
        assert_eq!(message.r#type, MessageType::StickerVisitor);
        assert_eq!(message.text, "");
        assert_eq!(message.sticker, Some(Sticker { sticker_id: 5 }));
    }

    #[test]
    fn operator_avatar_resolves_against_the_server_url() {
        let builder = OperatorBuilder::new("https://x.test");
        let item: OperatorItem =
            serde_json::from_value(json!({ "id": 9, "fullname": "Eve", "avatar": "/av.png" }))
                .unwrap();

        let operator = builder.build_operator(Some(&item)).unwrap();
        assert_eq!(operator.id, OperatorId::from("9"));
        assert_eq!(operator.name, "Eve");
        assert_eq!(operator.avatar_url.as_deref(), Some("https://x.test/av.png"));
    }

    #[test]
    fn operator_without_avatar_or_record_stays_absent() {
        let builder = OperatorBuilder::new("https://x.test");
        assert!(builder.build_operator(None).is_none());

        let item: OperatorItem = serde_json::from_value(json!({ "id": "9" })).unwrap();
        let operator = builder.build_operator(Some(&item)).unwrap();
        assert_eq!(operator.name, "");
        assert!(operator.avatar_url.is_none());

        let item: OperatorItem = serde_json::from_value(json!({ "fullname": "NoId" })).unwrap();
        assert!(builder.build_operator(Some(&item)).is_none());
    }
}
