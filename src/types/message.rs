use std::fmt;

use chrono::{DateTime, Utc};

use crate::types::operator::OperatorId;

/// Stable identity of a message within a chat. Visitor messages keep the id
/// the client assigned at send time, everything else gets the server one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MessageId(String);

impl MessageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for MessageId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    ActionRequest,
    FileFromOperator,
    FileFromVisitor,
    Info,
    Keyboard,
    KeyboardResponse,
    Operator,
    OperatorBusy,
    StickerVisitor,
    Visitor,
}

/// A normalized chat message. Values are immutable snapshots; an edit or a
/// read-state change arrives as a fresh value under the same [`MessageId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub session_id: Option<String>,
    pub operator_id: Option<OperatorId>,
    pub sender_name: String,
    pub sender_avatar_url: Option<String>,
    pub r#type: MessageType,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub server_side_id: Option<String>,
    /// Serialized source payload, kept so downstream layers can re-decode
    /// kind-specific structure without the original record.
    pub raw_text: Option<String>,
    pub is_history: bool,
    pub attachment: Option<Attachment>,
    pub read: bool,
    pub can_be_edited: bool,
    pub can_be_replied: bool,
    pub edited: bool,
    pub quote: Option<Quote>,
    pub keyboard: Option<Keyboard>,
    pub keyboard_response: Option<KeyboardResponse>,
    pub sticker: Option<Sticker>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_info: FileInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub content_type: Option<String>,
    pub file_name: String,
    pub size: u64,
    /// Expiring signed download URL. Absent when the session could not sign.
    pub url: Option<String>,
    pub image_info: Option<ImageInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteState {
    Pending,
    Filled,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub state: QuoteState,
    pub author_id: Option<String>,
    pub message_id: Option<String>,
    pub message_type: Option<MessageType>,
    pub sender_name: Option<String>,
    pub text: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    /// File description of the quoted message, for quotes of file messages.
    pub attachment: Option<FileInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardState {
    Pending,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub buttons: Vec<Vec<KeyboardButton>>,
    pub state: KeyboardState,
    /// The choice already made, for keyboards that are no longer pending.
    pub response: Option<KeyboardChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardChoice {
    pub button_id: String,
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardResponse {
    pub button: KeyboardButton,
    pub message_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sticker {
    pub sticker_id: i32,
}

/// A message the visitor is sending, before the server has acknowledged it.
/// Confirmed messages come back through the inbound path as [`Message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub id: MessageId,
    pub r#type: MessageType,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub quote: Option<Quote>,
    pub sticker: Option<Sticker>,
}
