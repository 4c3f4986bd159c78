//! Record decoding: turning one raw wire record into a domain message.
//!
//! A record can carry plain text, a file attachment, an embedded quote, an
//! interactive keyboard, a keyboard response, or a sticker, each in a
//! different place. The decoder normalizes them all into [`Message`] and
//! drops records whose kind is internal to the server protocol or unknown.

use serde_json::Value;

use crate::items::{
    self, KeyboardItem, KeyboardResponseItem, MessageItem, MessageKind, StickerItem,
};
use crate::media::MediaResolver;
use crate::types::{Message, MessageId, OperatorId};

/// Decode a single record. `None` means the record is not representable as a
/// public message; nothing partial ever comes back.
pub fn decode_message(
    server_url: &str,
    is_history: bool,
    item: &MessageItem,
    media: &dyn MediaResolver,
) -> Option<Message> {
    let kind = item.kind?;
    let r#type = kind.to_public()?;

    let (text, attachment) = if kind.is_file() {
        // Body text of a file record is the descriptor, not display text;
        // display text becomes the file name once resolved.
        match media.resolve_attachment(server_url, item) {
            Some(attachment) => (attachment.file_info.file_name.clone(), Some(attachment)),
            None => (String::new(), None),
        }
    } else {
        (item.text.clone().unwrap_or_default(), None)
    };

    let quote = item
        .quote
        .as_ref()
        .and_then(|quote| media.resolve_quote(server_url, quote));

    // Payload retained for nested decoding and for raw_text, by fixed
    // priority: file records keep the whole record, quoted records keep the
    // quote payload, everything else keeps the auxiliary data field.
    let payload: Option<Value> = if kind.is_file() {
        serde_json::to_value(item).ok()
    } else if quote.is_some() {
        item.quote
            .as_ref()
            .and_then(|quote| serde_json::to_value(quote).ok())
    } else {
        item.data.clone()
    };

    let mut keyboard = None;
    let mut keyboard_response = None;
    let mut sticker = None;
    if let Some(payload) = payload.as_ref() {
        match kind {
            MessageKind::Keyboard => {
                keyboard = items::parse_payload::<KeyboardItem>(payload, is_history)
                    .and_then(KeyboardItem::into_public);
            }
            MessageKind::KeyboardResponse => {
                keyboard_response = items::parse_payload::<KeyboardResponseItem>(payload, is_history)
                    .and_then(KeyboardResponseItem::into_public);
            }
            MessageKind::StickerVisitor => {
                sticker = items::parse_payload::<StickerItem>(payload, is_history)
                    .and_then(StickerItem::into_public);
            }
            _ => {}
        }
    }

    let raw_text = payload.as_ref().map(Value::to_string);

    // Records the client never originated have no client-side id; the
    // server-assigned id is the stable one for those.
    let id = item
        .client_side_id
        .clone()
        .or_else(|| item.id.clone())
        .unwrap_or_default();

    let operator_id = if kind.is_from_operator() {
        item.author_id.clone().map(OperatorId::from)
    } else {
        None
    };

    Some(Message {
        id: MessageId::from(id),
        session_id: item.session_id.clone(),
        operator_id,
        sender_name: item.name.clone().unwrap_or_default(),
        sender_avatar_url: item
            .avatar
            .as_ref()
            .map(|path| format!("{server_url}{path}")),
        r#type,
        text,
        timestamp: chrono::DateTime::from_timestamp_micros(item.timestamp_micros().unwrap_or(0))
            .unwrap_or_default(),
        server_side_id: item.id.clone(),
        raw_text,
        is_history,
        attachment,
        read: item.read.unwrap_or(false),
        can_be_edited: item.can_be_edited.unwrap_or(false),
        can_be_replied: item.can_be_replied.unwrap_or(false),
        edited: item.edited.unwrap_or(false),
        quote,
        keyboard,
        keyboard_response,
        sticker,
    })
}
