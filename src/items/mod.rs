use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod keyboard;
pub mod message;
pub mod operator;

pub use keyboard::{
    KeyboardButtonItem, KeyboardChoiceItem, KeyboardItem, KeyboardRequestItem,
    KeyboardResponseItem, KeyboardStateItem, StickerItem,
};
pub use message::{
    FileImageItem, FileImageSizeItem, FileItem, MessageItem, MessageKind, QuoteItem,
    QuoteStateItem, QuotedMessageItem,
};
pub use operator::OperatorItem;

/// Decode a nested payload out of a retained record value. History pages may
/// deliver the payload re-encoded as a JSON string; one such layer is
/// unwrapped before decoding. Malformed payloads are discarded, never an
/// error.
pub fn parse_payload<T>(payload: &Value, is_history: bool) -> Option<T>
where
    T: DeserializeOwned,
{
    let unwrapped;
    let payload = if is_history && let Value::String(raw) = payload {
        unwrapped = match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("Discarding double-encoded payload: {e}");
                return None;
            }
        };
        &unwrapped
    } else {
        payload
    };

    match T::deserialize(payload) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::debug!("Discarding malformed nested payload: {e}");
            None
        }
    }
}

/// Ids come off the wire as either JSON numbers or strings depending on the
/// server version; normalize both to strings.
pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}
