use serde::{Deserialize, Serialize};

use crate::types::{
    Keyboard, KeyboardButton, KeyboardChoice, KeyboardResponse, KeyboardState, Sticker,
};

/// Nested payload of a `keyboard` record: the button grid a bot offered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardItem {
    pub buttons: Option<Vec<Vec<KeyboardButtonItem>>>,
    pub state: Option<KeyboardStateItem>,
    pub response: Option<KeyboardChoiceItem>,
}

impl KeyboardItem {
    /// Structural extraction; absent when the button grid or state is
    /// missing. Rows keep their order, malformed buttons are dropped.
    pub fn into_public(self) -> Option<Keyboard> {
        let state = self.state?.into_public();
        let buttons = self
            .buttons?
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .filter_map(KeyboardButtonItem::into_public)
                    .collect()
            })
            .collect();
        let response = self.response.and_then(KeyboardChoiceItem::into_public);
        Some(Keyboard {
            buttons,
            state,
            response,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardStateItem {
    Pending,
    Completed,
    Cancelled,
}

impl KeyboardStateItem {
    pub fn into_public(self) -> KeyboardState {
        match self {
            Self::Pending => KeyboardState::Pending,
            Self::Completed => KeyboardState::Completed,
            Self::Cancelled => KeyboardState::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardButtonItem {
    pub id: Option<String>,
    pub text: Option<String>,
}

impl KeyboardButtonItem {
    pub fn into_public(self) -> Option<KeyboardButton> {
        Some(KeyboardButton {
            id: self.id?,
            text: self.text?,
        })
    }
}

/// The choice recorded on a completed keyboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardChoiceItem {
    #[serde(rename = "buttonId")]
    pub button_id: Option<String>,
    #[serde(rename = "messageId")]
    pub message_id: Option<String>,
}

impl KeyboardChoiceItem {
    pub fn into_public(self) -> Option<KeyboardChoice> {
        Some(KeyboardChoice {
            button_id: self.button_id?,
            message_id: self.message_id?,
        })
    }
}

/// Nested payload of a `keyboard_response` record: which button the visitor
/// pressed, and on which keyboard message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardResponseItem {
    pub button: Option<KeyboardButtonItem>,
    pub request: Option<KeyboardRequestItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardRequestItem {
    #[serde(rename = "messageId")]
    pub message_id: Option<String>,
}

impl KeyboardResponseItem {
    pub fn into_public(self) -> Option<KeyboardResponse> {
        Some(KeyboardResponse {
            button: self.button?.into_public()?,
            message_id: self.request?.message_id?,
        })
    }
}

/// Nested payload of a `sticker_visitor` record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickerItem {
    #[serde(rename = "stickerId")]
    pub sticker_id: Option<i32>,
}

impl StickerItem {
    pub fn into_public(self) -> Option<Sticker> {
        Some(Sticker {
            sticker_id: self.sticker_id?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keyboard_extracts_grid_state_and_choice() {
        let item: KeyboardItem = serde_json::from_value(json!({
            "buttons": [
                [{ "id": "b1", "text": "Yes" }, { "id": "b2", "text": "No" }],
                [{ "id": "b3", "text": "Later" }]
            ],
            "state": "completed",
            "response": { "buttonId": "b1", "messageId": "m9" }
        }))
        .unwrap();

        let keyboard = item.into_public().unwrap();
        assert_eq!(keyboard.state, KeyboardState::Completed);
        assert_eq!(keyboard.buttons.len(), 2);
        assert_eq!(keyboard.buttons[0][1].text, "No");
        let choice = keyboard.response.unwrap();
        assert_eq!(choice.button_id, "b1");
        assert_eq!(choice.message_id, "m9");
    }

    #[test]
    fn keyboard_without_state_is_absent() {
        let item: KeyboardItem =
            serde_json::from_value(json!({ "buttons": [[{ "id": "b1", "text": "Yes" }]] }))
                .unwrap();
        assert!(item.into_public().is_none());
    }

    #[test]
    fn malformed_buttons_are_dropped_not_fatal() {
        let item: KeyboardItem = serde_json::from_value(json!({
            "buttons": [[{ "id": "b1" }, { "id": "b2", "text": "Ok" }]],
            "state": "pending"
        }))
        .unwrap();
        let keyboard = item.into_public().unwrap();
        assert_eq!(keyboard.buttons[0].len(), 1);
        assert_eq!(keyboard.buttons[0][0].id, "b2");
        assert!(keyboard.response.is_none());
    }

    #[test]
    fn keyboard_response_needs_button_and_request() {
        let item: KeyboardResponseItem = serde_json::from_value(json!({
            "button": { "id": "b2", "text": "No" },
            "request": { "messageId": "m4" }
        }))
        .unwrap();
        let response = item.into_public().unwrap();
        assert_eq!(response.button.id, "b2");
        assert_eq!(response.message_id, "m4");

        let item: KeyboardResponseItem =
            serde_json::from_value(json!({ "button": { "id": "b2", "text": "No" } })).unwrap();
        assert!(item.into_public().is_none());
    }

    #[test]
    fn sticker_needs_an_id() {
        let item: StickerItem = serde_json::from_value(json!({ "stickerId": 12 })).unwrap();
        assert_eq!(item.into_public(), Some(Sticker { sticker_id: 12 }));

        let item: StickerItem = serde_json::from_value(json!({})).unwrap();
        assert!(item.into_public().is_none());
    }
}
