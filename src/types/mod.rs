pub mod message;
pub mod operator;

pub use message::{
    Attachment, FileInfo, ImageInfo, Keyboard, KeyboardButton, KeyboardChoice, KeyboardResponse,
    KeyboardState, Message, MessageId, MessageType, OutgoingMessage, Quote, QuoteState, Sticker,
};
pub use operator::{Operator, OperatorId};
