//! Inbound and outbound message normalization for an in-site visitor chat.
//!
//! Raw server records ([`items`]) are decoded into the stable domain model
//! ([`types`]) by per-channel mappers; outbound builders produce provisional
//! messages for content the visitor is still sending. Transport, session
//! handling and storage live outside this crate.

pub mod items;
pub mod mapper;
pub mod media;
pub mod outbound;
pub mod parsing;
pub mod types;

pub use mapper::{HistoryMapper, LiveMapper, MessageMapper};
pub use media::{MediaResolver, SessionAuth, SignedMediaResolver};
pub use outbound::{MessageBuilder, OperatorBuilder};
