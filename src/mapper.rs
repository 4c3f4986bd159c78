//! Batch mapping of wire records into domain messages.
//!
//! Two fixed strategies exist, one per delivery channel: [`HistoryMapper`]
//! for backlog pages and [`LiveMapper`] for the realtime stream. They share
//! everything but the history flag, which controls nested-payload parsing
//! tolerance. The media resolver can be bound after construction because
//! session credentials only exist once the handshake is done.

use std::sync::{Arc, OnceLock};

use crate::items::MessageItem;
use crate::media::MediaResolver;
use crate::parsing::decode_message;
use crate::types::Message;

pub trait MessageMapper: Send + Sync {
    /// Decode one record. `None` means the record kind is not representable
    /// as a public message and must be skipped.
    ///
    /// # Panics
    /// Panics if no media resolver has been bound yet.
    fn map_one(&self, item: &MessageItem) -> Option<Message>;

    /// Bind the media resolver, exactly once, before any mapping happens.
    ///
    /// # Panics
    /// Panics if a resolver is already bound.
    fn bind_media(&self, media: Arc<dyn MediaResolver>);

    /// Decode a batch. Undecodable records are dropped; the survivors keep
    /// the input order. Never reorders, never deduplicates.
    fn map_many(&self, items: &[MessageItem]) -> Vec<Message> {
        items.iter().filter_map(|item| self.map_one(item)).collect()
    }
}

struct MapperCore {
    server_url: String,
    media: OnceLock<Arc<dyn MediaResolver>>,
}

impl MapperCore {
    fn new(server_url: String, media: Option<Arc<dyn MediaResolver>>) -> Self {
        let slot = OnceLock::new();
        if let Some(media) = media {
            let _ = slot.set(media);
        }
        Self {
            server_url,
            media: slot,
        }
    }

    fn bind(&self, media: Arc<dyn MediaResolver>) {
        if self.media.set(media).is_err() {
            panic!("Media resolver already bound");
        }
    }

    fn map(&self, is_history: bool, item: &MessageItem) -> Option<Message> {
        let media = self
            .media
            .get()
            .expect("Media resolver must be bound before mapping");
        decode_message(&self.server_url, is_history, item, media.as_ref())
    }
}

/// Maps records fetched from the history backlog.
pub struct HistoryMapper {
    core: MapperCore,
}

impl HistoryMapper {
    /// Mapper without a resolver; [`MessageMapper::bind_media`] must be
    /// called before the first record is mapped.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            core: MapperCore::new(server_url.into(), None),
        }
    }

    pub fn with_media(server_url: impl Into<String>, media: Arc<dyn MediaResolver>) -> Self {
        Self {
            core: MapperCore::new(server_url.into(), Some(media)),
        }
    }
}

impl MessageMapper for HistoryMapper {
    fn map_one(&self, item: &MessageItem) -> Option<Message> {
        self.core.map(true, item)
    }

    fn bind_media(&self, media: Arc<dyn MediaResolver>) {
        self.core.bind(media);
    }
}

/// Maps records delivered on the live update channel.
pub struct LiveMapper {
    core: MapperCore,
}

impl LiveMapper {
    /// Mapper without a resolver; [`MessageMapper::bind_media`] must be
    /// called before the first record is mapped.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            core: MapperCore::new(server_url.into(), None),
        }
    }

    pub fn with_media(server_url: impl Into<String>, media: Arc<dyn MediaResolver>) -> Self {
        Self {
            core: MapperCore::new(server_url.into(), Some(media)),
        }
    }
}

impl MessageMapper for LiveMapper {
    fn map_one(&self, item: &MessageItem) -> Option<Message> {
        self.core.map(false, item)
    }

    fn bind_media(&self, media: Arc<dyn MediaResolver>) {
        self.core.bind(media);
    }
}
