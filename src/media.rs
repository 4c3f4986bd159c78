//! Attachment and quote resolution.
//!
//! File records carry their file descriptor as serialized JSON in the record
//! body. Resolving it means parsing that descriptor and constructing an
//! expiring, HMAC-signed download URL from the session credentials. The
//! decoder consumes this through [`MediaResolver`] so the session wiring
//! stays outside the decode path.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::items::{FileItem, MessageItem, QuoteItem, QuoteStateItem};
use crate::types::{Attachment, FileInfo, ImageInfo, Quote, QuoteState};

type HmacSha256 = Hmac<Sha256>;

/// How long a signed download link stays valid.
const URL_EXPIRY_SECS: i64 = 5 * 60;

/// Resolves record sub-structures that need session context: attachments on
/// file records and embedded quotes. Implementations must tolerate any input;
/// failure is expressed as absence, never as an error.
pub trait MediaResolver: Send + Sync {
    fn resolve_attachment(&self, server_url: &str, item: &MessageItem) -> Option<Attachment>;
    fn resolve_quote(&self, server_url: &str, quote: &QuoteItem) -> Option<Quote>;
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("malformed file descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),

    #[error("file descriptor is missing the {0} field")]
    IncompleteDescriptor(&'static str),

    #[error("session has no auth token to sign the URL with")]
    MissingAuthToken,
}

/// Session credentials for signing download URLs, produced by the session
/// layer once the server handshake completes.
#[derive(Debug, Clone, Default)]
pub struct SessionAuth {
    pub page_id: String,
    pub auth_token: Option<String>,
}

/// Production [`MediaResolver`]: parses file descriptors out of record
/// bodies and signs download URLs with the session auth token.
pub struct SignedMediaResolver {
    auth: SessionAuth,
    expiry: Duration,
}

impl SignedMediaResolver {
    pub fn new(auth: SessionAuth) -> Self {
        Self {
            auth,
            expiry: Duration::seconds(URL_EXPIRY_SECS),
        }
    }

    pub fn with_expiry(auth: SessionAuth, expiry: Duration) -> Self {
        Self { auth, expiry }
    }

    fn file_info(&self, server_url: &str, descriptor: &str) -> Result<FileInfo, MediaError> {
        let file: FileItem = serde_json::from_str(descriptor)?;
        let guid = file
            .guid
            .ok_or(MediaError::IncompleteDescriptor("guid"))?;
        let file_name = file
            .filename
            .ok_or(MediaError::IncompleteDescriptor("filename"))?;
        let url = self.sign_download_url(server_url, &guid, &file_name, Utc::now())?;

        Ok(FileInfo {
            content_type: file.content_type.or(file.client_content_type),
            file_name,
            size: file.size.unwrap_or(0),
            url: Some(url),
            image_info: file.image.and_then(|image| image.size).map(|size| ImageInfo {
                width: size.width.unwrap_or(0),
                height: size.height.unwrap_or(0),
            }),
        })
    }

    /// The link the server accepts: guid and file name in the path, page id,
    /// expiry and an HMAC-SHA256 of `guid + expires` (keyed with the auth
    /// token) in the query.
    fn sign_download_url(
        &self,
        server_url: &str,
        guid: &str,
        file_name: &str,
        now: DateTime<Utc>,
    ) -> Result<String, MediaError> {
        let token = self
            .auth
            .auth_token
            .as_deref()
            .ok_or(MediaError::MissingAuthToken)?;
        let expires = (now + self.expiry).timestamp();

        let mut mac = HmacSha256::new_from_slice(token.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(guid.as_bytes());
        mac.update(expires.to_string().as_bytes());
        let hash = hex::encode(mac.finalize().into_bytes());

        Ok(format!(
            "{server_url}/l/v/m/download/{guid}/{}?page-id={}&expires={expires}&hash={hash}",
            urlencoding::encode(file_name),
            self.auth.page_id,
        ))
    }
}

impl MediaResolver for SignedMediaResolver {
    fn resolve_attachment(&self, server_url: &str, item: &MessageItem) -> Option<Attachment> {
        if !item.kind.is_some_and(|kind| kind.is_file()) {
            return None;
        }
        let descriptor = item.text.as_deref()?;
        match self.file_info(server_url, descriptor) {
            Ok(file_info) => Some(Attachment { file_info }),
            Err(e) => {
                log::debug!("Leaving attachment unresolved for {:?}: {e}", item.id);
                None
            }
        }
    }

    fn resolve_quote(&self, server_url: &str, quote: &QuoteItem) -> Option<Quote> {
        let state = quote.state?;
        let message = quote.message.as_ref();
        let quoted_kind = message.and_then(|quoted| quoted.kind);

        let mut text = message.and_then(|quoted| quoted.text.clone());
        let mut attachment = None;
        if state == QuoteStateItem::Filled
            && quoted_kind.is_some_and(|kind| kind.is_file())
            && let Some(descriptor) = message.and_then(|quoted| quoted.text.as_deref())
        {
            match self.file_info(server_url, descriptor) {
                Ok(file_info) => {
                    text = Some(file_info.file_name.clone());
                    attachment = Some(file_info);
                }
                Err(e) => {
                    log::debug!("Leaving quoted attachment unresolved: {e}");
                    text = None;
                }
            }
        }

        Some(Quote {
            state: match state {
                QuoteStateItem::Pending => QuoteState::Pending,
                QuoteStateItem::Filled => QuoteState::Filled,
                QuoteStateItem::NotFound => QuoteState::NotFound,
            },
            author_id: message.and_then(|quoted| quoted.author_id.clone()),
            message_id: message.and_then(|quoted| quoted.id.clone()),
            message_type: quoted_kind.and_then(|kind| kind.to_public()),
            sender_name: message.and_then(|quoted| quoted.name.clone()),
            text,
            timestamp: message
                .and_then(|quoted| quoted.time_seconds)
                .and_then(|seconds| DateTime::from_timestamp(seconds, 0)),
            attachment,
        })
    }
}
