//! Lookup client and transport seam.

use super::text::format_verse_text;
use log::{debug, warn};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://bible-api.com";
pub const DEFAULT_TRANSLATION: &str = "kjv";

/// Raw HTTP reply handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure (DNS, TLS, connection reset, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "lookup transport failed: {}", self.message)
    }
}

impl Error for TransportError {}

/// Blocking HTTP GET supplied by the embedding host.
pub trait LookupTransport {
    fn fetch(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// One per-verse entry of a service response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupVerseEntry {
    pub book_id: String,
    pub book_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// Service response body. Only `reference` and `text` are consumed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupResponse {
    pub reference: String,
    pub text: String,
    #[serde(default)]
    pub verses: Vec<LookupVerseEntry>,
    #[serde(default)]
    pub translation_id: Option<String>,
    #[serde(default)]
    pub translation_name: Option<String>,
}

impl LookupResponse {
    /// Normalized `{reference, text}` projection.
    pub fn to_verse_text(&self) -> VerseText {
        VerseText {
            reference: self.reference.clone(),
            text: format_verse_text(&self.text),
        }
    }
}

/// Normalized lookup result staged for adding to the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseText {
    pub reference: String,
    pub text: String,
}

/// Reference-based verse lookup over an injected transport.
pub struct LookupClient<T: LookupTransport> {
    transport: T,
    base_url: String,
    translation: String,
}

impl<T: LookupTransport> LookupClient<T> {
    /// Creates a client against the default public service.
    pub fn new(transport: T) -> Self {
        Self::with_base_url(transport, DEFAULT_LOOKUP_BASE_URL)
    }

    pub fn with_base_url(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            translation: DEFAULT_TRANSLATION.to_string(),
        }
    }

    /// Full request URL for a free-text reference.
    pub fn lookup_url(&self, query: &str) -> String {
        format!(
            "{}/{}?translation={}",
            self.base_url,
            encode_uri_component(query),
            self.translation
        )
    }

    /// Looks up a free-text reference such as `John 3:16`.
    ///
    /// Returns `None` for blank queries and for every failure mode.
    pub fn search(&self, query: &str) -> Option<VerseText> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let started_at = Instant::now();
        let url = self.lookup_url(query);
        let response = match self.transport.fetch(&url) {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    "event=verse_lookup module=lookup status=error duration_ms={} error_code=transport_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return None;
            }
        };

        if !response.is_success() {
            warn!(
                "event=verse_lookup module=lookup status=error duration_ms={} error_code=http_status http_status={}",
                started_at.elapsed().as_millis(),
                response.status
            );
            return None;
        }

        match serde_json::from_str::<LookupResponse>(&response.body) {
            Ok(decoded) => {
                debug!(
                    "event=verse_lookup module=lookup status=ok duration_ms={} verse_entries={}",
                    started_at.elapsed().as_millis(),
                    decoded.verses.len()
                );
                Some(decoded.to_verse_text())
            }
            Err(err) => {
                warn!(
                    "event=verse_lookup module=lookup status=error duration_ms={} error_code=decode_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                None
            }
        }
    }

    /// Looks up `<book> <chapter>:<verse>`; `verse` may be a range like `1-3`.
    pub fn get_verse(&self, book: &str, chapter: u32, verse: &str) -> Option<VerseText> {
        self.search(&format!("{book} {chapter}:{verse}"))
    }
}

/// Percent-encodes everything except the unreserved URI component set.
fn encode_uri_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(char::from(byte)),
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}
