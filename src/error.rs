// src/error.rs
// =============================================================================
// Errors produced by the gallery modules.
//
// A non-success HTTP status is NOT an error here: it is logged and the body is
// still decoded. Only these conditions stop a fetch:
// - the configured API base is not a usable URL
// - the HTTP client could not be built
// - the request never produced a response (DNS, TLS, timeout, ...)
// - the body could not be decoded into the expected shape
//
// The binary wraps these in anyhow at its top level.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// A configured or received URL could not be parsed
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The API base parses but cannot carry path segments (e.g. `mailto:`)
    #[error("URL cannot be used as an API base: {0}")]
    NotABase(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// No response was received
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived but its body is not the JSON we expected
    #[error("unexpected response from {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, GalleryError>;
