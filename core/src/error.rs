//! Error types for the guest store client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the guest does not exist" from "the store returned an unexpected status."
//! All other non-2xx responses land in `Http` with the raw status code and
//! body for debugging. Configuration problems are a separate type so they can
//! be raised at construction time, before any request exists.

use thiserror::Error;

/// Problems with the store configuration, raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required setting was absent or empty.
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    /// A setting was present but cannot be used.
    #[error("malformed configuration value {field}: {reason}")]
    Malformed { field: &'static str, reason: String },
}

/// Errors returned by `RecordClient` and `GuestRepository`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The store returned 404: no record with that identifier.
    #[error("guest record not found")]
    NotFound,

    /// The identifier cannot be used as a record path segment.
    #[error("invalid record id: {0:?}")]
    InvalidRecordId(String),

    /// The store returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response, even after retries.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
