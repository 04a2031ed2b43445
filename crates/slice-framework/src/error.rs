//! # Framework Errors
//!
//! Error types shared by the resource client, the slice and the views.
//!
//! - [`ApiError`] is what the transport reports (one variant per failure class of the API).
//! - [`SliceError`] is what slice callers see: either the actor is gone, a fetch was
//!   superseded by a newer one, or the API call itself failed.

use reqwest::StatusCode;

/// Failures reported by a [`ResourceApi`](crate::ResourceApi).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request did not complete (connection refused, timeout, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The API rejected the credentials (missing, invalid or expired token).
    #[error("Authentication rejected ({status})")]
    Auth { status: StatusCode },

    /// The single-record target does not exist.
    #[error("Not found: {id}")]
    NotFound { id: String },

    /// The API rejected the payload shape.
    #[error("Validation failed ({status}): {body}")]
    Validation { status: StatusCode, body: String },

    /// No token in the credential store; the write was not sent.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// The response body was not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid API base URL: {0:?}")]
    InvalidBaseUrl(String),
}

/// Errors returned to callers of a [`SliceClient`](crate::SliceClient).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SliceError {
    #[error("Slice actor closed")]
    ActorClosed,
    #[error("Slice actor dropped response channel")]
    ActorDropped,
    /// A newer fetch-all was issued before this one resolved; its response was discarded.
    #[error("Fetch superseded by a newer request")]
    Superseded,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SliceError {
    /// True when a write was refused locally because no token was present.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, SliceError::Api(ApiError::Unauthenticated))
    }
}
