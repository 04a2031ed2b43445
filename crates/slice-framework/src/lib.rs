//! # Slice Framework
//!
//! Generic building blocks for REST-backed admin screens: one implementation of the
//! "collection slice + table + edit panel" pattern, parameterized by entity.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`Resource`]) - record shape, identifier, endpoint and labels
//! 2. **Transport Layer** ([`ResourceApi`], [`HttpResourceClient`]) - uniform CRUD over HTTP
//! 3. **State Layer** ([`SliceActor`], [`SliceClient`]) - one actor per resource owning the
//!    collection snapshot and the selection
//! 4. **View Layer** ([`view`]) - headless table, panel and row menu models
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use slice_framework::{HttpConfig, HttpTransport, MemoryCredentials, SliceActor, TracingNotifier};
//! use std::sync::Arc;
//!
//! let transport = HttpTransport::new(
//!     HttpConfig::new("http://localhost:3001/api"),
//!     Arc::new(MemoryCredentials::new(Some(token))),
//! )?;
//! let (actor, categories) =
//!     SliceActor::<Category>::new(Arc::new(transport.client()), Arc::new(TracingNotifier), 32);
//! tokio::spawn(actor.run());
//!
//! categories.fetch_all().await?;
//! categories.select(Some(CategoryId(1))).await?;
//! ```
//!
//! ## Concurrency Model
//!
//! - Each slice runs in its own Tokio task and applies state changes sequentially
//! - API calls run in spawned tasks; their results re-enter the slice loop as messages
//! - Fetch-all responses are generation-stamped; stale ones are discarded
//! - Slices share nothing but the HTTP connection pool and the credential store
//!
//! ## Testing
//!
//! See [`mock`] for [`MockApi`](mock::MockApi) and the channel-driven API used to control
//! response ordering.

pub mod actor;
pub mod api;
pub mod client;
pub mod credentials;
pub mod entity;
pub mod error;
pub mod http;
pub mod message;
pub mod mock;
pub mod notify;
pub mod state;
pub mod tracing;
pub mod view;

// Re-export core types for convenience
pub use actor::SliceActor;
pub use api::ResourceApi;
pub use client::SliceClient;
pub use credentials::{CredentialStore, FileCredentials, MemoryCredentials, DEFAULT_TOKEN_KEY};
pub use entity::Resource;
pub use error::{ApiError, SliceError};
pub use http::{HttpConfig, HttpResourceClient, HttpTransport};
pub use message::{Response, SliceRequest, Write, Written};
pub use notify::{BroadcastNotifier, Level, Notification, Notifier, TracingNotifier};
pub use state::{select_by_id, LoadStatus, SliceState};
