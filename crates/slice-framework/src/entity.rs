//! # Resource Trait
//!
//! The `Resource` trait is the contract every domain record (Category, Product, Storage, …)
//! implements to be managed by the generic [`SliceActor`](crate::SliceActor) and fetched
//! through the generic [`HttpResourceClient`](crate::HttpResourceClient).
//!
//! # Architecture Note
//! Every entity of the admin follows the same pattern: a REST collection, a slice holding
//! the fetched snapshot, a table and an edit form. The only things that differ are the record
//! shape, the identifier field, the endpoint path and the labels. Those differences are
//! captured here as associated types and constants, so the slice, client and views are
//! written *once*.
//!
//! The `Input` associated type is the record without its identifier. Create and update
//! payloads are typed as `Input`, so the identifier cannot be serialized into a request body;
//! it only travels in the request path.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A record owned by the backing API and mirrored by a slice.
pub trait Resource: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Identifier assigned by the API. Immutable once created.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + Serialize + DeserializeOwned;

    /// The record's attributes without the identifier (create and update payload).
    type Input: Clone + Debug + Send + Sync + Serialize + 'static;

    /// Collection path below the API base URL (e.g. `categorias`).
    const ENDPOINT: &'static str;

    /// Name of the identifier field in the JSON representation (e.g. `idCategoria`).
    const ID_FIELD: &'static str;

    /// Human label used in notifications and dialogs.
    const LABEL: &'static str;

    /// Returns the API-assigned identifier.
    fn id(&self) -> &Self::Id;

    /// Strips the identifier, producing the payload an update would send.
    fn to_input(&self) -> Self::Input;
}

/// Short type name used as the `entity_type` field in logs.
pub(crate) fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
