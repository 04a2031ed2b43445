//! # ResourceApi Trait
//!
//! The seam between a slice and its transport. The production implementation is
//! [`HttpResourceClient`](crate::HttpResourceClient); tests plug in
//! [`MockApi`](crate::mock::MockApi) or a channel-driven API from [`mock`](crate::mock).

use crate::entity::Resource;
use crate::error::ApiError;
use async_trait::async_trait;

/// CRUD operations against one REST collection.
///
/// No retries, no paging: `list_all` always returns the full collection in server order.
#[async_trait]
pub trait ResourceApi<T: Resource>: Send + Sync {
    /// `GET /{endpoint}`
    async fn list_all(&self) -> Result<Vec<T>, ApiError>;

    /// `GET /{endpoint}/{id}`
    async fn get_by_id(&self, id: &T::Id) -> Result<T, ApiError>;

    /// `POST /{endpoint}`; the server assigns the identifier.
    async fn create(&self, input: &T::Input) -> Result<T, ApiError>;

    /// `PATCH /{endpoint}/{id}`; the identifier is never part of the body.
    async fn update(&self, id: &T::Id, input: &T::Input) -> Result<T, ApiError>;

    /// `DELETE /{endpoint}/{id}`
    async fn remove(&self, id: &T::Id) -> Result<(), ApiError>;
}
