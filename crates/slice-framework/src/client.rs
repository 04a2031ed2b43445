//! # Slice Client
//!
//! The handle views hold to talk to a [`SliceActor`](crate::SliceActor).

use crate::entity::Resource;
use crate::error::SliceError;
use crate::message::{SliceRequest, Write, Written};
use crate::state::SliceState;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, instrument};

/// A type-safe, cloneable handle to one slice.
///
/// * **Async operations** (`fetch_all`, `fetch_one`, `select`, `create`, `update`, `delete`)
///   go through the actor and resolve to `Result<…, SliceError>`.
/// * **State reads** (`state`, `subscribe`) go straight to the published snapshot and never
///   wait on the actor.
pub struct SliceClient<T: Resource> {
    sender: mpsc::Sender<SliceRequest<T>>,
    watcher: watch::Receiver<SliceState<T>>,
}

impl<T: Resource> Clone for SliceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            watcher: self.watcher.clone(),
        }
    }
}

impl<T: Resource> SliceClient<T> {
    pub fn new(
        sender: mpsc::Sender<SliceRequest<T>>,
        watcher: watch::Receiver<SliceState<T>>,
    ) -> Self {
        Self { sender, watcher }
    }

    /// Current snapshot of the slice.
    pub fn state(&self) -> SliceState<T> {
        self.watcher.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SliceState<T>> {
        self.watcher.clone()
    }

    /// Replaces `items` with the full collection from the API.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<T>, SliceError> {
        debug!("Sending request");
        self.request(|respond_to| SliceRequest::FetchAll { respond_to })
            .await
    }

    /// Loads one record and makes it the selection, whether or not it is in `items`.
    #[instrument(skip(self))]
    pub async fn fetch_one(&self, id: T::Id) -> Result<T, SliceError> {
        debug!("Sending request");
        self.request(|respond_to| SliceRequest::FetchOne { id, respond_to })
            .await
    }

    /// Selects the record with `id` from the current collection, or clears the selection.
    ///
    /// Resolves to the new selection; an unknown `id` selects nothing.
    #[instrument(skip(self))]
    pub async fn select(&self, id: Option<T::Id>) -> Result<Option<T>, SliceError> {
        debug!("Sending request");
        self.request(|respond_to| SliceRequest::Select { id, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: T::Input) -> Result<T, SliceError> {
        debug!("Sending request");
        match self.write(Write::Create(input)).await? {
            Written::Created(item) => Ok(item),
            other => Err(mismatched("create", &other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: T::Id, input: T::Input) -> Result<T, SliceError> {
        debug!("Sending request");
        match self.write(Write::Update(id, input)).await? {
            Written::Updated(item) => Ok(item),
            other => Err(mismatched("update", &other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: T::Id) -> Result<(), SliceError> {
        debug!("Sending request");
        match self.write(Write::Delete(id)).await? {
            Written::Deleted(_) => Ok(()),
            other => Err(mismatched("delete", &other)),
        }
    }

    async fn write(&self, write: Write<T>) -> Result<Written<T>, SliceError> {
        self.request(|respond_to| SliceRequest::Write { write, respond_to })
            .await
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, SliceError>>) -> SliceRequest<T>,
    ) -> Result<R, SliceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| SliceError::ActorClosed)?;
        response.await.map_err(|_| SliceError::ActorDropped)?
    }
}

// The actor answers a write with the matching variant; anything else means it broke protocol.
fn mismatched<T: Resource>(verb: &'static str, written: &Written<T>) -> SliceError {
    error!(verb, ?written, "Actor answered write with another variant");
    SliceError::ActorDropped
}
