//! # Slice Messages
//!
//! Messages exchanged between [`SliceClient`](crate::SliceClient) and
//! [`SliceActor`](crate::SliceActor).
//!
//! [`SliceRequest`] is what callers send. [`Completion`] is what spawned API calls send back
//! into the actor loop once the network round-trip resolves; the actor applies it to its state
//! sequentially, so state is only ever touched from the loop.

use crate::entity::Resource;
use crate::error::{ApiError, SliceError};
use tokio::sync::oneshot;

/// One-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, SliceError>>;

/// A write against the API.
#[derive(Debug)]
pub enum Write<T: Resource> {
    Create(T::Input),
    Update(T::Id, T::Input),
    Delete(T::Id),
}

impl<T: Resource> Write<T> {
    pub(crate) fn verb(&self) -> &'static str {
        match self {
            Write::Create(_) => "crear",
            Write::Update(..) => "actualizar",
            Write::Delete(_) => "eliminar",
        }
    }
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub enum Written<T: Resource> {
    Created(T),
    Updated(T),
    Deleted(T::Id),
}

impl<T: Resource> Written<T> {
    pub(crate) fn past_participle(&self) -> &'static str {
        match self {
            Written::Created(_) => "creado",
            Written::Updated(_) => "actualizado",
            Written::Deleted(_) => "eliminado",
        }
    }
}

/// Requests handled by the slice actor.
#[derive(Debug)]
pub enum SliceRequest<T: Resource> {
    FetchAll {
        respond_to: Response<Vec<T>>,
    },
    FetchOne {
        id: T::Id,
        respond_to: Response<T>,
    },
    Select {
        id: Option<T::Id>,
        respond_to: Response<Option<T>>,
    },
    Write {
        write: Write<T>,
        respond_to: Response<Written<T>>,
    },
}

/// Who is waiting for a fetch-all to land.
#[derive(Debug)]
pub(crate) enum FetchWaiter<T: Resource> {
    /// A direct `fetch_all` caller.
    Caller(Response<Vec<T>>),
    /// A write that answers its caller once the follow-up refresh resolved.
    AfterWrite(Written<T>, Response<Written<T>>),
}

/// Results of spawned API calls, fed back into the actor loop.
#[derive(Debug)]
pub(crate) enum Completion<T: Resource> {
    Fetched {
        generation: u64,
        result: Result<Vec<T>, ApiError>,
        waiter: FetchWaiter<T>,
    },
    FetchedOne {
        id: T::Id,
        result: Result<T, ApiError>,
        respond_to: Response<T>,
    },
    Written {
        verb: &'static str,
        result: Result<Written<T>, ApiError>,
        respond_to: Response<Written<T>>,
    },
}
