//! # Mock APIs
//!
//! Test doubles for [`ResourceApi`], so slices and views can be exercised without a server.
//!
//! - [`MockApi`] answers from a queue of expectations and records every call (payloads as
//!   JSON, so tests can assert what would have gone over the wire).
//! - [`create_mock_api`] returns an API whose calls arrive on a channel the test controls.
//!   Helpers like [`expect_list_all`] hand back the responder, so the test decides *when*
//!   and *in which order* calls resolve.

use crate::api::ResourceApi;
use crate::entity::Resource;
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: Resource> {
    ListAll(Result<Vec<T>, ApiError>),
    Get(T::Id, Result<T, ApiError>),
    Create(Result<T, ApiError>),
    Update(T::Id, Result<T, ApiError>),
    Remove(T::Id, Result<(), ApiError>),
}

/// A call received by a [`MockApi`]. Payloads are recorded as the JSON that would be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall<Id> {
    ListAll,
    Get(Id),
    Create(Value),
    Update(Id, Value),
    Remove(Id),
}

/// An API answering from queued expectations.
///
/// # Example
/// ```ignore
/// let mock = MockApi::<Category>::new();
/// mock.expect_list_all().return_ok(vec![lacteos()]);
///
/// let (actor, slice) = SliceActor::new(Arc::new(mock.clone()), notifier, 8);
/// tokio::spawn(actor.run());
/// slice.fetch_all().await?;
///
/// mock.verify(); // all expectations consumed
/// ```
pub struct MockApi<T: Resource> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    calls: Arc<Mutex<Vec<ApiCall<T::Id>>>>,
}

impl<T: Resource> Clone for MockApi<T> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<T: Resource> Default for MockApi<T> {
    fn default() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Resource> MockApi<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_list_all(&self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::ListAll)
    }

    pub fn expect_get(&self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Get(id, response))
    }

    pub fn expect_create(&self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Create)
    }

    pub fn expect_update(&self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update(id, response))
    }

    pub fn expect_remove(&self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Remove(id, response))
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<ApiCall<T::Id>> {
        self.calls.lock().unwrap().clone()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, ApiError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: Box::new(wrap),
        }
    }

    fn next(&self, call: ApiCall<T::Id>) -> Expectation<T> {
        self.calls.lock().unwrap().push(call.clone());
        self.expectations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected call {call:?}: no expectation left"))
    }
}

/// Completes an expectation with its response.
pub struct ExpectationBuilder<T: Resource, R> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    wrap: Box<dyn FnOnce(Result<R, ApiError>) -> Expectation<T> + Send>,
}

impl<T: Resource, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, ApiError>) {
        let expectation = (self.wrap)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

fn to_json<I: serde::Serialize>(input: &I) -> Value {
    serde_json::to_value(input).unwrap_or(Value::Null)
}

#[async_trait]
impl<T: Resource> ResourceApi<T> for MockApi<T> {
    async fn list_all(&self) -> Result<Vec<T>, ApiError> {
        match self.next(ApiCall::ListAll) {
            Expectation::ListAll(response) => response,
            _ => panic!("Expectation mismatch: got list_all"),
        }
    }

    async fn get_by_id(&self, id: &T::Id) -> Result<T, ApiError> {
        match self.next(ApiCall::Get(id.clone())) {
            Expectation::Get(expected, response) => {
                assert_eq!(&expected, id, "get_by_id called with unexpected id");
                response
            }
            _ => panic!("Expectation mismatch: got get_by_id({id})"),
        }
    }

    async fn create(&self, input: &T::Input) -> Result<T, ApiError> {
        match self.next(ApiCall::Create(to_json(input))) {
            Expectation::Create(response) => response,
            _ => panic!("Expectation mismatch: got create"),
        }
    }

    async fn update(&self, id: &T::Id, input: &T::Input) -> Result<T, ApiError> {
        match self.next(ApiCall::Update(id.clone(), to_json(input))) {
            Expectation::Update(expected, response) => {
                assert_eq!(&expected, id, "update called with unexpected id");
                response
            }
            _ => panic!("Expectation mismatch: got update({id})"),
        }
    }

    async fn remove(&self, id: &T::Id) -> Result<(), ApiError> {
        match self.next(ApiCall::Remove(id.clone())) {
            Expectation::Remove(expected, response) => {
                assert_eq!(&expected, id, "remove called with unexpected id");
                response
            }
            _ => panic!("Expectation mismatch: got remove({id})"),
        }
    }
}

// =============================================================================
// CHANNEL-DRIVEN API
// =============================================================================

type Reply<R> = oneshot::Sender<Result<R, ApiError>>;

/// A call waiting for the test to answer it.
#[derive(Debug)]
pub enum PendingCall<T: Resource> {
    ListAll { respond_to: Reply<Vec<T>> },
    Get { id: T::Id, respond_to: Reply<T> },
    Create { input: T::Input, respond_to: Reply<T> },
    Update { id: T::Id, input: T::Input, respond_to: Reply<T> },
    Remove { id: T::Id, respond_to: Reply<()> },
}

/// API forwarding every call to the receiver returned by [`create_mock_api`].
pub struct ChannelApi<T: Resource> {
    sender: mpsc::Sender<PendingCall<T>>,
}

/// Creates a channel-driven API and the receiver on which its calls arrive.
///
/// A call whose responder is dropped fails with [`ApiError::Network`].
pub fn create_mock_api<T: Resource>(
    buffer_size: usize,
) -> (ChannelApi<T>, mpsc::Receiver<PendingCall<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelApi { sender }, receiver)
}

impl<T: Resource> ChannelApi<T> {
    async fn forward<R>(
        &self,
        build: impl FnOnce(Reply<R>) -> PendingCall<T>,
    ) -> Result<R, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ApiError::Network("mock receiver closed".into()))?;
        response
            .await
            .map_err(|_| ApiError::Network("mock responder dropped".into()))?
    }
}

#[async_trait]
impl<T: Resource> ResourceApi<T> for ChannelApi<T> {
    async fn list_all(&self) -> Result<Vec<T>, ApiError> {
        self.forward(|respond_to| PendingCall::ListAll { respond_to })
            .await
    }

    async fn get_by_id(&self, id: &T::Id) -> Result<T, ApiError> {
        let id = id.clone();
        self.forward(|respond_to| PendingCall::Get { id, respond_to })
            .await
    }

    async fn create(&self, input: &T::Input) -> Result<T, ApiError> {
        let input = input.clone();
        self.forward(|respond_to| PendingCall::Create { input, respond_to })
            .await
    }

    async fn update(&self, id: &T::Id, input: &T::Input) -> Result<T, ApiError> {
        let (id, input) = (id.clone(), input.clone());
        self.forward(|respond_to| PendingCall::Update {
            id,
            input,
            respond_to,
        })
        .await
    }

    async fn remove(&self, id: &T::Id) -> Result<(), ApiError> {
        let id = id.clone();
        self.forward(|respond_to| PendingCall::Remove { id, respond_to })
            .await
    }
}

/// Waits for the next call and checks it is a `list_all`.
pub async fn expect_list_all<T: Resource>(
    receiver: &mut mpsc::Receiver<PendingCall<T>>,
) -> Option<Reply<Vec<T>>> {
    match receiver.recv().await {
        Some(PendingCall::ListAll { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Waits for the next call and checks it is a `create`.
pub async fn expect_create<T: Resource>(
    receiver: &mut mpsc::Receiver<PendingCall<T>>,
) -> Option<(T::Input, Reply<T>)> {
    match receiver.recv().await {
        Some(PendingCall::Create { input, respond_to }) => Some((input, respond_to)),
        _ => None,
    }
}

/// Waits for the next call and checks it is a `remove`.
pub async fn expect_remove<T: Resource>(
    receiver: &mut mpsc::Receiver<PendingCall<T>>,
) -> Option<(T::Id, Reply<()>)> {
    match receiver.recv().await {
        Some(PendingCall::Remove { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
