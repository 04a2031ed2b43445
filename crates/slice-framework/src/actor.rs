//! # Slice Actor
//!
//! The `SliceActor` is the "server" half of an entity store slice. It owns the
//! [`SliceState`] for one resource type and is the only place that state is mutated.
//!
//! Unlike an in-memory store, every operation here is a network round-trip. The actor never
//! awaits the API inside its loop: calls are spawned, and their results come back as
//! [`Completion`] messages on an internal channel. The loop therefore stays responsive
//! (`select` answers immediately while a fetch is in flight) and still applies every state
//! change sequentially.
//!
//! ## Fetch generations
//!
//! Each fetch-all is stamped with a monotonically increasing generation. A response is
//! applied only if it is newer than the last applied one, so a slow, older response can
//! never overwrite a newer snapshot. Its caller receives [`SliceError::Superseded`].
//!
//! `status` settles (`Loaded` or `Failed`) only once no newer fetch is still in flight, so an
//! older snapshot landing after the newest fetch failed leaves the slice `Loaded`.
//!
//! ## Mutations
//!
//! A write is awaited, then followed by a fetch-all; the write's caller is answered only
//! once that refresh resolved. Success and failure are both reported to the [`Notifier`].

use crate::api::ResourceApi;
use crate::client::SliceClient;
use crate::entity::{entity_type, Resource};
use crate::error::{ApiError, SliceError};
use crate::message::{Completion, FetchWaiter, SliceRequest, Write, Written};
use crate::notify::{Notification, Notifier, DEFAULT_DURATION};
use crate::state::{select_by_id, LoadStatus, SliceState};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

/// Server half of a slice.
///
/// # Usage Pattern
///
/// 1. **Create**: `SliceActor::new(api, notifier, buffer)` returns the actor and its client.
/// 2. **Run**: spawn `actor.run()` on the runtime.
/// 3. **Use**: clone the [`SliceClient`] into every view that needs this resource.
///
/// The loop ends once every client has been dropped. Calls still in flight at that point
/// are dropped with it and never touch state again.
pub struct SliceActor<T: Resource> {
    receiver: mpsc::Receiver<SliceRequest<T>>,
    completions: mpsc::UnboundedReceiver<Completion<T>>,
    completion_sender: mpsc::UnboundedSender<Completion<T>>,
    api: Arc<dyn ResourceApi<T>>,
    notifier: Arc<dyn Notifier>,
    notify_duration: Duration,
    state: SliceState<T>,
    publisher: watch::Sender<SliceState<T>>,
    issued: u64,
    applied: u64,
    in_flight: BTreeSet<u64>,
}

impl<T: Resource> SliceActor<T> {
    /// Creates a new actor and its associated client.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(
        api: Arc<dyn ResourceApi<T>>,
        notifier: Arc<dyn Notifier>,
        buffer_size: usize,
    ) -> (Self, SliceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (completion_sender, completions) = mpsc::unbounded_channel();
        let state = SliceState::default();
        let (publisher, watcher) = watch::channel(state.clone());
        let actor = Self {
            receiver,
            completions,
            completion_sender,
            api,
            notifier,
            notify_duration: DEFAULT_DURATION,
            state,
            publisher,
            issued: 0,
            applied: 0,
            in_flight: BTreeSet::new(),
        };
        (actor, SliceClient::new(sender, watcher))
    }

    /// Overrides how long notifications stay on screen.
    #[must_use]
    pub fn with_notify_duration(mut self, duration: Duration) -> Self {
        self.notify_duration = duration;
        self
    }

    /// Runs the event loop until every client is dropped.
    pub async fn run(mut self) {
        let entity_type = entity_type::<T>();
        info!(entity_type, endpoint = T::ENDPOINT, "Slice started");

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
                Some(done) = self.completions.recv() => self.handle_completion(done),
            }
        }

        info!(entity_type, size = self.state.items.len(), "Shutdown");
    }

    fn handle_request(&mut self, request: SliceRequest<T>) {
        let entity_type = entity_type::<T>();
        match request {
            SliceRequest::FetchAll { respond_to } => {
                self.start_fetch(FetchWaiter::Caller(respond_to));
            }
            SliceRequest::FetchOne { id, respond_to } => {
                debug!(entity_type, %id, "FetchOne");
                let api = self.api.clone();
                let completions = self.completion_sender.clone();
                tokio::spawn(async move {
                    let result = api.get_by_id(&id).await;
                    let _ = completions.send(Completion::FetchedOne {
                        id,
                        result,
                        respond_to,
                    });
                });
            }
            SliceRequest::Select { id, respond_to } => {
                self.state.selected = id
                    .as_ref()
                    .and_then(|id| select_by_id(&self.state.items, id))
                    .cloned();
                debug!(
                    entity_type,
                    id = ?id,
                    found = self.state.selected.is_some(),
                    "Select"
                );
                self.publish();
                let _ = respond_to.send(Ok(self.state.selected.clone()));
            }
            SliceRequest::Write { write, respond_to } => {
                debug!(entity_type, ?write, "Write");
                let verb = write.verb();
                let api = self.api.clone();
                let completions = self.completion_sender.clone();
                tokio::spawn(async move {
                    let result = perform_write(api.as_ref(), write).await;
                    let _ = completions.send(Completion::Written {
                        verb,
                        result,
                        respond_to,
                    });
                });
            }
        }
    }

    fn start_fetch(&mut self, waiter: FetchWaiter<T>) {
        self.issued += 1;
        let generation = self.issued;
        self.in_flight.insert(generation);
        self.state.status = LoadStatus::Loading;
        self.publish();
        debug!(entity_type = entity_type::<T>(), generation, "FetchAll");

        let api = self.api.clone();
        let completions = self.completion_sender.clone();
        tokio::spawn(async move {
            let result = api.list_all().await;
            let _ = completions.send(Completion::Fetched {
                generation,
                result,
                waiter,
            });
        });
    }

    fn handle_completion(&mut self, completion: Completion<T>) {
        let entity_type = entity_type::<T>();
        match completion {
            Completion::Fetched {
                generation,
                result,
                waiter,
            } => {
                let outcome = self.apply_fetch(generation, result);
                match waiter {
                    FetchWaiter::Caller(respond_to) => {
                        let _ = respond_to.send(outcome);
                    }
                    // The write itself succeeded; a failed or superseded refresh does not undo it.
                    FetchWaiter::AfterWrite(written, respond_to) => {
                        if let Err(e) = &outcome {
                            debug!(entity_type, error = %e, "Refresh after write did not apply");
                        }
                        let _ = respond_to.send(Ok(written));
                    }
                }
            }
            Completion::FetchedOne {
                id,
                result,
                respond_to,
            } => match result {
                Ok(item) => {
                    debug!(entity_type, %id, "Fetched one");
                    self.state.selected = Some(item.clone());
                    self.publish();
                    let _ = respond_to.send(Ok(item));
                }
                Err(e) => {
                    warn!(entity_type, %id, error = %e, "FetchOne failed");
                    let _ = respond_to.send(Err(e.into()));
                }
            },
            Completion::Written {
                verb,
                result,
                respond_to,
            } => match result {
                Ok(written) => {
                    info!(entity_type, outcome = written.past_participle(), "Write ok");
                    self.notifier.notify(Notification::success(
                        format!("{}: registro {} correctamente", T::LABEL, written.past_participle()),
                        self.notify_duration,
                    ));
                    self.start_fetch(FetchWaiter::AfterWrite(written, respond_to));
                }
                Err(ApiError::Unauthenticated) => {
                    warn!(entity_type, verb, "Write refused: no session token");
                    self.notifier.notify(Notification::error(
                        format!("Inicie sesión para modificar {}", T::LABEL),
                        self.notify_duration,
                    ));
                    let _ = respond_to.send(Err(ApiError::Unauthenticated.into()));
                }
                Err(e) => {
                    error!(entity_type, verb, error = %e, "Write failed");
                    self.notifier.notify(Notification::error(
                        format!("Error al {} {}: {}", verb, T::LABEL, e),
                        self.notify_duration,
                    ));
                    let _ = respond_to.send(Err(e.into()));
                }
            },
        }
    }

    fn apply_fetch(
        &mut self,
        generation: u64,
        result: Result<Vec<T>, ApiError>,
    ) -> Result<Vec<T>, SliceError> {
        let entity_type = entity_type::<T>();
        self.in_flight.remove(&generation);
        let settles = self.in_flight.range(generation + 1..).next().is_none();

        if generation <= self.applied {
            debug!(entity_type, generation, applied = self.applied, "Discarding stale fetch");
            return Err(SliceError::Superseded);
        }

        match result {
            Ok(items) => {
                self.applied = generation;
                self.state.items = items.clone();
                if settles {
                    self.state.status = LoadStatus::Loaded;
                }
                info!(entity_type, generation, size = items.len(), "Fetched");
                self.publish();
                Ok(items)
            }
            Err(e) => {
                warn!(entity_type, generation, error = %e, "FetchAll failed");
                if settles {
                    self.state.status = LoadStatus::Failed;
                    self.publish();
                }
                Err(e.into())
            }
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

async fn perform_write<T: Resource>(
    api: &dyn ResourceApi<T>,
    write: Write<T>,
) -> Result<Written<T>, ApiError> {
    match write {
        Write::Create(input) => api.create(&input).await.map(Written::Created),
        Write::Update(id, input) => api.update(&id, &input).await.map(Written::Updated),
        Write::Delete(id) => api.remove(&id).await.map(|()| Written::Deleted(id)),
    }
}
