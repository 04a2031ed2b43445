//! # Admin System
//!
//! Starts one slice actor per inventory resource and owns their clients.
//!
//! Slices have no dependencies on each other, so construction is a flat loop: build the
//! API for the resource, spawn its actor, keep the handle. Shutdown drops every client,
//! which closes each actor's channel, then awaits the handles.
//!
//! ```rust,ignore
//! let system = AdminSystem::new(&AdminConfig::from_env()?)?;
//!
//! let mut page = system.page::<Product>();
//! page.mount().await;
//! println!("{:#?}", page.table());
//!
//! system.shutdown().await?;
//! ```

use crate::config::{AdminConfig, ConfigError};
use crate::model::*;
use slice_framework::view::{AdminPage, Editable, PageSizeError, PanelError, Tabular};
use slice_framework::{
    ApiError, BroadcastNotifier, FileCredentials, HttpConfig, HttpTransport, Notification,
    Resource, ResourceApi, SliceActor, SliceClient, SliceError,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info};

const NOTIFICATION_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("transport setup failed: {0}")]
    Transport(#[from] ApiError),

    #[error(transparent)]
    Slice(#[from] SliceError),

    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error(transparent)]
    UnknownResource(#[from] UnknownResource),

    #[error(transparent)]
    PageSize(#[from] PageSizeError),

    #[error("invalid {resource} id '{value}'")]
    InvalidId { resource: ResourceKind, value: String },

    #[error("slice task failed: {0}")]
    TaskFailed(String),
}

/// Builds the API a slice talks to.
///
/// [`HttpTransport`] is the production factory; tests hand in mocks.
pub trait ApiFactory {
    fn api<T: Resource>(&self) -> Arc<dyn ResourceApi<T>>;
}

impl ApiFactory for HttpTransport {
    fn api<T: Resource>(&self) -> Arc<dyn ResourceApi<T>> {
        Arc::new(self.client::<T>())
    }
}

/// A resource the [`AdminSystem`] runs a slice for.
pub trait Managed: Tabular + Editable {
    const KIND: ResourceKind;

    fn slice(system: &AdminSystem) -> &SliceClient<Self>;

    /// Parses a command-line identifier.
    fn parse_id(raw: &str) -> Option<Self::Id>;
}

macro_rules! admin_system {
    ( $( $field:ident : $T:ident ),+ $(,)? ) => {
        /// The running admin back office: one slice per resource.
        pub struct AdminSystem {
            $( pub $field: SliceClient<$T>, )+
            notifier: BroadcastNotifier,
            handles: Vec<JoinHandle<()>>,
        }

        impl AdminSystem {
            /// Spawns every slice against `factory`'s APIs.
            pub fn from_parts(
                factory: &impl ApiFactory,
                notifier: BroadcastNotifier,
                config: &AdminConfig,
            ) -> Self {
                let mut handles = Vec::new();
                $(
                    let $field = spawn_slice::<$T>(factory, &notifier, config, &mut handles);
                )+
                info!(slices = handles.len(), "Admin system started");
                Self {
                    $( $field, )+
                    notifier,
                    handles,
                }
            }

            /// Gracefully shuts down every slice.
            ///
            /// Dropping the clients closes the actors' channels; each loop then exits and
            /// its handle resolves. Clients cloned elsewhere (views, spawned tasks) keep
            /// their slice alive until they are dropped too.
            pub async fn shutdown(self) -> Result<(), AdminError> {
                info!("Shutting down admin system...");
                let Self { $( $field, )+ notifier, handles } = self;
                $( drop($field); )+
                drop(notifier);

                for handle in handles {
                    if let Err(e) = handle.await {
                        error!(error = ?e, "Slice task failed");
                        return Err(AdminError::TaskFailed(e.to_string()));
                    }
                }

                info!("Admin system shutdown complete.");
                Ok(())
            }
        }

        $(
            impl Managed for $T {
                const KIND: ResourceKind = ResourceKind::$T;

                fn slice(system: &AdminSystem) -> &SliceClient<Self> {
                    &system.$field
                }

                fn parse_id(raw: &str) -> Option<Self::Id> {
                    raw.parse().ok()
                }
            }
        )+
    };
}

admin_system! {
    categories: Category,
    products: Product,
    storages: Storage,
    clients: Client,
    providers: Provider,
    persons: Person,
    users: User,
    documents: Document,
    receipts: Receipt,
    receipt_details: ReceiptDetail,
    kardexes: Kardex,
    kardex_details: KardexDetail,
    existences: Existence,
    income_notes: IncomeNote,
    income_note_details: IncomeNoteDetail,
    outcome_notes: OutcomeNote,
    outcome_note_details: OutcomeNoteDetail,
}

impl AdminSystem {
    /// Wires the HTTP transport and the session file from `config`, then starts every slice.
    pub fn new(config: &AdminConfig) -> Result<Self, AdminError> {
        let credentials = Arc::new(FileCredentials::new(
            config.credentials_path.clone(),
            config.token_key.clone(),
        ));
        let transport = HttpTransport::new(
            HttpConfig {
                base_url: config.api_url.clone(),
                timeout: config.http_timeout,
            },
            credentials,
        )?;
        info!(base_url = transport.base_url(), "HTTP transport ready");

        Ok(Self::from_parts(
            &transport,
            BroadcastNotifier::new(NOTIFICATION_CAPACITY),
            config,
        ))
    }

    /// The slice client for resource `T`.
    pub fn slice<T: Managed>(&self) -> SliceClient<T> {
        T::slice(self).clone()
    }

    /// A fresh screen bound to resource `T`'s slice.
    pub fn page<T: Managed>(&self) -> AdminPage<T> {
        AdminPage::new(self.slice())
    }

    /// Success and error notifications from every slice.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }
}

fn spawn_slice<T: Resource>(
    factory: &impl ApiFactory,
    notifier: &BroadcastNotifier,
    config: &AdminConfig,
    handles: &mut Vec<JoinHandle<()>>,
) -> SliceClient<T> {
    let (actor, client) = SliceActor::new(
        factory.api::<T>(),
        Arc::new(notifier.clone()),
        config.channel_size,
    );
    handles.push(tokio::spawn(
        actor.with_notify_duration(config.notify_duration).run(),
    ));
    client
}

#[cfg(test)]
mod tests {
    use super::*;
    use slice_framework::mock::MockApi;
    use slice_framework::Level;

    /// Hands every slice a mock without expectations.
    struct Unused;

    impl ApiFactory for Unused {
        fn api<T: Resource>(&self) -> Arc<dyn ResourceApi<T>> {
            Arc::new(MockApi::<T>::new())
        }
    }

    #[tokio::test]
    async fn starts_one_slice_per_resource_and_shuts_down() {
        let system =
            AdminSystem::from_parts(&Unused, BroadcastNotifier::new(8), &AdminConfig::default());

        assert_eq!(system.handles.len(), ResourceKind::ALL.len());
        assert!(system.slice::<Product>().state().items.is_empty());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn notifications_use_configured_duration() {
        struct Refusing;

        impl ApiFactory for Refusing {
            fn api<T: Resource>(&self) -> Arc<dyn ResourceApi<T>> {
                let api = MockApi::<T>::new();
                api.expect_create().return_err(ApiError::Unauthenticated);
                Arc::new(api)
            }
        }

        let config = AdminConfig {
            notify_duration: std::time::Duration::from_millis(250),
            ..AdminConfig::default()
        };
        let system = AdminSystem::from_parts(&Refusing, BroadcastNotifier::new(8), &config);
        let mut notes = system.notifications();

        let input = CategoryInput {
            nombre: "Lácteos".into(),
        };
        let result = system.slice::<Category>().create(input).await;

        assert!(result.unwrap_err().is_unauthenticated());
        let note = notes.recv().await.unwrap();
        assert_eq!(note.level, Level::Error);
        assert_eq!(note.message, "Inicie sesión para modificar Categoría");
        assert_eq!(note.duration.as_millis(), 250);

        system.shutdown().await.unwrap();
    }

    #[test]
    fn new_rejects_blank_api_url() {
        let config = AdminConfig {
            api_url: "   ".into(),
            ..AdminConfig::default()
        };

        let result = AdminSystem::new(&config);

        assert!(matches!(
            result,
            Err(AdminError::Transport(ApiError::InvalidBaseUrl(_)))
        ));
    }
}
