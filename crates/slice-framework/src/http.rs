//! # HTTP Resource Client
//!
//! [`HttpTransport`] holds what every resource shares (normalized base URL, a pooled
//! `reqwest::Client`, the credential store). [`HttpResourceClient<T>`] is a typed view on it
//! that speaks the uniform REST contract for one entity:
//!
//! | Operation   | Request                      |
//! |-------------|------------------------------|
//! | `list_all`  | `GET    /{endpoint}`          |
//! | `get_by_id` | `GET    /{endpoint}/{id}`     |
//! | `create`    | `POST   /{endpoint}`          |
//! | `update`    | `PATCH  /{endpoint}/{id}`     |
//! | `remove`    | `DELETE /{endpoint}/{id}`     |
//!
//! Writes without a token never reach the network and fail with
//! [`ApiError::Unauthenticated`]. Reads are sent regardless and the API decides.

use crate::api::ResourceApi;
use crate::credentials::CredentialStore;
use crate::entity::{entity_type, Resource};
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    /// `None` disables the per-request timeout.
    pub timeout: Option<Duration>,
}

impl HttpConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

/// Connection state shared by all resource clients of one API.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpTransport {
    pub fn new(
        config: HttpConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            base_url,
            http,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A typed client for resource `T` sharing this transport.
    pub fn client<T: Resource>(&self) -> HttpResourceClient<T> {
        HttpResourceClient {
            transport: self.clone(),
            _resource: PhantomData,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Writes short-circuit here when no token is available.
    fn authorize_write(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match self.credentials.token() {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(ApiError::Unauthenticated),
        }
    }
}

/// REST client for one resource collection.
pub struct HttpResourceClient<T: Resource> {
    transport: HttpTransport,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for HttpResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            _resource: PhantomData,
        }
    }
}

impl<T: Resource> HttpResourceClient<T> {
    fn collection_url(&self) -> String {
        self.transport.endpoint(T::ENDPOINT)
    }

    fn record_url(&self, id: &T::Id) -> String {
        self.transport.endpoint(&format!("{}/{}", T::ENDPOINT, id))
    }
}

#[async_trait]
impl<T: Resource> ResourceApi<T> for HttpResourceClient<T> {
    #[instrument(skip(self), fields(entity_type = entity_type::<T>()))]
    async fn list_all(&self) -> Result<Vec<T>, ApiError> {
        debug!("Sending request");
        let request = self.transport.http.get(self.collection_url());
        let response = send(self.transport.authorize(request)).await?;
        decode_json_response(response, None).await
    }

    #[instrument(skip(self), fields(entity_type = entity_type::<T>()))]
    async fn get_by_id(&self, id: &T::Id) -> Result<T, ApiError> {
        debug!("Sending request");
        let request = self.transport.http.get(self.record_url(id));
        let response = send(self.transport.authorize(request)).await?;
        decode_json_response(response, Some(id.to_string())).await
    }

    #[instrument(skip(self, input), fields(entity_type = entity_type::<T>()))]
    async fn create(&self, input: &T::Input) -> Result<T, ApiError> {
        debug!(?input, "Sending request");
        let request = self.transport.http.post(self.collection_url()).json(input);
        let response = send(self.transport.authorize_write(request)?).await?;
        decode_json_response(response, None).await
    }

    #[instrument(skip(self, input), fields(entity_type = entity_type::<T>()))]
    async fn update(&self, id: &T::Id, input: &T::Input) -> Result<T, ApiError> {
        debug!(?input, "Sending request");
        let request = self.transport.http.patch(self.record_url(id)).json(input);
        let response = send(self.transport.authorize_write(request)?).await?;
        decode_json_response(response, Some(id.to_string())).await
    }

    #[instrument(skip(self), fields(entity_type = entity_type::<T>()))]
    async fn remove(&self, id: &T::Id) -> Result<(), ApiError> {
        debug!("Sending request");
        let request = self.transport.http.delete(self.record_url(id));
        let response = send(self.transport.authorize_write(request)?).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(format_http_error(status, body, Some(id.to_string())))
    }
}

async fn send(request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
    request.send().await.map_err(|e| {
        warn!(error = %e, "Request failed");
        ApiError::Network(e.to_string())
    })
}

/// Maps a non-success status onto the error taxonomy.
pub fn format_http_error(status: StatusCode, body: String, id: Option<String>) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth { status },
        StatusCode::NOT_FOUND => ApiError::NotFound {
            id: id.unwrap_or_default(),
        },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation { status, body }
        }
        _ => ApiError::Http { status, body },
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

async fn decode_json_response<R: DeserializeOwned>(
    response: reqwest::Response,
    id: Option<String>,
) -> Result<R, ApiError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&bytes).into_owned();
        return Err(format_http_error(status, body, id));
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
