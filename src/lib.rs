pub mod codec;
pub mod error;
pub mod fetch;
pub mod mcp;
pub mod model;
pub mod query;
pub mod table;

use tracing::warn;

use error::FlightError;
use fetch::{FetchOptions, HttpTransport, Transport};
use model::SearchResponse;
use query::SearchRequest;

/// Runs one search against `options.endpoint` with a fresh HTTP client.
pub async fn search(
    api_key: &str,
    request: &SearchRequest,
    options: &FetchOptions,
) -> Result<SearchResponse, FlightError> {
    let transport = HttpTransport::new(options)?;
    search_with(&transport, &options.endpoint, api_key, request).await
}

/// One encode, one POST, one decode. The HTTP status does not short-circuit:
/// error bodies are decoded like any other, and an upstream error payload
/// lands in [`SearchResponse::error`].
pub async fn search_with<T: Transport + ?Sized>(
    transport: &T,
    endpoint: &str,
    api_key: &str,
    request: &SearchRequest,
) -> Result<SearchResponse, FlightError> {
    let body = codec::encode(request)?;
    let reply = transport.post_json(endpoint, &[("key", api_key)], body).await?;

    if !reply.is_success() {
        warn!(status = reply.status, "search returned non-success status, decoding body anyway");
    }

    codec::decode(&reply.body)
}

/// A reusable handle bundling the API key with a transport.
#[derive(Clone)]
pub struct FlightClient<T = HttpTransport> {
    api_key: String,
    endpoint: String,
    transport: T,
}

impl FlightClient<HttpTransport> {
    pub fn new(api_key: impl Into<String>, options: &FetchOptions) -> Result<Self, FlightError> {
        Ok(Self {
            api_key: api_key.into(),
            endpoint: options.endpoint.clone(),
            transport: HttpTransport::new(options)?,
        })
    }
}

impl<T: Transport> FlightClient<T> {
    pub fn with_transport(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        transport: T,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            transport,
        }
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, FlightError> {
        search_with(&self.transport, &self.endpoint, &self.api_key, request).await
    }
}
