use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use wreq::Client;

use crate::error::{self, FlightError};

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/qpxExpress/v1/trips/search";

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub endpoint: String,
    pub proxy: Option<String>,
    pub timeout: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            proxy: None,
            timeout: 30,
        }
    }
}

/// Status and fully-read body of one POST.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Rejects endpoints that are not absolute `http(s)` URLs before any I/O.
pub fn check_endpoint(endpoint: &str) -> Result<(), FlightError> {
    let uri: wreq::Uri = endpoint
        .parse()
        .map_err(|_| FlightError::InvalidEndpoint(endpoint.to_string()))?;

    match (uri.scheme_str(), uri.host()) {
        (Some("http" | "https"), Some(host)) if !host.is_empty() => Ok(()),
        _ => Err(FlightError::InvalidEndpoint(endpoint.to_string())),
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs a JSON body with `query` appended to `endpoint`. Exactly one
    /// attempt; the body is read to the end before returning.
    async fn post_json(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<HttpReply, FlightError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(options: &FetchOptions) -> Result<Self, FlightError> {
        let mut builder = Client::builder().timeout(Duration::from_secs(options.timeout));

        if let Some(ref proxy) = options.proxy {
            builder = builder.proxy(wreq::Proxy::all(proxy).map_err(error::from_http_error)?);
        }

        let client = builder.build().map_err(error::from_http_error)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<HttpReply, FlightError> {
        check_endpoint(endpoint)?;
        debug!(endpoint, bytes = body.len(), "posting search request");

        let response = self
            .client
            .post(endpoint)
            .query(query)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| error::from_send_error(e, endpoint))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(error::from_http_error)?;
        debug!(status, bytes = body.len(), "received search response");

        Ok(HttpReply {
            status,
            body: body.to_vec(),
        })
    }
}
