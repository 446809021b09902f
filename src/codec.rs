use serde::{Deserialize, Serialize};

use crate::error::FlightError;
use crate::model::SearchResponse;
use crate::query::SearchRequest;

#[derive(Serialize)]
struct RequestEnvelope<'a> {
    request: &'a SearchRequest,
}

#[derive(Deserialize)]
struct OwnedRequestEnvelope {
    request: SearchRequest,
}

/// Serializes a request as the `{"request": {...}}` body the API expects.
///
/// Values are passed through as given; the API is the one that rejects
/// malformed dates or airport codes.
pub fn encode(request: &SearchRequest) -> Result<Vec<u8>, FlightError> {
    serde_json::to_vec(&RequestEnvelope { request }).map_err(|e| FlightError::Encode(e.to_string()))
}

pub fn encode_pretty(request: &SearchRequest) -> Result<String, FlightError> {
    serde_json::to_string_pretty(&RequestEnvelope { request })
        .map_err(|e| FlightError::Encode(e.to_string()))
}

/// Reads a request body back, as produced by [`encode`].
pub fn decode_request(body: &[u8]) -> Result<SearchRequest, FlightError> {
    serde_json::from_slice::<OwnedRequestEnvelope>(body)
        .map(|env| env.request)
        .map_err(|e| FlightError::Decode(e.to_string()))
}

pub fn decode(body: &[u8]) -> Result<SearchResponse, FlightError> {
    serde_json::from_slice(body).map_err(|e| FlightError::Decode(e.to_string()))
}

pub fn decode_str(body: &str) -> Result<SearchResponse, FlightError> {
    decode(body.as_bytes())
}
