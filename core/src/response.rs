//! Client results and the fetch-style response built from them.

use bytes::Bytes;
use http::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::BodyError;
use crate::headers::to_response_headers;

/// A completed exchange as reported by the underlying client.
///
/// Headers are flattened: one entry per name, repeated values joined with
/// `", "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientResult {
    pub data: Bytes,
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
}

/// The response handed back to fetch-style callers.
///
/// The body is the raw buffer the client produced. Reading it consumes the
/// response.
#[derive(Debug, Clone)]
pub struct AdaptedResponse {
    status: u16,
    status_text: String,
    headers: HeaderMap,
    body: Bytes,
}

impl AdaptedResponse {
    /// Build a response from a client result. No decoding happens here.
    pub fn from_client_result(result: ClientResult) -> Self {
        Self {
            headers: to_response_headers(&result.headers),
            status: result.status,
            status_text: result.status_text,
            body: result.data,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// `true` for 2xx statuses.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn bytes(self) -> Bytes {
        self.body
    }

    pub fn text(self) -> Result<String, BodyError> {
        Ok(String::from_utf8(self.body.to_vec())?)
    }

    pub fn json<T: DeserializeOwned>(self) -> Result<T, BodyError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

impl From<ClientResult> for AdaptedResponse {
    fn from(result: ClientResult) -> Self {
        Self::from_client_result(result)
    }
}
