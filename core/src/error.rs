//! Error types.
//!
//! # Design
//! The adapter itself never wraps a client's failure: a transport error
//! comes back as the client's own error value. `ClientError` is a stock error
//! type that client implementations can use when they have none of their
//! own. `BodyError` covers reading a response body.

use thiserror::Error;

use crate::client::ClientFailure;
use crate::response::ClientResult;

/// Boxed source of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures a request client can report.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The exchange completed but the client rejects its status.
    #[error("request completed with status {}", .response.status)]
    Status { response: Box<ClientResult> },

    /// No usable response: connection, DNS, TLS, or protocol failure.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The request was cancelled before it was sent.
    #[error("request cancelled")]
    Cancelled,

    /// The description could not be turned into a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn status(response: ClientResult) -> Self {
        ClientError::Status {
            response: Box::new(response),
        }
    }

    pub fn transport(source: impl Into<BoxError>) -> Self {
        ClientError::Transport(source.into())
    }
}

impl ClientFailure for ClientError {
    fn into_response(self) -> Result<ClientResult, Self> {
        match self {
            ClientError::Status { response } => Ok(*response),
            other => Err(other),
        }
    }
}

/// Errors from reading a response body.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn completed(status: u16) -> ClientResult {
        ClientResult {
            data: Bytes::new(),
            status,
            status_text: String::new(),
            headers: Vec::new(),
        }
    }

    #[test]
    fn status_error_yields_its_response() {
        let response = ClientError::status(completed(404)).into_response().unwrap();
        assert_eq!(response.status, 404);
    }

    #[test]
    fn other_errors_are_returned_as_is() {
        let err = ClientError::InvalidRequest("no url".to_string());
        match err.into_response() {
            Err(ClientError::InvalidRequest(msg)) => assert_eq!(msg, "no url"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            ClientError::Cancelled.into_response(),
            Err(ClientError::Cancelled)
        ));
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            ClientError::status(completed(501)).to_string(),
            "request completed with status 501"
        );
        assert_eq!(
            ClientError::transport("connection refused").to_string(),
            "transport error: connection refused"
        );
    }
}
