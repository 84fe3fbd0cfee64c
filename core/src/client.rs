//! The seam to the underlying request client.
//!
//! # Design
//! A client executes a [`RequestDescription`] and reports either a
//! [`ClientResult`] or its own error type. Some clients fail a request whose
//! exchange did complete (for example on a non-2xx status) and attach the
//! response to the error. [`ClientFailure`] lets the error give that response
//! back, and [`dispatch`] folds both cases into a [`DispatchOutcome`] so the
//! response side never looks at error shapes.

use async_trait::async_trait;

use crate::request::RequestDescription;
use crate::response::ClientResult;

/// A client error that may carry a completed response.
pub trait ClientFailure: std::error::Error + Send + Sync + Sized + 'static {
    /// Return the embedded response, or the error itself when there is none.
    fn into_response(self) -> Result<ClientResult, Self>;
}

/// An HTTP client driven by request descriptions.
#[async_trait]
pub trait RequestClient: Send + Sync {
    type Error: ClientFailure;

    async fn request(&self, description: RequestDescription) -> Result<ClientResult, Self::Error>;
}

/// How a dispatched request ended.
#[derive(Debug)]
pub enum DispatchOutcome<E> {
    /// The exchange completed, whatever its status.
    Completed(ClientResult),
    /// No response exists; holds the client's error untouched.
    TransportFailure(E),
}

/// Send `description` through `client` and classify the result.
pub async fn dispatch<C>(client: &C, description: RequestDescription) -> DispatchOutcome<C::Error>
where
    C: RequestClient + ?Sized,
{
    match client.request(description).await {
        Ok(result) => DispatchOutcome::Completed(result),
        Err(err) => match err.into_response() {
            Ok(result) => {
                tracing::debug!(status = result.status, "using response carried by client error");
                DispatchOutcome::Completed(result)
            }
            Err(err) => DispatchOutcome::TransportFailure(err),
        },
    }
}
