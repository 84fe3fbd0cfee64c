//! Fetch-style front end over a [`RequestClient`].
//!
//! # Design
//! `FetchAdapter` holds only the client and the transform hook, both behind
//! `Arc` and never mutated, so one adapter can serve concurrent calls. Each
//! call builds its own description, awaits the client once, and converts the
//! outcome. There is no retry, timeout, or queueing at this layer.

use std::fmt;
use std::sync::Arc;

use crate::client::{dispatch, DispatchOutcome, RequestClient};
use crate::request::{build_description, RequestDescription, RequestInput, RequestOptions};
use crate::response::AdaptedResponse;

/// Rewrites a built description before dispatch. Receives the description,
/// then the original input and options, and returns what gets sent.
pub type TransformHook =
    dyn Fn(RequestDescription, &RequestInput, &RequestOptions) -> RequestDescription + Send + Sync;

pub struct FetchAdapter<C> {
    client: Arc<C>,
    transform: Arc<TransformHook>,
}

impl<C> Clone for FetchAdapter<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            transform: Arc::clone(&self.transform),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for FetchAdapter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchAdapter")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

fn identity(
    description: RequestDescription,
    _: &RequestInput,
    _: &RequestOptions,
) -> RequestDescription {
    description
}

/// `url` with userinfo, query and fragment removed, for logging.
fn loggable_url(url: Option<&str>) -> String {
    let Some(raw) = url else {
        return "<none>".to_string();
    };
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            // Only fails for cannot-be-a-base URLs, which carry no userinfo.
            let _ = parsed.set_username("");
            let _ = parsed.set_password(None);
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => "<unparsed>".to_string(),
    }
}

impl<C: RequestClient> FetchAdapter<C> {
    pub fn new(client: C) -> Self {
        Self::from_shared(Arc::new(client))
    }

    pub fn from_shared(client: Arc<C>) -> Self {
        Self {
            client,
            transform: Arc::new(identity),
        }
    }

    /// Replace the identity transform with `hook`.
    pub fn with_transform<F>(mut self, hook: F) -> Self
    where
        F: Fn(RequestDescription, &RequestInput, &RequestOptions) -> RequestDescription
            + Send
            + Sync
            + 'static,
    {
        self.transform = Arc::new(hook);
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// The description `fetch` would dispatch for these arguments.
    pub fn prepare(&self, input: &RequestInput, options: &RequestOptions) -> RequestDescription {
        let description = build_description(input, options);
        (self.transform)(description, input, options)
    }

    /// Perform one request.
    ///
    /// Any completed exchange becomes a response, including ones the client
    /// reported as errors. A failure without a response is returned exactly
    /// as the client produced it.
    pub async fn fetch(
        &self,
        input: impl Into<RequestInput>,
        options: RequestOptions,
    ) -> Result<AdaptedResponse, C::Error> {
        let input = input.into();
        let description = self.prepare(&input, &options);
        tracing::debug!(
            method = %description.method,
            url = %loggable_url(description.url.as_deref()),
            "dispatching request"
        );

        match dispatch(self.client.as_ref(), description).await {
            DispatchOutcome::Completed(result) => Ok(AdaptedResponse::from_client_result(result)),
            DispatchOutcome::TransportFailure(err) => {
                tracing::warn!(error = %err, "request failed without a response");
                Err(err)
            }
        }
    }
}
