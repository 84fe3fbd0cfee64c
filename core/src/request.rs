//! Caller-side request inputs and the client-side request description.
//!
//! # Design
//! `RequestInput` and `RequestOptions` are the loosely shaped fetch-style
//! arguments. [`build_description`] turns them into a
//! [`RequestDescription`], the plain-data request the underlying client
//! executes. Nothing here performs I/O, and a description is rebuilt from
//! scratch on every call.

use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::body::RequestBody;
use crate::headers::{to_request_headers, HeadersInit, NormalizedHeaders};

/// Method used when the options do not name one.
pub const DEFAULT_METHOD: &str = "GET";

/// Content type sent when the caller did not set one. The client does not
/// sniff bodies, so this stands in for the type a fetch implementation would
/// infer for a text body.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";

/// A location-like object carrying its URL in `href` or `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlLike {
    pub href: Option<String>,
    pub url: Option<String>,
}

/// The first argument of a fetch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestInput {
    Url(String),
    Location(UrlLike),
}

impl RequestInput {
    /// A string input is used verbatim; a location prefers `href`, then
    /// `url`. Returns `None` when neither is set, leaving the client to
    /// reject the request.
    pub fn resolve_url(&self) -> Option<String> {
        match self {
            RequestInput::Url(url) => Some(url.clone()),
            RequestInput::Location(location) => location
                .href
                .as_deref()
                .filter(|href| !href.is_empty())
                .or_else(|| location.url.as_deref().filter(|url| !url.is_empty()))
                .map(str::to_string),
        }
    }
}

impl From<&str> for RequestInput {
    fn from(url: &str) -> Self {
        RequestInput::Url(url.to_string())
    }
}

impl From<String> for RequestInput {
    fn from(url: String) -> Self {
        RequestInput::Url(url)
    }
}

impl From<&String> for RequestInput {
    fn from(url: &String) -> Self {
        RequestInput::Url(url.clone())
    }
}

impl From<UrlLike> for RequestInput {
    fn from(location: UrlLike) -> Self {
        RequestInput::Location(location)
    }
}

impl From<url::Url> for RequestInput {
    fn from(url: url::Url) -> Self {
        RequestInput::Location(UrlLike {
            href: Some(url.into()),
            url: None,
        })
    }
}

/// The second argument of a fetch call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<String>,
    pub headers: Option<HeadersInit>,
    pub body: Option<RequestBody>,
    /// Forwarded verbatim to the client.
    pub signal: Option<CancellationToken>,
    /// Free-form options only the transform hook looks at.
    pub extra: Map<String, Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn headers(mut self, headers: impl Into<HeadersInit>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// How the client should decode the response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResponseFormat {
    /// Hand back the body untouched. Any decoding the client would do on
    /// its own tends to add headers that were never on the wire.
    #[default]
    Bytes,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Bytes => "arraybuffer",
        }
    }
}

/// A request described as plain data, ready for the underlying client.
#[derive(Debug, Clone)]
pub struct RequestDescription {
    pub url: Option<String>,
    pub method: String,
    pub data: Option<RequestBody>,
    /// Lowercased names.
    pub headers: NormalizedHeaders,
    pub response_format: ResponseFormat,
    pub signal: Option<CancellationToken>,
}

/// Build the description for one fetch call.
pub fn build_description(input: &RequestInput, options: &RequestOptions) -> RequestDescription {
    let mut headers = to_request_headers(options.headers.as_ref()).into_lowercase();
    if !headers.contains("content-type") {
        headers.insert("content-type", DEFAULT_CONTENT_TYPE);
    }

    RequestDescription {
        url: input.resolve_url(),
        method: options
            .method
            .clone()
            .filter(|method| !method.is_empty())
            .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
        data: options.body.clone(),
        headers,
        response_format: ResponseFormat::Bytes,
        signal: options.signal.clone(),
    }
}
