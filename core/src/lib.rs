//! Fetch-style requests on top of a description-driven HTTP client.
//!
//! # Overview
//! Callers speak fetch: an input (URL or location) plus options, answered by
//! a response whose body they read themselves. The underlying client speaks
//! plain data: it executes a [`RequestDescription`] and reports a
//! [`ClientResult`]. [`FetchAdapter`] translates between the two.
//!
//! # Design
//! - `headers` normalizes header shapes in both directions.
//! - `request` builds the description: lowercased headers, a default
//!   `content-type`, untouched body, and a fixed raw-bytes response format.
//! - `response` wraps a client result as an [`AdaptedResponse`].
//! - `client` is the async seam to the underlying client; a client error
//!   that carries a completed response still yields a response, anything else
//!   is returned to the caller unchanged.
//! - The adapter does no I/O of its own beyond awaiting the client.

pub mod adapter;
pub mod body;
pub mod client;
pub mod error;
pub mod headers;
pub mod request;
pub mod response;

pub use adapter::{FetchAdapter, TransformHook};
pub use body::{FormData, FormPart, FormValue, RequestBody};
pub use client::{dispatch, ClientFailure, DispatchOutcome, RequestClient};
pub use error::{BodyError, BoxError, ClientError};
pub use headers::{
    flatten_header_map, to_request_headers, to_response_headers, HeadersInit, NormalizedHeaders,
};
pub use request::{
    build_description, RequestDescription, RequestInput, RequestOptions, ResponseFormat, UrlLike,
    DEFAULT_CONTENT_TYPE, DEFAULT_METHOD,
};
pub use response::{AdaptedResponse, ClientResult};
