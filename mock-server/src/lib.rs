use axum::{
    body::Bytes,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Body returned by `POST /body`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EchoedBody {
    pub headers: Map<String, Value>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/success/text", get(success_text))
        .route("/success/json", get(success_json))
        .route("/headers", post(echo_headers))
        .route("/body", post(echo_body))
        .route("/failure", get(failure))
        .route("/failureBody", get(failure_body))
        .route("/multi-header", get(multi_header))
        .route("/download", get(download))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn success_text() -> &'static str {
    "OK!"
}

async fn success_json() -> Json<Value> {
    Json(json!({ "value": "OK!" }))
}

async fn echo_headers(headers: HeaderMap) -> Json<Map<String, Value>> {
    Json(header_object(&headers))
}

async fn echo_body(headers: HeaderMap, body: Bytes) -> Json<EchoedBody> {
    Json(EchoedBody {
        headers: header_object(&headers),
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn failure() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

async fn failure_body() -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "test": true })))
}

async fn multi_header() -> (HeaderMap, &'static str) {
    let mut headers = HeaderMap::new();
    headers.append("x-multi", HeaderValue::from_static("first"));
    headers.append("x-multi", HeaderValue::from_static("second"));
    (headers, "multi")
}

async fn download() -> impl IntoResponse {
    (
        [(header::CONTENT_DISPOSITION, "attachment; filename=\"café.txt\"")],
        "file",
    )
}

/// Request headers as a JSON object, repeated values joined with `", "`.
fn header_object(headers: &HeaderMap) -> Map<String, Value> {
    headers
        .keys()
        .map(|name| {
            let values: Vec<String> = headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect();
            (name.as_str().to_string(), Value::String(values.join(", ")))
        })
        .collect()
}
