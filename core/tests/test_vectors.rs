//! Verify header normalization and description building against the JSON
//! test vectors in `test-vectors/headers.json`.
//!
//! Each case names its input shape, the raw input, and the expected entries
//! in order.

use fetch_adapter::{
    build_description, to_request_headers, to_response_headers, HeadersInit, RequestInput,
    RequestOptions,
};
use http::{HeaderMap, HeaderName, HeaderValue};

const VECTORS: &str = include_str!("../../test-vectors/headers.json");

fn vectors() -> serde_json::Value {
    serde_json::from_str(VECTORS).unwrap()
}

fn string_rows(value: &serde_json::Value) -> Vec<Vec<String>> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|row| {
            row.as_array()
                .unwrap()
                .iter()
                .map(|cell| cell.as_str().unwrap().to_string())
                .collect()
        })
        .collect()
}

fn pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    string_rows(value)
        .into_iter()
        .map(|row| (row[0].clone(), row[1].clone()))
        .collect()
}

/// Build the `HeadersInit` variant a vector case describes.
fn headers_init(kind: &str, input: &serde_json::Value) -> HeadersInit {
    match kind {
        "list" => HeadersInit::List(string_rows(input)),
        "record" => HeadersInit::Record(
            input
                .as_array()
                .unwrap()
                .iter()
                .map(|row| {
                    let row = row.as_array().unwrap();
                    (
                        row[0].as_str().unwrap().to_string(),
                        row[1].as_str().map(str::to_string),
                    )
                })
                .collect(),
        ),
        "map" => {
            let mut map = HeaderMap::new();
            for (name, value) in pairs(input) {
                map.append(
                    HeaderName::from_bytes(name.as_bytes()).unwrap(),
                    HeaderValue::from_str(&value).unwrap(),
                );
            }
            HeadersInit::Map(map)
        }
        other => panic!("unknown header kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Request headers
// ---------------------------------------------------------------------------

#[test]
fn request_header_vectors() {
    let vectors = vectors();
    for case in vectors["request_headers"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let init = headers_init(case["kind"].as_str().unwrap(), &case["input"]);

        let normalized = to_request_headers(Some(&init));
        let actual: Vec<(String, String)> = normalized
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        assert_eq!(actual, pairs(&case["expected"]), "{name}");
    }
}

// ---------------------------------------------------------------------------
// Response headers
// ---------------------------------------------------------------------------

#[test]
fn response_header_vectors() {
    let vectors = vectors();
    for case in vectors["response_headers"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let map = to_response_headers(&pairs(&case["input"]));

        let actual: Vec<(String, String)> = map
            .iter()
            .map(|(n, v)| {
                let value = std::str::from_utf8(v.as_bytes()).unwrap();
                (n.as_str().to_string(), value.to_string())
            })
            .collect();
        assert_eq!(actual, pairs(&case["expected"]), "{name}");
    }
}

// ---------------------------------------------------------------------------
// Descriptions
// ---------------------------------------------------------------------------

#[test]
fn description_vectors() {
    let vectors = vectors();
    for case in vectors["descriptions"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = RequestInput::from(case["input"].as_str().unwrap());

        let raw_options = &case["options"];
        let mut options = RequestOptions::new();
        if let Some(method) = raw_options.get("method") {
            options = options.method(method.as_str().unwrap());
        }
        if let Some(headers) = raw_options.get("headers") {
            options = options.headers(pairs(headers));
        }

        let desc = build_description(&input, &options);
        let expected = &case["expected"];
        assert_eq!(desc.url.as_deref(), expected["url"].as_str(), "{name}: url");
        assert_eq!(desc.method, expected["method"].as_str().unwrap(), "{name}: method");

        let headers: Vec<(String, String)> = desc
            .headers
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        assert_eq!(headers, pairs(&expected["headers"]), "{name}: headers");
    }
}
