//! Request body payloads.
//!
//! # Design
//! The adapter never serializes or re-encodes a body: whatever the caller
//! supplies is handed to the client unchanged. [`FormData`] is kept as a
//! structured container so a client can frame it with its own boundary and
//! length; [`FormData::encode`] is provided for clients that just want bytes.

use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

/// A request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Bytes(Bytes),
    Text(String),
    Form(FormData),
}

impl RequestBody {
    pub fn is_form(&self) -> bool {
        matches!(self, RequestBody::Form(_))
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(Bytes::from(bytes))
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<FormData> for RequestBody {
    fn from(form: FormData) -> Self {
        RequestBody::Form(form)
    }
}

/// One field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File {
        filename: String,
        content_type: Option<String>,
        data: Bytes,
    },
}

/// A `multipart/form-data` container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    boundary: String,
    parts: Vec<FormPart>,
}

impl Default for FormData {
    fn default() -> Self {
        Self::new()
    }
}

impl FormData {
    /// Empty form with a random boundary.
    pub fn new() -> Self {
        Self::with_boundary(format!("----FormBoundary{}", Uuid::new_v4().simple()))
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: FormValue::Text(value.into()),
        });
        self
    }

    pub fn append_file(
        &mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: Option<&str>,
        data: impl Into<Bytes>,
    ) -> &mut Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: FormValue::File {
                filename: filename.into(),
                content_type: content_type.map(str::to_string),
                data: data.into(),
            },
        });
        self
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// The `content-type` value matching [`encode`](Self::encode).
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Serialize the form as an RFC 7578 body.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(b"\r\n");
            buf.put_slice(b"Content-Disposition: form-data; name=\"");
            buf.put_slice(escape_quoted(&part.name).as_bytes());
            buf.put_u8(b'"');
            match &part.value {
                FormValue::Text(text) => {
                    buf.put_slice(b"\r\n\r\n");
                    buf.put_slice(text.as_bytes());
                }
                FormValue::File {
                    filename,
                    content_type,
                    data,
                } => {
                    buf.put_slice(b"; filename=\"");
                    buf.put_slice(escape_quoted(filename).as_bytes());
                    buf.put_slice(b"\"\r\nContent-Type: ");
                    buf.put_slice(
                        content_type
                            .as_deref()
                            .unwrap_or("application/octet-stream")
                            .as_bytes(),
                    );
                    buf.put_slice(b"\r\n\r\n");
                    buf.put_slice(data);
                }
            }
            buf.put_slice(b"\r\n");
        }
        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--\r\n");
        buf.freeze()
    }
}

// Same escaping browsers apply to field and file names.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_forms_get_distinct_boundaries() {
        assert_ne!(FormData::new().boundary(), FormData::new().boundary());
    }

    #[test]
    fn encode_text_field() {
        let mut form = FormData::with_boundary("XyZ");
        form.append("key", "value");
        assert_eq!(
            form.encode(),
            Bytes::from_static(
                b"--XyZ\r\nContent-Disposition: form-data; name=\"key\"\r\n\r\nvalue\r\n--XyZ--\r\n"
            )
        );
        assert_eq!(form.content_type(), "multipart/form-data; boundary=XyZ");
    }

    #[test]
    fn encode_file_field_defaults_content_type() {
        let mut form = FormData::with_boundary("b");
        form.append_file("upload", "a.bin", None, vec![1u8, 2, 3]);
        let encoded = form.encode();
        let text = String::from_utf8_lossy(&encoded);
        assert!(text.contains("name=\"upload\"; filename=\"a.bin\"\r\n"));
        assert!(text.contains("Content-Type: application/octet-stream\r\n\r\n"));
        assert!(text.ends_with("\r\n--b--\r\n"));
    }

    #[test]
    fn quotes_in_names_are_escaped() {
        let mut form = FormData::with_boundary("b");
        form.append("say \"hi\"", "x");
        let encoded = form.encode();
        assert!(String::from_utf8_lossy(&encoded).contains("name=\"say %22hi%22\""));
    }

    #[test]
    fn empty_form_is_just_the_terminator() {
        let form = FormData::with_boundary("b");
        assert_eq!(form.encode(), Bytes::from_static(b"--b--\r\n"));
    }

    #[test]
    fn body_conversions() {
        assert_eq!(RequestBody::from("hi"), RequestBody::Text("hi".to_string()));
        assert_eq!(
            RequestBody::from(vec![0u8, 1]),
            RequestBody::Bytes(Bytes::from_static(&[0, 1]))
        );
        assert!(RequestBody::from(FormData::new()).is_form());
    }
}
