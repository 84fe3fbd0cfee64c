//! Header conversion between the caller-facing and client-facing models.
//!
//! # Design
//! Callers hand headers over in one of three shapes (see [`HeadersInit`]).
//! The shape is inspected once here and everything downstream sees a single
//! canonical [`NormalizedHeaders`]. In the other direction, clients report
//! response headers flattened to one comma-joined string per name, and
//! [`to_response_headers`] splits them back into a multi-valued
//! [`HeaderMap`].
//!
//! A literal comma inside one logical value cannot be told apart from a
//! value separator, so such values come back split. Normalization never
//! fails: anything that cannot be represented is skipped.

use std::borrow::Cow;

use http::header::{HeaderMap, HeaderName, HeaderValue};

/// Separator used when several values for one name are folded together.
const VALUE_SEPARATOR: &str = ", ";

/// Header input accepted on the caller side.
#[derive(Debug, Clone)]
pub enum HeadersInit {
    /// Rows of `[name, value, value, ...]`. Values after the name are joined
    /// with `", "`; a row without values is skipped. A name repeated across
    /// rows is merged by joining.
    List(Vec<Vec<String>>),

    /// A plain name/value mapping. Entries without a value are skipped; a
    /// name repeated in any case is last-wins.
    Record(Vec<(String, Option<String>)>),

    /// A header collection with case-insensitive names. Repeated entries
    /// are joined in iteration order.
    Map(HeaderMap),
}

impl From<HeaderMap> for HeadersInit {
    fn from(map: HeaderMap) -> Self {
        HeadersInit::Map(map)
    }
}

impl<K, V> From<Vec<(K, V)>> for HeadersInit
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        HeadersInit::Record(
            pairs
                .into_iter()
                .map(|(name, value)| (name.into(), Some(value.into())))
                .collect(),
        )
    }
}

/// Name/value pairs with at most one entry per case-insensitive name.
///
/// Keeps the spelling of the first occurrence and the order names were first
/// seen. Lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedHeaders {
    entries: Vec<(String, String)>,
}

impl NormalizedHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Set `name` to `value`, replacing any existing value for that name.
    /// Empty names are ignored.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        let value = value.into();
        match self.position(&name) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Add `value` under `name`, joining onto an existing value with `", "`.
    /// Empty names are ignored.
    pub fn append(&mut self, name: impl Into<String>, value: impl AsRef<str>) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        match self.position(&name) {
            Some(i) => {
                let existing = &mut self.entries[i].1;
                existing.push_str(VALUE_SEPARATOR);
                existing.push_str(value.as_ref());
            }
            None => self.entries.push((name, value.as_ref().to_string())),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Lowercase every name. Names are already unique ignoring case, so this
    /// never merges entries.
    pub fn into_lowercase(self) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

impl IntoIterator for NormalizedHeaders {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for NormalizedHeaders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = NormalizedHeaders::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Convert caller-side headers into a fresh [`NormalizedHeaders`].
///
/// `None` yields an empty set. Empty values in `List` and `Record` inputs
/// count as missing and are dropped, as are empty names.
pub fn to_request_headers(headers: Option<&HeadersInit>) -> NormalizedHeaders {
    let mut normalized = NormalizedHeaders::new();
    let Some(headers) = headers else {
        return normalized;
    };

    match headers {
        HeadersInit::List(rows) => {
            for row in rows {
                let Some((name, values)) = row.split_first() else {
                    continue;
                };
                let values: Vec<&str> = values
                    .iter()
                    .map(String::as_str)
                    .filter(|v| !v.is_empty())
                    .collect();
                if values.is_empty() {
                    continue;
                }
                normalized.append(name.as_str(), values.join(VALUE_SEPARATOR));
            }
        }
        HeadersInit::Record(pairs) => {
            for (name, value) in pairs {
                match value.as_deref() {
                    Some(value) if !value.is_empty() => normalized.insert(name.as_str(), value),
                    _ => {}
                }
            }
        }
        HeadersInit::Map(map) => {
            for (name, value) in flatten_header_map(map) {
                normalized.insert(name, value);
            }
        }
    }

    normalized
}

/// Rebuild a multi-valued [`HeaderMap`] from flattened client headers.
///
/// Each value is split on `,` plus optional whitespace and every piece is
/// appended under the same name. Names or values that are not valid HTTP
/// header syntax are skipped.
pub fn to_response_headers(raw: &[(String, String)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in raw {
        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            continue;
        };
        for part in split_values(value) {
            if let Ok(value) = HeaderValue::from_str(part) {
                map.append(name.clone(), value);
            }
        }
    }
    map
}

/// Fold a [`HeaderMap`] into one `(name, value)` pair per name, joining
/// repeated values with `", "`. Values are decoded as UTF-8; bytes that are
/// not UTF-8 (latin-1 obs-text) become U+FFFD rather than dropping the value.
///
/// This is the shape a client reports in
/// [`ClientResult::headers`](crate::ClientResult::headers).
pub fn flatten_header_map(map: &HeaderMap) -> Vec<(String, String)> {
    map.keys()
        .map(|name| {
            let values: Vec<Cow<'_, str>> = map
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()))
                .collect();
            (name.as_str().to_string(), values.join(VALUE_SEPARATOR))
        })
        .collect()
}

fn split_values(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(|part| part.trim_start_matches([' ', '\t']))
}
