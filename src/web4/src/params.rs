use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::errors::Web4Error;

// Values that look like JSON are sent under `<key>.json` so the gateway
// parses them instead of passing them to the contract as strings. The check
// is on the first character only; nothing is validated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Json,
    Plain,
}

impl ValueKind {
    /// Detect the kind from the value's first character
    pub fn detect(value: &str) -> Self {
        if value.starts_with(['{', '[']) {
            Self::Json
        } else {
            Self::Plain
        }
    }

    /// Key under which a value of this kind goes on the wire
    pub fn wire_key(&self, key: &str) -> String {
        match self {
            Self::Json => format!("{key}.json"),
            Self::Plain => key.to_string(),
        }
    }
}

/// Ordered key/value pairs as typed into the form.
///
/// Duplicate keys are allowed and order is kept. Rows with an empty key or an
/// empty value stay in the list (the form still shows them) but are never
/// encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamList(Vec<(String, String)>);

impl ParamList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<(&str, &str)> {
        self.0.get(index).map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut (String, String)> {
        self.0.get_mut(index)
    }

    /// Removes the row at `index`; out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) -> Option<(String, String)> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs that go on the wire, with their keys transformed by [`ValueKind`].
    pub fn wire_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .filter(|(key, value)| !key.is_empty() && !value.is_empty())
            .map(|(key, value)| (ValueKind::detect(value).wire_key(key), value.to_string()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Parses a `KEY=VALUE` argument, splitting on the first `=`.
pub fn parse_param_arg(arg: &str) -> Result<(String, String), Web4Error> {
    arg.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| Web4Error::InvalidParam(arg.to_string()))
}

/// `application/x-www-form-urlencoded` serialization: space becomes `+`,
/// alphanumerics and `*-._` pass through, everything else is `%XX`.
pub fn encode_query(pairs: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Escapes one URL path segment so `/`, `?`, `#` and `%` cannot split it.
///
/// Dot segments are not covered: `.` and `..` pass through unchanged, and an
/// HTTP client resolving the URL will collapse them. Escaping them as `%2E`
/// would not help since URL parsers treat that as a dot too.
pub fn encode_path_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
