//! Request encoding for the web4 gateway.
//!
//! A [`ViewCallRequest`] becomes a `GET /web4/contract/...` URL and a
//! [`SignRequest`] becomes a `/web4/sign` redirect target. Both share the
//! [`GatewayRequest`] trait, which owns the query-string and display-object
//! rules.
#![forbid(unsafe_code)]
#![deny(clippy::all)]

pub mod endpoints;
pub mod errors;
pub mod params;
pub mod session;
pub mod sign;
pub mod snippet;
pub mod test_utils;
pub mod view;

pub use errors::Web4Error;
pub use params::{ParamList, ValueKind};
pub use session::Session;
pub use sign::{SignField, SignRequest};
pub use snippet::SnippetFlavor;
pub use view::ViewCallRequest;

use serde::Serialize;
use serde_json::{Map, Value};

/// Query string, full path and display object produced for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedRequest {
    pub path: String,
    pub query: String,
    pub params: Map<String, Value>,
}

impl EncodedRequest {
    /// Display object rendered as pretty JSON with two-space indentation
    pub fn params_pretty(&self) -> String {
        format!("{:#}", Value::Object(self.params.clone()))
    }
}

/// A request the gateway understands as a path plus a query string.
pub trait GatewayRequest {
    /// Path without the query string, e.g. `/web4/sign`.
    fn endpoint(&self) -> String;

    /// Key/value pairs in the order they are sent, keys already transformed.
    fn query_pairs(&self) -> Vec<(String, String)>;

    fn query_string(&self) -> String {
        params::encode_query(&self.query_pairs())
    }

    /// Endpoint and query string joined by `?`. The `?` is kept even when
    /// there are no parameters.
    fn path(&self) -> String {
        format!("{}?{}", self.endpoint(), self.query_string())
    }

    /// Display object mirroring the query string. A repeated key keeps its
    /// first position and takes the last value.
    fn display_params(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for (key, value) in self.query_pairs() {
            map.insert(key, Value::String(value));
        }
        map
    }

    fn encode(&self) -> EncodedRequest {
        let query = self.query_string();
        EncodedRequest {
            path: format!("{}?{}", self.endpoint(), query),
            query,
            params: self.display_params(),
        }
    }
}
