//! Shared fixtures for the end-to-end tests: an in-process mock gateway and
//! a helper to serve any router on an ephemeral loopback port.

use axum::{
    Router,
    extract::{Path, RawQuery},
    http::StatusCode,
    routing::get,
};
use tokio::net::TcpListener;

/// Contract id the mock gateway answers with 404
pub const MISSING_CONTRACT: &str = "missing.near";

/// Serve `app` on `127.0.0.1:0` and return its base URL
pub async fn serve(app: Router) -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

/// Echoes what it was asked for as `<contract> <method> <raw query>`, so
/// tests can see exactly what reached the gateway.
async fn contract_call(
    Path((contract, method)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> (StatusCode, String) {
    if contract == MISSING_CONTRACT {
        return (StatusCode::NOT_FOUND, format!("contract {contract} not found"));
    }
    let body = format!("{contract} {method} {}", query.unwrap_or_default());
    (StatusCode::OK, body)
}

/// Router mimicking the gateway's `/web4/contract/:contract/:method`
pub fn mock_gateway() -> Router {
    Router::new().route("/web4/contract/:contract/:method", get(contract_call))
}
