//! web4 sandbox controller
#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;

pub mod dispatcher;

pub mod errors;

pub mod sandbox;

pub mod state;

pub use config::SandboxConfig;
pub use dispatcher::{Gateway, HttpGateway, Navigation, ViewOutput};
pub use errors::GatewayError;
pub use sandbox::Sandbox;
pub use state::{SandboxState, SignForm, Tab, ViewForm};
