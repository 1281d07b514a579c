//! Client for the Odoo web JSON-RPC API.
//!
//! [`OdooClient`] authenticates through `/web/session/authenticate`, issues
//! model calls through `/web/dataset/call_kw` and `/web/dataset/search_read`,
//! and maps every wire outcome into [`OdooError`]'s failure taxonomy.

// Allow clippy warnings that are acceptable for this codebase
#![allow(clippy::too_many_arguments)]
#![allow(clippy::result_large_err)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod response;
pub mod session;
pub mod transport;
pub mod types;

pub use client::{DEFAULT_SEARCH_LIMIT, OdooClient};
pub use config::ConnectionConfig;
pub use session::Session;
pub use transport::{HttpTransport, Transport};
pub use types::{OdooError, OdooResult, RpcError, RpcErrorData};
