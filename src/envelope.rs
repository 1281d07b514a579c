use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Value, json};

pub const JSONRPC_VERSION: &str = "2.0";

/// The web endpoints take a single logical method name; the target
/// model/method pair travels inside `params`.
pub const RPC_METHOD: &str = "call";

/// Allocator for JSON-RPC request envelopes. Ids are strictly increasing
/// within one client instance; some servers echo and validate them, so ids
/// are never reused.
#[derive(Debug)]
pub struct RequestIdSeq(AtomicU64);

impl RequestIdSeq {
    pub fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// Wrap `params` in a fresh JSON-RPC 2.0 call envelope. `params` may be
    /// a named-argument object or a positional array; both are shapes the
    /// Odoo endpoints accept. No I/O happens here.
    pub fn envelope(&self, params: Value) -> Value {
        json!({
            "jsonrpc": JSONRPC_VERSION,
            "method": RPC_METHOD,
            "id": self.next(),
            "params": params,
        })
    }
}

impl Default for RequestIdSeq {
    fn default() -> Self {
        Self::new()
    }
}
