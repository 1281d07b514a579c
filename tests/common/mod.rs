//! Common test utilities for integration tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const AUTHENTICATE_PATH: &str = "/web/session/authenticate";
pub const CALL_KW_PATH: &str = "/web/dataset/call_kw";
pub const SEARCH_READ_PATH: &str = "/web/dataset/search_read";

/// Wrap `result` in a successful JSON-RPC response envelope.
pub fn jsonrpc_success(result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result
    })
}

/// Build a JSON-RPC error response envelope. `data` becomes the Odoo
/// exception payload (`name`, `message`, ...).
pub fn jsonrpc_error(code: i64, message: &str, data: Option<Value>) -> Value {
    let mut error = json!({
        "code": code,
        "message": message,
    });
    if let Some(data) = data {
        error["data"] = data;
    }
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": error
    })
}

/// Mock Odoo server exposing the web JSON-RPC endpoints.
pub struct MockOdooServer {
    pub server: MockServer,
}

impl MockOdooServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Mount the authenticate endpoint returning `result` as the session
    /// payload.
    pub async fn mock_authenticate(&self, result: Value) {
        Mock::given(method("POST"))
            .and(path(AUTHENTICATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(jsonrpc_success(result)))
            .mount(&self.server)
            .await;
    }

    /// Mount the call_kw endpoint returning `result` for any call.
    pub async fn mock_call_kw(&self, result: Value) {
        Mock::given(method("POST"))
            .and(path(CALL_KW_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(jsonrpc_success(result)))
            .mount(&self.server)
            .await;
    }

    /// Mount the call_kw endpoint returning a JSON-RPC error envelope.
    pub async fn mock_call_kw_error(&self, code: i64, message: &str, data: Option<Value>) {
        Mock::given(method("POST"))
            .and(path(CALL_KW_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(jsonrpc_error(code, message, data)),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount the search_read endpoint returning the given record list.
    pub async fn mock_search_read(&self, records: Value) {
        let length = records.as_array().map(Vec::len).unwrap_or(0);
        Mock::given(method("POST"))
            .and(path(SEARCH_READ_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(jsonrpc_success(json!({
                "records": records,
                "length": length
            }))))
            .mount(&self.server)
            .await;
    }

    /// Mount an endpoint with an arbitrary raw response body.
    pub async fn mock_raw(&self, endpoint: &str, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }

    /// Bodies of every request received so far, oldest first.
    pub async fn request_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}

/// Common response payloads.
pub mod responses {
    use serde_json::{Value, json};

    /// Session payload for a successful admin login.
    pub fn admin_session() -> Value {
        json!({
            "uid": 1,
            "name": "Administrator",
            "username": "admin"
        })
    }

    /// Session payload Odoo returns for bad credentials.
    pub fn anonymous_session() -> Value {
        json!({
            "uid": 0,
            "name": "",
            "username": ""
        })
    }

    /// Sample partner records.
    pub fn partners() -> Value {
        json!([
            {"id": 1, "name": "Partner 1", "email": "partner1@example.com"},
            {"id": 2, "name": "Partner 2", "email": "partner2@example.com"},
            {"id": 3, "name": "Partner 3", "email": "partner3@example.com"}
        ])
    }

    /// Odoo access-error payload.
    pub fn access_error_data() -> Value {
        json!({
            "name": "odoo.exceptions.AccessError",
            "message": "You are not allowed to access this document."
        })
    }
}
