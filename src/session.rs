use serde_json::{Map, Value};

/// The authenticated user record returned by `/web/session/authenticate`.
///
/// Odoo sends a free-form mapping (`uid`, `name`, `username`, plus whatever
/// the server version adds); the whole object is kept verbatim. Populated
/// only by a successful login; extended only by the explicit
/// fetch-additional-fields operation.
#[derive(Debug, Clone, Default)]
pub struct Session {
    attrs: Map<String, Value>,
}

impl Session {
    pub(crate) fn from_result(result: &Value) -> Option<Self> {
        result.as_object().map(|attrs| Self {
            attrs: attrs.clone(),
        })
    }

    /// Numeric user id. Odoo encodes "not authenticated" as `false` or `0`,
    /// neither of which survives here.
    pub fn uid(&self) -> Option<i64> {
        self.attrs
            .get("uid")
            .and_then(Value::as_i64)
            .filter(|&uid| uid > 0)
    }

    pub fn name(&self) -> Option<&str> {
        self.attrs.get("name").and_then(Value::as_str)
    }

    pub fn username(&self) -> Option<&str> {
        self.attrs.get("username").and_then(Value::as_str)
    }

    /// Raw attribute lookup for fields without a dedicated accessor.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn attrs(&self) -> &Map<String, Value> {
        &self.attrs
    }

    /// Merge `extra` into the record, overwriting keys already present.
    pub(crate) fn merge(&mut self, extra: Map<String, Value>) {
        self.attrs.extend(extra);
    }
}
