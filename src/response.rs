use serde_json::Value;

use crate::types::{OdooError, OdooResult, RpcError};

/// Failure kinds a server exception name can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExceptionKind {
    AccessDenied,
}

/// Exception-class names the server may report, keyed by the dotted name in
/// `error.data.name`. This table is the single extension point for new Odoo
/// exception types: add an entry here and every call site picks it up.
const EXCEPTION_KINDS: &[(&str, ExceptionKind)] =
    &[("odoo.exceptions.AccessError", ExceptionKind::AccessDenied)];

fn kind_for(name: &str) -> Option<ExceptionKind> {
    EXCEPTION_KINDS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, kind)| *kind)
}

/// Decode a raw response body into the call's success value.
///
/// A body that is not JSON, or that carries both `result` and `error`, or
/// neither, is malformed; the failure keeps the offending body together with
/// `context`, a human-readable tag for the originating call (`"login"`,
/// `"res.partner - read"`). A well-formed error object goes through
/// [`classify`]. A `result` is returned verbatim — interpreting its shape is
/// the caller's business.
pub fn interpret(body: &str, context: &str) -> OdooResult<Value> {
    let Ok(envelope) = serde_json::from_str::<Value>(body) else {
        return Err(invalid(context, body));
    };

    match (envelope.get("result"), envelope.get("error")) {
        (Some(result), None) => Ok(result.clone()),
        (None, Some(error)) => Err(classify(error)),
        _ => Err(invalid(context, body)),
    }
}

/// Map a JSON-RPC error object to a failure kind by its exception name.
/// Unknown or absent names fall through to the generic RPC failure; the full
/// error object rides along as diagnostic payload either way.
pub fn classify(error: &Value) -> OdooError {
    let parsed: RpcError = serde_json::from_value(error.clone()).unwrap_or_else(|_| RpcError {
        message: error.to_string(),
        ..RpcError::default()
    });
    let message = parsed.display_message().to_string();

    match parsed.exception_name().and_then(kind_for) {
        Some(ExceptionKind::AccessDenied) => OdooError::AccessDenied {
            message,
            error: parsed,
        },
        None => OdooError::Rpc {
            message,
            error: parsed,
        },
    }
}

fn invalid(context: &str, body: &str) -> OdooError {
    OdooError::InvalidResponse {
        context: context.to_string(),
        body: body.to_string(),
    }
}
