use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use crate::config::ConnectionConfig;
use crate::envelope::RequestIdSeq;
use crate::response;
use crate::session::Session;
use crate::transport::{HttpTransport, Transport};
use crate::types::{OdooError, OdooResult};

const AUTHENTICATE_PATH: &str = "/web/session/authenticate";
const CALL_KW_PATH: &str = "/web/dataset/call_kw";
const SEARCH_READ_PATH: &str = "/web/dataset/search_read";

/// Record cap applied by `search_read` when the caller gives no limit.
pub const DEFAULT_SEARCH_LIMIT: u32 = 80;

/// Client for one Odoo server, holding the endpoint configuration, the
/// request-id sequence and, after a successful [`login`](Self::login), the
/// authenticated user session. One instance per logical session; every call
/// is a single request/response round trip with no retry or batching.
pub struct OdooClient {
    config: ConnectionConfig,
    base_url: Url,
    transport: Arc<dyn Transport>,
    ids: RequestIdSeq,
    session: Option<Session>,
}

impl OdooClient {
    pub fn new(config: ConnectionConfig) -> anyhow::Result<Self> {
        let transport = Arc::new(HttpTransport::new()?);
        Self::with_transport(config, transport)
    }

    /// Build a client over a caller-supplied transport. Lets embedders share
    /// an HTTP client across instances or substitute a stub in tests.
    pub fn with_transport(
        config: ConnectionConfig,
        transport: Arc<dyn Transport>,
    ) -> anyhow::Result<Self> {
        let base_url = config.base_url()?;
        Ok(Self {
            config,
            base_url,
            transport,
            ids: RequestIdSeq::new(),
            session: None,
        })
    }

    /// Parse `url` (`"host"`, `"scheme://host"` or `"scheme://host:port"`)
    /// into an unauthenticated client. Pure construction; no network traffic
    /// happens until the first call.
    pub fn connect(url: &str) -> anyhow::Result<Self> {
        Self::new(ConnectionConfig::from_url(url)?)
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// The user record stored by the last successful login, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }

    /// One envelope out, one interpreted result back.
    async fn dispatch(&self, path: &str, params: Value, context: &str) -> OdooResult<Value> {
        let envelope = self.ids.envelope(params);
        debug!("dispatching {} (id {})", context, envelope["id"]);
        let body = self.transport.post(self.endpoint(path), envelope).await?;
        response::interpret(&body, context)
    }

    /// Authenticate against `db` and store the returned user record.
    ///
    /// Odoo signals bad credentials with a *successful* envelope whose
    /// payload carries no authenticated user: a falsy or absent `uid` raises
    /// [`OdooError::InvalidCredentials`] and leaves the session untouched.
    /// All three arguments must be non-empty.
    pub async fn login(
        &mut self,
        db: &str,
        login: &str,
        password: &str,
    ) -> OdooResult<&Session> {
        debug_assert!(
            !db.is_empty() && !login.is_empty() && !password.is_empty(),
            "login arguments must be non-empty"
        );

        let params = json!({"db": db, "login": login, "password": password});
        let result = self.dispatch(AUTHENTICATE_PATH, params, "login").await?;

        match authenticated_session(&result) {
            Some(session) => Ok(&*self.session.insert(session)),
            None => Err(OdooError::InvalidCredentials {
                message: format!("authentication refused for user '{login}'"),
                result,
            }),
        }
    }

    /// Invoke `method` on `model` through `/web/dataset/call_kw` and return
    /// the raw result. Every higher-level operation composes over this.
    pub async fn call(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Option<Value>,
        context: Option<Value>,
    ) -> OdooResult<Value> {
        let mut params = json!({
            "model": model,
            "method": method,
            "args": args,
            "kwargs": kwargs.unwrap_or_else(|| json!({})),
        });
        if let Some(ctx) = context {
            params["context"] = ctx;
        }
        self.dispatch(CALL_KW_PATH, params, &format!("{model} - {method}"))
            .await
    }

    /// Search `model` and read matching records in one round trip. Returns
    /// the raw result mapping, whose `records` key holds the record list.
    pub async fn search_read(
        &self,
        model: &str,
        domain: Value,
        fields: Option<Vec<String>>,
        limit: Option<u32>,
        sort: Option<String>,
        context: Option<Value>,
    ) -> OdooResult<Value> {
        let params = json!({
            "model": model,
            "domain": domain,
            "limit": limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
            "sort": sort.unwrap_or_default(),
            "context": context.unwrap_or_else(|| json!({})),
            "fields": fields.unwrap_or_default(),
        });
        self.dispatch(SEARCH_READ_PATH, params, &format!("{model} - search_read"))
            .await
    }

    /// Like [`search_read`](Self::search_read), returning only the record
    /// list.
    pub async fn search(
        &self,
        model: &str,
        domain: Value,
        fields: Option<Vec<String>>,
        limit: Option<u32>,
        sort: Option<String>,
        context: Option<Value>,
    ) -> OdooResult<Vec<Value>> {
        let result = self
            .search_read(model, domain, fields, limit, sort, context)
            .await?;
        match result.get("records").and_then(Value::as_array) {
            Some(records) => Ok(records.clone()),
            None => Err(OdooError::InvalidResponse {
                context: format!("{model} - search_read"),
                body: result.to_string(),
            }),
        }
    }

    /// First record matching `domain`, or `None`. More than one match is
    /// not an error; it logs a warning and the first record wins.
    pub async fn find(
        &self,
        model: &str,
        domain: Value,
        fields: Option<Vec<String>>,
        context: Option<Value>,
    ) -> OdooResult<Option<Value>> {
        let records = self
            .search(model, domain, fields, None, None, context)
            .await?;
        if records.len() > 1 {
            warn!(
                "find on {model} matched {} records, returning the first",
                records.len()
            );
        }
        Ok(records.into_iter().next())
    }

    /// Read `fields` of the given records.
    pub async fn read(
        &self,
        model: &str,
        ids: Vec<i64>,
        fields: Vec<String>,
        context: Option<Value>,
    ) -> OdooResult<Value> {
        self.call(model, "read", vec![json!(ids), json!(fields)], None, context)
            .await
    }

    /// Field names the current session may read on `model`. Useful to
    /// pre-filter `fields` before `read`/`search` instead of running into an
    /// access failure. The list is passed through opaquely.
    pub async fn get_accessible_fields(&self, model: &str) -> OdooResult<Vec<String>> {
        let result = self
            .call(
                model,
                "check_field_access_rights",
                vec![json!("read"), Value::Null],
                None,
                None,
            )
            .await?;
        coerce(result, &format!("{model} - check_field_access_rights"))
    }

    /// Create a record, returning its id.
    pub async fn create(
        &self,
        model: &str,
        values: Value,
        context: Option<Value>,
    ) -> OdooResult<i64> {
        let result = self
            .call(model, "create", vec![values], None, context)
            .await?;
        coerce(result, &format!("{model} - create"))
    }

    /// Update the given records with `values`.
    pub async fn write(
        &self,
        model: &str,
        ids: Vec<i64>,
        values: Value,
        context: Option<Value>,
    ) -> OdooResult<bool> {
        let result = self
            .call(model, "write", vec![json!(ids), values], None, context)
            .await?;
        coerce(result, &format!("{model} - write"))
    }

    /// Delete the given records.
    pub async fn unlink(
        &self,
        model: &str,
        ids: Vec<i64>,
        context: Option<Value>,
    ) -> OdooResult<bool> {
        let result = self
            .call(model, "unlink", vec![json!(ids)], None, context)
            .await?;
        coerce(result, &format!("{model} - unlink"))
    }

    /// Count records matching `domain` without reading them.
    pub async fn search_count(
        &self,
        model: &str,
        domain: Value,
        context: Option<Value>,
    ) -> OdooResult<i64> {
        let result = self
            .call(model, "search_count", vec![domain], None, context)
            .await?;
        coerce(result, &format!("{model} - search_count"))
    }

    /// Full field schema of `model`.
    pub async fn fields_get(&self, model: &str, context: Option<Value>) -> OdooResult<Value> {
        let kwargs = json!({
            "attributes": ["string", "type", "help", "required", "readonly", "relation", "selection"]
        });
        self.call(model, "fields_get", vec![], Some(kwargs), context)
            .await
    }

    /// Read additional fields of the authenticated user and merge them into
    /// the stored session record.
    pub async fn fetch_user_fields(&mut self, fields: Vec<String>) -> OdooResult<()> {
        let Some(uid) = self.session.as_ref().and_then(Session::uid) else {
            return Err(OdooError::InvalidCredentials {
                message: "no authenticated session".to_string(),
                result: Value::Null,
            });
        };

        let result = self.read("res.users", vec![uid], fields, None).await?;
        let Some(record) = result
            .as_array()
            .and_then(|records| records.first())
            .and_then(Value::as_object)
        else {
            return Err(OdooError::InvalidResponse {
                context: "res.users - read".to_string(),
                body: result.to_string(),
            });
        };

        if let Some(session) = self.session.as_mut() {
            session.merge(record.clone());
        }
        Ok(())
    }
}

/// A login result with a truthy `uid` is an authenticated user; anything
/// else (absent, `0`, `false`) is Odoo's bad-credentials signal.
fn authenticated_session(result: &Value) -> Option<Session> {
    result
        .get("uid")
        .and_then(Value::as_i64)
        .filter(|&uid| uid > 0)?;
    Session::from_result(result)
}

fn coerce<T: serde::de::DeserializeOwned>(result: Value, context: &str) -> OdooResult<T> {
    serde_json::from_value(result.clone()).map_err(|_| OdooError::InvalidResponse {
        context: context.to_string(),
        body: result.to_string(),
    })
}
