use url::Url;

pub const DEFAULT_HOST: &str = "localhost";

/// Conventional Odoo HTTP port.
pub const DEFAULT_PORT: u16 = 8069;

/// Endpoint coordinates of one Odoo server. Immutable once constructed;
/// only used to compute request URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            use_tls: false,
        }
    }
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, port: u16, use_tls: bool) -> Self {
        Self {
            host: host.into(),
            port,
            use_tls,
        }
    }

    /// Parse `"host"`, `"scheme://host"` or `"scheme://host:port"` into a
    /// config. Scheme defaults to http, port to 8069. Pure parsing, no
    /// network traffic.
    pub fn from_url(raw: &str) -> anyhow::Result<Self> {
        let normalized = normalize_url(raw);
        let parsed = Url::parse(&normalized)
            .map_err(|e| anyhow::anyhow!("Invalid Odoo url '{raw}': {e}"))?;

        let use_tls = match parsed.scheme() {
            "http" => false,
            "https" => true,
            other => anyhow::bail!("Unsupported scheme '{other}' in Odoo url '{raw}'"),
        };
        let host = parsed
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("Missing host in Odoo url '{raw}'"))?
            .to_string();
        let port = parsed.port().unwrap_or(DEFAULT_PORT);

        Ok(Self {
            host,
            port,
            use_tls,
        })
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_tls { "https" } else { "http" }
    }

    /// Origin URL, `scheme://host:port`.
    pub fn base_url(&self) -> anyhow::Result<Url> {
        let raw = format!("{}://{}:{}", self.scheme(), self.host, self.port);
        Url::parse(&raw).map_err(|e| anyhow::anyhow!("Invalid Odoo endpoint '{raw}': {e}"))
    }

    /// Fully qualified URL for `path`. The path ends up with exactly one
    /// leading separator whether or not the caller included one.
    pub fn url_for(&self, path: &str) -> anyhow::Result<Url> {
        let mut url = self.base_url()?;
        url.set_path(path.trim_start_matches('/'));
        Ok(url)
    }
}

fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
