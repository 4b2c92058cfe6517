use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub max_upload_bytes: usize,
    /// Sessions idle for this long are evicted.
    pub session_ttl: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("DOCUQUERY_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse()
            .with_context(|| format!("invalid DOCUQUERY_ADDR: {}", addr))?;

        let max_upload_bytes = match lookup("DOCUQUERY_MAX_UPLOAD_BYTES") {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid DOCUQUERY_MAX_UPLOAD_BYTES: {}", value))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let session_ttl_secs = match lookup("DOCUQUERY_SESSION_TTL_SECS") {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid DOCUQUERY_SESSION_TTL_SECS: {}", value))?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        Ok(Self {
            addr,
            max_upload_bytes,
            session_ttl: Duration::from_secs(session_ttl_secs),
        })
    }

    /// How often idle sessions are swept: never less often than once a minute.
    pub fn sweep_interval(&self) -> Duration {
        self.session_ttl
            .min(Duration::from_secs(60))
            .max(Duration::from_secs(1))
    }
}
