use leakwatch_core::config::{env_lookup, flag, optional, parsed_or};
use leakwatch_core::tracing::LogFormat;

/// Inspections service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct InspectionsConfig {
    /// PostgreSQL connection URL. Unset selects the in-memory store.
    pub database_url: Option<String>,
    /// TCP port for the HTTP server (default 8000). Env var: `INSPECTIONS_PORT`.
    pub port: u16,
    /// Base URL used in `Location` headers. Env var: `PUBLIC_URL`.
    pub public_url: String,
    /// Run pending migrations at startup. Env var: `AUTO_MIGRATE`.
    pub auto_migrate: bool,
    /// PBKDF2 rounds for new password hashes. Env var: `PASSWORD_HASH_ITERATIONS`.
    pub password_hash_iterations: u32,
    pub log_format: LogFormat,
}

impl InspectionsConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = parsed_or(&lookup, "INSPECTIONS_PORT", 8000)?;
        let public_url = optional(&lookup, "PUBLIC_URL")
            .map(|url| url.trim_end_matches('/').to_owned())
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        let password_hash_iterations = parsed_or(&lookup, "PASSWORD_HASH_ITERATIONS", 260_000)?;
        if password_hash_iterations == 0 {
            anyhow::bail!("PASSWORD_HASH_ITERATIONS must be positive");
        }
        Ok(Self {
            database_url: optional(&lookup, "DATABASE_URL"),
            port,
            public_url,
            auto_migrate: flag(&lookup, "AUTO_MIGRATE", false)?,
            password_hash_iterations,
            log_format: parsed_or(&lookup, "LOG_FORMAT", LogFormat::Json)?,
        })
    }
}
