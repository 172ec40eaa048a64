//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BLOG_*` environment variables, or a config
//! file, in that order of precedence. [`ServerSettings::resolve`] applies
//! defaults and rejects values the server cannot start with.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_AUTH_URL: &str = "http://127.0.0.1:5300";
const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_AUTH_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Unprefixed variable consulted when `BLOG_DATABASE_URL` is not set.
pub const DB_URL_FALLBACK_ENV: &str = "DB_URL";

/// Raw configuration values controlling server startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct ServerSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Seconds to wait when establishing a database connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Base URL of the auth service.
    pub auth_url: Option<String>,
    /// Per-call timeout for auth service requests, in milliseconds.
    pub auth_timeout_ms: Option<u64>,
    /// Seconds allowed for in-flight requests to finish on shutdown.
    pub shutdown_timeout_secs: Option<u64>,
    /// Require a token for creating and deleting posts as well as listing.
    #[ortho_config(default = false)]
    pub guard_mutations: bool,
}

/// Errors raised while resolving [`ServerSettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a `host:port` socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    /// Neither `BLOG_DATABASE_URL` nor `DB_URL` is set.
    #[error("database url is required; set BLOG_DATABASE_URL or DB_URL")]
    MissingDatabaseUrl,
    /// `auth_url` is not an absolute URL.
    #[error("invalid auth url {value:?}: {message}")]
    AuthUrl { value: String, message: String },
    /// A count or timeout was configured as zero.
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

/// Settings with defaults applied and every value validated.
#[derive(Clone)]
pub struct ResolvedSettings {
    /// Listener address.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Time allowed to check out a pooled connection.
    pub db_connect_timeout: Duration,
    /// Upper bound on pooled connections.
    pub db_max_connections: u32,
    /// Base URL of the auth service.
    pub auth_url: Url,
    /// Per-call timeout for auth service requests.
    pub auth_timeout: Duration,
    /// Grace period for in-flight requests on shutdown.
    pub shutdown_timeout: Duration,
    /// Also require a token for post creation and deletion.
    pub guard_mutations: bool,
}

fn non_zero<T: Default + PartialEq>(value: T, key: &'static str) -> Result<T, SettingsError> {
    if value == T::default() {
        Err(SettingsError::Zero { key })
    } else {
        Ok(value)
    }
}

impl ServerSettings {
    /// Apply defaults and validate, consulting `DB_URL` when no database
    /// URL was configured.
    pub fn resolve(&self) -> Result<ResolvedSettings, SettingsError> {
        self.resolve_with(std::env::var(DB_URL_FALLBACK_ENV).ok())
    }

    fn resolve_with(
        &self,
        db_url_fallback: Option<String>,
    ) -> Result<ResolvedSettings, SettingsError> {
        let bind_raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|err| SettingsError::BindAddr {
                value: bind_raw.to_owned(),
                message: err.to_string(),
            })?;

        let database_url = self
            .database_url
            .clone()
            .or(db_url_fallback)
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;

        let auth_raw = self.auth_url.as_deref().unwrap_or(DEFAULT_AUTH_URL);
        let auth_url = Url::parse(auth_raw).map_err(|err| SettingsError::AuthUrl {
            value: auth_raw.to_owned(),
            message: err.to_string(),
        })?;

        let db_connect_timeout_secs = non_zero(
            self.db_connect_timeout_secs
                .unwrap_or(DEFAULT_DB_CONNECT_TIMEOUT_SECS),
            "db_connect_timeout_secs",
        )?;
        let db_max_connections = non_zero(
            self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            "db_max_connections",
        )?;
        let auth_timeout_ms = non_zero(
            self.auth_timeout_ms.unwrap_or(DEFAULT_AUTH_TIMEOUT_MS),
            "auth_timeout_ms",
        )?;
        let shutdown_timeout_secs = non_zero(
            self.shutdown_timeout_secs
                .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            "shutdown_timeout_secs",
        )?;

        Ok(ResolvedSettings {
            bind_addr,
            database_url,
            db_connect_timeout: Duration::from_secs(db_connect_timeout_secs),
            db_max_connections,
            auth_url,
            auth_timeout: Duration::from_millis(auth_timeout_ms),
            shutdown_timeout: Duration::from_secs(shutdown_timeout_secs),
            guard_mutations: self.guard_mutations,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing and resolution.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::{fixture, rstest};

    const ALL_KEYS: [&str; 9] = [
        "BLOG_BIND_ADDR",
        "BLOG_DATABASE_URL",
        "BLOG_DB_CONNECT_TIMEOUT_SECS",
        "BLOG_DB_MAX_CONNECTIONS",
        "BLOG_AUTH_URL",
        "BLOG_AUTH_TIMEOUT_MS",
        "BLOG_SHUTDOWN_TIMEOUT_SECS",
        "BLOG_GUARD_MUTATIONS",
        "DB_URL",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("blog-api")]).expect("config should load")
    }

    fn cleared_env_with(
        overrides: &[(&'static str, &str)],
    ) -> Vec<(&'static str, Option<String>)> {
        ALL_KEYS
            .iter()
            .map(|key| {
                let value = overrides
                    .iter()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| (*value).to_owned());
                (*key, value)
            })
            .collect()
    }

    #[fixture]
    fn minimal() -> ServerSettings {
        ServerSettings {
            bind_addr: None,
            database_url: Some("postgres://localhost/blog".to_owned()),
            db_connect_timeout_secs: None,
            db_max_connections: None,
            auth_url: None,
            auth_timeout_ms: None,
            shutdown_timeout_secs: None,
            guard_mutations: false,
        }
    }

    #[rstest]
    fn defaults_are_applied(minimal: ServerSettings) {
        let resolved = minimal.resolve_with(None).expect("resolves");

        assert_eq!(resolved.bind_addr, "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(resolved.db_connect_timeout, Duration::from_secs(10));
        assert_eq!(resolved.db_max_connections, 10);
        assert_eq!(resolved.auth_url.as_str(), "http://127.0.0.1:5300/");
        assert_eq!(resolved.auth_timeout, Duration::from_secs(5));
        assert_eq!(resolved.shutdown_timeout, Duration::from_secs(30));
        assert!(!resolved.guard_mutations);
    }

    #[rstest]
    fn missing_database_url_uses_fallback(mut minimal: ServerSettings) {
        minimal.database_url = None;

        let resolved = minimal
            .resolve_with(Some("postgres://fallback/blog".to_owned()))
            .expect("resolves");

        assert_eq!(resolved.database_url, "postgres://fallback/blog");
    }

    #[rstest]
    fn configured_database_url_wins_over_fallback(minimal: ServerSettings) {
        let resolved = minimal
            .resolve_with(Some("postgres://fallback/blog".to_owned()))
            .expect("resolves");

        assert_eq!(resolved.database_url, "postgres://localhost/blog");
    }

    #[rstest]
    fn missing_database_url_is_an_error(mut minimal: ServerSettings) {
        minimal.database_url = None;

        let err = minimal.resolve_with(None).err().expect("error");

        assert_eq!(err, SettingsError::MissingDatabaseUrl);
    }

    #[rstest]
    fn bad_bind_addr_is_rejected(mut minimal: ServerSettings) {
        minimal.bind_addr = Some("not-an-addr".to_owned());

        let err = minimal.resolve_with(None).err().expect("error");

        assert!(matches!(err, SettingsError::BindAddr { .. }));
    }

    #[rstest]
    fn bad_auth_url_is_rejected(mut minimal: ServerSettings) {
        minimal.auth_url = Some("::nope".to_owned());

        let err = minimal.resolve_with(None).err().expect("error");

        assert!(matches!(err, SettingsError::AuthUrl { .. }));
    }

    #[rstest]
    #[case::db_timeout(|s: &mut ServerSettings| s.db_connect_timeout_secs = Some(0), "db_connect_timeout_secs")]
    #[case::pool_size(|s: &mut ServerSettings| s.db_max_connections = Some(0), "db_max_connections")]
    #[case::auth_timeout(|s: &mut ServerSettings| s.auth_timeout_ms = Some(0), "auth_timeout_ms")]
    #[case::shutdown(|s: &mut ServerSettings| s.shutdown_timeout_secs = Some(0), "shutdown_timeout_secs")]
    fn zero_values_are_rejected(
        mut minimal: ServerSettings,
        #[case] apply: fn(&mut ServerSettings),
        #[case] key: &'static str,
    ) {
        apply(&mut minimal);

        let err = minimal.resolve_with(None).err().expect("error");

        assert_eq!(err, SettingsError::Zero { key });
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_env_with(&[
            ("BLOG_BIND_ADDR", "127.0.0.1:9000"),
            ("BLOG_DATABASE_URL", "postgres://env/blog"),
            ("BLOG_AUTH_URL", "http://auth.internal:5300"),
            ("BLOG_AUTH_TIMEOUT_MS", "250"),
            ("BLOG_GUARD_MUTATIONS", "true"),
        ]));

        let resolved = load_from_empty_args().resolve().expect("resolves");

        assert_eq!(resolved.bind_addr, "127.0.0.1:9000".parse().expect("addr"));
        assert_eq!(resolved.database_url, "postgres://env/blog");
        assert_eq!(resolved.auth_url.host_str(), Some("auth.internal"));
        assert_eq!(resolved.auth_timeout, Duration::from_millis(250));
        assert!(resolved.guard_mutations);
    }

    #[rstest]
    fn unprefixed_db_url_is_consulted() {
        let _guard = lock_env(cleared_env_with(&[("DB_URL", "postgres://legacy/blog")]));

        let resolved = load_from_empty_args().resolve().expect("resolves");

        assert_eq!(resolved.database_url, "postgres://legacy/blog");
    }
}
