//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::constants::{
    DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, DEFAULT_DATABASE_URL,
    DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SESSION_DIR, DEFAULT_SESSION_TTL_SECONDS,
};

/// Where session state lives between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    /// Process-local map; sessions vanish on restart
    Memory,
    /// One JSON document per session under `session_dir`
    File,
    /// Shared Redis instance at `redis_url`
    Redis,
}

impl FromStr for SessionBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" | "filesystem" => Ok(Self::File),
            "redis" => Ok(Self::Redis),
            other => Err(format!("unknown session backend '{}'", other)),
        }
    }
}

/// Credentials for the account created by `/crear_admin`.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    password: String,
}

impl AdminSeed {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self::new(
            DEFAULT_ADMIN_USERNAME,
            DEFAULT_ADMIN_EMAIL,
            DEFAULT_ADMIN_PASSWORD,
        )
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub redis_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub session_backend: SessionBackend,
    pub session_dir: PathBuf,
    pub session_ttl_seconds: u64,
    /// Mark the session cookie `Secure` (HTTPS deployments)
    pub session_cookie_secure: bool,
    pub admin: AdminSeed,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("db_max_connections", &self.db_max_connections)
            .field("redis_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("session_backend", &self.session_backend)
            .field("session_dir", &self.session_dir)
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .field("admin", &self.admin)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            session_backend: SessionBackend::Memory,
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            session_cookie_secure: false,
            admin: AdminSeed::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`).
    ///
    /// Unset or unparsable values fall back to the defaults in
    /// [`crate::config::constants`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let session_backend = match env::var("SESSION_BACKEND") {
            Ok(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!("{}, falling back to in-memory sessions", e);
                SessionBackend::Memory
            }),
            Err(_) => defaults.session_backend,
        };

        let admin = AdminSeed::new(
            env::var("ADMIN_USERNAME").unwrap_or(defaults.admin.username),
            env::var("ADMIN_EMAIL").unwrap_or(defaults.admin.email),
            env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin.password),
        );

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parsed_var("DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.db_max_connections),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parsed_var("SERVER_PORT").unwrap_or(defaults.server_port),
            session_backend,
            session_dir: env::var("SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_dir),
            session_ttl_seconds: parsed_var("SESSION_TTL_SECONDS")
                .unwrap_or(defaults.session_ttl_seconds),
            session_cookie_secure: parsed_var("SESSION_COOKIE_SECURE")
                .unwrap_or(defaults.session_cookie_secure),
            admin,
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parsed_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
