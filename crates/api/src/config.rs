use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default photo upload size limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Postgres URL. When unset the server runs on the in-memory document store.
    pub database_url: Option<String>,
    /// Photo storage settings.
    pub media: MediaConfig,
    /// JWT validation settings.
    pub jwt: JwtConfig,
}

/// Where uploaded photos go and how they are addressed.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory photos are written to (default: `./media`).
    pub dir: PathBuf,
    /// URL prefix under which `dir` is served (default: `http://localhost:3000/media`).
    pub public_url: String,
    /// Maximum accepted photo size in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `HOST`                 | `0.0.0.0`                      |
    /// | `PORT`                 | `3000`                         |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                           |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                           |
    /// | `DATABASE_URL`         | unset (in-memory store)        |
    /// | `MEDIA_DIR`            | `./media`                      |
    /// | `MEDIA_PUBLIC_URL`     | `http://localhost:3000/media`  |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                     |
    ///
    /// See [`JwtConfig::from_env`] for the JWT variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let media = MediaConfig {
            dir: std::env::var("MEDIA_DIR")
                .unwrap_or_else(|_| "./media".into())
                .into(),
            public_url: std::env::var("MEDIA_PUBLIC_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}/media")),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse()
                .expect("MAX_UPLOAD_BYTES must be a valid usize"),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            media,
            jwt,
        }
    }
}
