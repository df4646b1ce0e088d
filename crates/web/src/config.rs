use absences_core::i18n::Language;
use absences_core::table::DEFAULT_PAGE_SIZE;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Absence listing endpoint.
    pub absences_url: String,
    /// Conflict lookup base URL; the absence id is appended.
    pub conflict_url: String,
    /// Rows per table page (default: `10`).
    pub page_size: usize,
    /// Timeout for each upstream request in seconds (default: `30`).
    pub upstream_timeout_secs: u64,
    /// Language used when a request does not pick one (default: `en`).
    pub default_language: Language,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                                    |
    /// |-------------------------|------------------------------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                                                  |
    /// | `PORT`                  | `3000`                                                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`                                    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                                       |
    /// | `ABSENCES_URL`          | `https://front-end-kata.brighthr.workers.dev/api/absences` |
    /// | `CONFLICT_URL`          | `https://front-end-kata.brighthr.workers.dev/api/conflict` |
    /// | `PAGE_SIZE`             | `10`                                                       |
    /// | `UPSTREAM_TIMEOUT_SECS` | `30`                                                       |
    /// | `DEFAULT_LANGUAGE`      | `en`                                                       |
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

        let absences_url = std::env::var("ABSENCES_URL").unwrap_or_else(|_| {
            "https://front-end-kata.brighthr.workers.dev/api/absences".into()
        });

        let conflict_url = std::env::var("CONFLICT_URL").unwrap_or_else(|_| {
            "https://front-end-kata.brighthr.workers.dev/api/conflict".into()
        });

        let page_size: usize = std::env::var("PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .expect("PAGE_SIZE must be a valid usize");

        let upstream_timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        let default_language = Language::parse(
            &std::env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".into()),
        )
        .expect("DEFAULT_LANGUAGE must be one of en, es, de");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            absences_url,
            conflict_url,
            page_size: page_size.max(1),
            upstream_timeout_secs,
            default_language,
        }
    }
}
