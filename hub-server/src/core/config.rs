use crate::identity::JwtConfig;

/// Server configuration.
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/fashion-hub | working directory (database, local store, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | LOG_LEVEL | info | default tracing level |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | EMAIL_DOMAIN | rvfashion.local | domain for phone-derived credential emails |
/// | JWT_SECRET | (generated in dev) | HS256 signing key |
/// | JWT_EXPIRATION_MINUTES | 1440 | session token lifetime |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the document store, local store and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Default log level
    pub log_level: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Domain used to derive credential emails from phone numbers
    pub email_domain: String,
    /// JWT session token configuration
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/fashion-hub".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            email_domain: std::env::var("EMAIL_DOMAIN")
                .unwrap_or_else(|_| "rvfashion.local".into()),
            jwt: JwtConfig::default(),
        }
    }

    /// Override the filesystem/port settings, for tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
