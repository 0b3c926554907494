/**
 * Server Configuration
 *
 * This module loads the process-wide configuration exactly once at startup:
 * the runtime mode, the token signing key, cookie policy, CORS allow-list,
 * listen port and the optional PostgreSQL connection.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * by `main` beforehand). Development mode has sensible defaults; production
 * mode refuses to start without a signing key or a database.
 *
 * # Immutability
 *
 * `AppConfig` is built once and then shared behind `Arc`. Nothing reads the
 * environment after startup.
 */

use sqlx::PgPool;
use thiserror::Error;

/// Signing key used outside production mode
pub const DEVELOPMENT_SIGNING_KEY: &str = "mesto-development-signing-key";

/// Client origin allowed when `CORS_ORIGINS` is not set
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3010";

/// Configuration loading errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Production mode requires `JWT_SECRET`
    #[error("JWT_SECRET must be set when APP_ENV=production")]
    MissingSigningKey,

    /// Production mode requires `DATABASE_URL`
    #[error("DATABASE_URL must be set when APP_ENV=production")]
    MissingDatabase,

    /// An environment variable had a value we can't use
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },
}

/// Runtime mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Development,
    Production,
}

impl RuntimeMode {
    /// Parse `APP_ENV`; only the literal `production` selects production mode
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// `SameSite` attribute for the session cookie
///
/// The default is `None`: the web client and the API live on different
/// origins and the browser must send the cookie on cross-site requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSitePolicy {
    #[default]
    None,
    Lax,
    Strict,
}

impl SameSitePolicy {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "lax" => Ok(Self::Lax),
            "strict" => Ok(Self::Strict),
            _ => Err(ConfigError::InvalidValue {
                name: "COOKIE_SAME_SITE",
                value: value.to_string(),
            }),
        }
    }

    /// Attribute value as written in `Set-Cookie`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Lax => "Lax",
            Self::Strict => "Strict",
        }
    }
}

/// Authentication configuration shared by the token codec and session cookie
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC key for session tokens
    pub signing_key: String,
    /// Runtime mode, decides the cookie `Secure` flag
    pub mode: RuntimeMode,
    /// `SameSite` attribute for the session cookie
    pub same_site: SameSitePolicy,
}

// The signing key stays out of debug output.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_key", &"<redacted>")
            .field("mode", &self.mode)
            .field("same_site", &self.same_site)
            .finish()
    }
}

impl AuthConfig {
    /// Development configuration with the fixed development key
    pub fn development() -> Self {
        Self {
            signing_key: DEVELOPMENT_SIGNING_KEY.to_string(),
            mode: RuntimeMode::Development,
            same_site: SameSitePolicy::default(),
        }
    }

    /// Resolve the signing key for a mode
    ///
    /// Production never falls back to the development key.
    pub fn resolve_signing_key(
        mode: RuntimeMode,
        jwt_secret: Option<String>,
    ) -> Result<String, ConfigError> {
        let secret = jwt_secret.filter(|s| !s.trim().is_empty());
        match (mode, secret) {
            (_, Some(secret)) => Ok(secret),
            (RuntimeMode::Production, None) => Err(ConfigError::MissingSigningKey),
            (RuntimeMode::Development, None) => {
                tracing::warn!("JWT_SECRET not set, using the development signing key");
                Ok(DEVELOPMENT_SIGNING_KEY.to_string())
            }
        }
    }
}

/// Complete process configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth: AuthConfig,
    /// Credentialed CORS allow-list
    pub cors_origins: Vec<String>,
    /// PostgreSQL connection string, if any
    pub database_url: Option<String>,
    /// Listen port
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// * `MissingSigningKey` - production mode without `JWT_SECRET`
    /// * `MissingDatabase` - production mode without `DATABASE_URL`
    /// * `InvalidValue` - unparseable `COOKIE_SAME_SITE` or `SERVER_PORT`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = RuntimeMode::from_env_value(lookup("APP_ENV").as_deref());
        let signing_key = AuthConfig::resolve_signing_key(mode, lookup("JWT_SECRET"))?;

        let same_site = match lookup("COOKIE_SAME_SITE") {
            Some(value) => SameSitePolicy::parse(&value)?,
            None => SameSitePolicy::default(),
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        if mode.is_production() && database_url.is_none() {
            return Err(ConfigError::MissingDatabase);
        }

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "SERVER_PORT",
                value: raw.clone(),
            })?,
            None => 3000,
        };

        Ok(Self {
            auth: AuthConfig {
                signing_key,
                mode,
                same_site,
            },
            cors_origins,
            database_url,
            port,
        })
    }
}

/// Connect to PostgreSQL and run migrations
///
/// This function:
/// 1. Creates a PostgreSQL connection pool
/// 2. Runs the embedded migrations in `migrations/`
///
/// Unlike configuration errors, a migration failure is logged and startup
/// continues: the schema may already be current.
pub async fn load_database(database_url: &str) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let pool = PgPool::connect(database_url).await?;

    tracing::info!("Database connection pool created successfully");
    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Ok(pool)
}
