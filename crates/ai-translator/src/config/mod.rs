use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name under which the Gemini credential is looked up in every source.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

const DEFAULT_SECRETS_FILE: &str = "secrets.toml";
const DEFAULT_DOTENV_FILE: &str = ".env";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the translator.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    /// Resolves the API key, then reads the remaining settings from the
    /// process environment with the same `.env` file merged in.
    pub fn load() -> Result<Self, ConfigError> {
        let resolver = ApiKeyResolver::from_env();
        let (api_key, key_source) = resolver.resolve(|name| env::var(name).ok())?;

        dotenvy::from_path(resolver.dotenv_path()).ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_base =
            env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let timeout = match env::var("GEMINI_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            gemini: GeminiConfig {
                api_key,
                key_source,
                model,
                api_base,
                timeout,
            },
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Connection settings for the hosted Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: ApiKey,
    pub key_source: ApiKeySource,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Settings for a given key with every other field at its default.
    pub fn with_key(api_key: ApiKey) -> Self {
        Self {
            api_key,
            key_source: ApiKeySource::Environment,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Secret credential for the model API. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Where the API key was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    SecretsFile(PathBuf),
    Environment,
    DotEnv(PathBuf),
}

impl fmt::Display for ApiKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKeySource::SecretsFile(path) => write!(f, "secrets file {}", path.display()),
            ApiKeySource::Environment => f.write_str("process environment"),
            ApiKeySource::DotEnv(path) => write!(f, "dotenv file {}", path.display()),
        }
    }
}

/// Looks up the API key in the secrets file, the process environment, and
/// the `.env` file, in that order. The first non-blank value wins.
#[derive(Debug, Clone)]
pub struct ApiKeyResolver {
    secrets_path: PathBuf,
    dotenv_path: PathBuf,
}

impl ApiKeyResolver {
    pub fn new(secrets_path: impl Into<PathBuf>, dotenv_path: impl Into<PathBuf>) -> Self {
        Self {
            secrets_path: secrets_path.into(),
            dotenv_path: dotenv_path.into(),
        }
    }

    /// Paths come from `APP_SECRETS_FILE` and `APP_DOTENV_FILE`, defaulting
    /// to `secrets.toml` and `.env` in the working directory.
    pub fn from_env() -> Self {
        let secrets_path =
            env::var("APP_SECRETS_FILE").unwrap_or_else(|_| DEFAULT_SECRETS_FILE.to_string());
        let dotenv_path =
            env::var("APP_DOTENV_FILE").unwrap_or_else(|_| DEFAULT_DOTENV_FILE.to_string());
        Self::new(secrets_path, dotenv_path)
    }

    pub fn dotenv_path(&self) -> &Path {
        &self.dotenv_path
    }

    pub fn resolve<F>(&self, lookup: F) -> Result<(ApiKey, ApiKeySource), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = self.read_secrets_file()? {
            return Ok((key, ApiKeySource::SecretsFile(self.secrets_path.clone())));
        }

        if let Some(key) = lookup(API_KEY_VAR).and_then(non_blank) {
            return Ok((key, ApiKeySource::Environment));
        }

        if let Some(key) = self.read_dotenv_file()? {
            return Ok((key, ApiKeySource::DotEnv(self.dotenv_path.clone())));
        }

        Err(ConfigError::MissingApiKey {
            secrets_path: self.secrets_path.clone(),
            dotenv_path: self.dotenv_path.clone(),
        })
    }

    fn read_secrets_file(&self) -> Result<Option<ApiKey>, ConfigError> {
        let raw = match fs::read_to_string(&self.secrets_path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::SecretsRead {
                    path: self.secrets_path.clone(),
                    source,
                })
            }
        };

        let table: toml::Table =
            toml::from_str(&raw).map_err(|source| ConfigError::SecretsParse {
                path: self.secrets_path.clone(),
                source,
            })?;

        Ok(table
            .get(API_KEY_VAR)
            .and_then(toml::Value::as_str)
            .map(str::to_string)
            .and_then(non_blank))
    }

    fn read_dotenv_file(&self) -> Result<Option<ApiKey>, ConfigError> {
        let entries = match dotenvy::from_path_iter(&self.dotenv_path) {
            Ok(entries) => entries,
            Err(err) if err.not_found() => return Ok(None),
            Err(source) => return Err(self.dotenv_error(source)),
        };

        for entry in entries {
            let (name, value) = entry.map_err(|source| self.dotenv_error(source))?;
            if name == API_KEY_VAR {
                return Ok(non_blank(value));
            }
        }

        Ok(None)
    }

    fn dotenv_error(&self, source: dotenvy::Error) -> ConfigError {
        ConfigError::DotEnv {
            path: self.dotenv_path.clone(),
            source,
        }
    }
}

fn non_blank(value: String) -> Option<ApiKey> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(ApiKey::new(trimmed))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidTimeout,
    MissingApiKey {
        secrets_path: PathBuf,
        dotenv_path: PathBuf,
    },
    SecretsRead {
        path: PathBuf,
        source: io::Error,
    },
    SecretsParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    DotEnv {
        path: PathBuf,
        source: dotenvy::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "GEMINI_TIMEOUT_SECS must be a positive number of seconds")
            }
            ConfigError::MissingApiKey {
                secrets_path,
                dotenv_path,
            } => write!(
                f,
                "{API_KEY_VAR} not found! Set it in {}, the process environment, or {}",
                secrets_path.display(),
                dotenv_path.display()
            ),
            ConfigError::SecretsRead { path, .. } => {
                write!(f, "unable to read secrets file {}", path.display())
            }
            ConfigError::SecretsParse { path, .. } => {
                write!(f, "secrets file {} is not valid TOML", path.display())
            }
            ConfigError::DotEnv { path, .. } => {
                write!(f, "unable to load dotenv file {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::SecretsRead { source, .. } => Some(source),
            ConfigError::SecretsParse { source, .. } => Some(source),
            ConfigError::DotEnv { source, .. } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout
            | ConfigError::MissingApiKey { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env(dir: &TempDir) {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("GEMINI_MODEL");
        env::remove_var("GEMINI_API_BASE");
        env::remove_var("GEMINI_TIMEOUT_SECS");
        env::set_var(API_KEY_VAR, "env-key");
        env::set_var("APP_SECRETS_FILE", dir.path().join("absent.toml"));
        env::set_var("APP_DOTENV_FILE", dir.path().join("absent.env"));
    }

    fn resolver(dir: &TempDir) -> ApiKeyResolver {
        ApiKeyResolver::new(dir.path().join("secrets.toml"), dir.path().join(".env"))
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        let dir = TempDir::new().expect("temp dir");
        reset_env(&dir);
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.gemini.timeout, Duration::from_secs(30));
        assert_eq!(config.gemini.api_key.expose(), "env-key");
        assert_eq!(config.gemini.key_source, ApiKeySource::Environment);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        let dir = TempDir::new().expect("temp dir");
        reset_env(&dir);
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn rejects_zero_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        let dir = TempDir::new().expect("temp dir");
        reset_env(&dir);
        env::set_var("GEMINI_TIMEOUT_SECS", "0");
        let err = AppConfig::load().expect_err("zero timeout rejected");
        assert!(matches!(err, ConfigError::InvalidTimeout));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        let dir = TempDir::new().expect("temp dir");
        reset_env(&dir);
        env::set_var("GEMINI_TIMEOUT_SECS", "soon");
        let err = AppConfig::load().expect_err("timeout must be numeric");
        assert!(matches!(err, ConfigError::InvalidTimeout));
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        let dir = TempDir::new().expect("temp dir");
        reset_env(&dir);
        env::set_var("APP_PORT", "70000");
        let err = AppConfig::load().expect_err("port out of range");
        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn key_and_settings_come_from_the_same_dotenv_file() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        let dir = TempDir::new().expect("temp dir");
        reset_env(&dir);
        env::remove_var(API_KEY_VAR);
        let dotenv = dir.path().join("service.env");
        fs::write(&dotenv, "GEMINI_API_KEY=from-dotenv\nAPP_PORT=4100\n").expect("write env");
        env::set_var("APP_DOTENV_FILE", &dotenv);

        let config = AppConfig::load().expect("config loads");

        assert_eq!(config.gemini.api_key.expose(), "from-dotenv");
        assert_eq!(config.gemini.key_source, ApiKeySource::DotEnv(dotenv));
        assert_eq!(config.server.port, 4100);
        env::remove_var("APP_PORT");
        env::remove_var(API_KEY_VAR);
    }

    #[test]
    fn secrets_file_wins_over_environment_and_dotenv() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("secrets.toml"), "GEMINI_API_KEY = \"from-secrets\"\n")
            .expect("write secrets");
        fs::write(dir.path().join(".env"), "GEMINI_API_KEY=from-dotenv\n").expect("write env");

        let (key, source) = resolver(&dir)
            .resolve(|_| Some("from-env".to_string()))
            .expect("key resolves");

        assert_eq!(key.expose(), "from-secrets");
        assert_eq!(
            source,
            ApiKeySource::SecretsFile(dir.path().join("secrets.toml"))
        );
    }

    #[test]
    fn environment_wins_over_dotenv() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join(".env"), "GEMINI_API_KEY=from-dotenv\n").expect("write env");

        let (key, source) = resolver(&dir)
            .resolve(|name| (name == API_KEY_VAR).then(|| "from-env".to_string()))
            .expect("key resolves");

        assert_eq!(key.expose(), "from-env");
        assert_eq!(source, ApiKeySource::Environment);
    }

    #[test]
    fn falls_back_to_dotenv_file() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(
            dir.path().join(".env"),
            "APP_PORT=4000\nGEMINI_API_KEY=\"from-dotenv\"\n",
        )
        .expect("write env");

        let (key, source) = resolver(&dir).resolve(no_env).expect("key resolves");

        assert_eq!(key.expose(), "from-dotenv");
        assert_eq!(source, ApiKeySource::DotEnv(dir.path().join(".env")));
    }

    #[test]
    fn blank_values_are_skipped() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("secrets.toml"), "GEMINI_API_KEY = \"   \"\n")
            .expect("write secrets");

        let (key, source) = resolver(&dir)
            .resolve(|_| Some("from-env".to_string()))
            .expect("key resolves");

        assert_eq!(key.expose(), "from-env");
        assert_eq!(source, ApiKeySource::Environment);
    }

    #[test]
    fn missing_everywhere_names_all_sources() {
        let dir = TempDir::new().expect("temp dir");
        let err = resolver(&dir).resolve(no_env).expect_err("no key");

        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
        let message = err.to_string();
        assert!(message.contains("GEMINI_API_KEY not found"));
        assert!(message.contains("secrets.toml"));
        assert!(message.contains(".env"));
    }

    #[test]
    fn malformed_secrets_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("secrets.toml"), "GEMINI_API_KEY = ").expect("write secrets");

        let err = resolver(&dir)
            .resolve(|_| Some("from-env".to_string()))
            .expect_err("parse failure surfaces");

        assert!(matches!(err, ConfigError::SecretsParse { .. }));
    }

    #[test]
    fn malformed_dotenv_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join(".env"), "this line is broken\nGEMINI_API_KEY=x\n")
            .expect("write env");

        let err = resolver(&dir).resolve(no_env).expect_err("parse failure surfaces");

        assert!(matches!(err, ConfigError::DotEnv { .. }));
    }

    #[test]
    fn api_key_is_redacted_when_formatted() {
        let key = ApiKey::new("super-secret");
        assert!(!format!("{key:?}").contains("super-secret"));
        assert!(!format!("{key}").contains("super-secret"));
    }
}
