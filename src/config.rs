//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LINK_BACKEND="sqlite"
//! export DATABASE_URL="sqlite://links.db"
//! export TEMPLATE_IMAGE_PATH="assets/template.png"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `LINK_BACKEND` - `sqlite` or `json` (default: `sqlite`)
//! - `DATABASE_URL` - SQLite URL (default: `sqlite://links.db`)
//! - `DB_MAX_CONNECTIONS` - SQLite pool size (default: 5)
//! - `LINKS_FILE` - JSON backend document (default: `links.json`)
//! - `TEMPLATE_IMAGE_PATH` - Caption template image (default: `assets/template.png`)
//! - `FONTS_DIR` - Extra font directory for caption rendering
//! - `PUBLIC_BASE_URL` - Absolute prefix for generated short URLs
//! - `REDIRECT_DELAY_SECONDS` - Delay before the redirect page navigates (default: 5)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Storage backend for links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkBackend {
    Sqlite,
    JsonFile,
}

impl FromStr for LinkBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(LinkBackend::Sqlite),
            "json" | "file" => Ok(LinkBackend::JsonFile),
            other => anyhow::bail!("LINK_BACKEND must be 'sqlite' or 'json', got '{}'", other),
        }
    }
}

impl fmt::Display for LinkBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkBackend::Sqlite => write!(f, "sqlite"),
            LinkBackend::JsonFile => write!(f, "json"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub link_backend: LinkBackend,
    pub database_url: String,
    /// Maximum number of connections in the SQLite pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    pub links_file: PathBuf,
    pub template_image_path: PathBuf,
    pub fonts_dir: Option<PathBuf>,
    /// Prefix for absolute short URLs. When unset, `shortUrl` is a site-relative path.
    pub public_base_url: Option<String>,
    pub redirect_delay_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `LINK_BACKEND` names an unknown backend.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let link_backend = env::var("LINK_BACKEND")
            .ok()
            .map(|v| v.parse::<LinkBackend>())
            .transpose()
            .context("Failed to load storage configuration")?
            .unwrap_or(LinkBackend::Sqlite);

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://links.db".to_string());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let links_file = env::var("LINKS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("links.json"));

        let template_image_path = env::var("TEMPLATE_IMAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("assets/template.png"));

        let fonts_dir = env::var("FONTS_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| v.trim_end_matches('/').to_string());

        let redirect_delay_seconds = env::var("REDIRECT_DELAY_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            link_backend,
            database_url,
            db_max_connections,
            links_file,
            template_image_path,
            fonts_dir,
            public_base_url,
            redirect_delay_seconds,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `database_url` is not a SQLite URL while the SQLite backend is selected
    /// - `public_base_url` is not an absolute http(s) URL
    /// - `redirect_delay_seconds` exceeds 60
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.link_backend == LinkBackend::Sqlite && !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        if self.link_backend == LinkBackend::JsonFile && self.links_file.as_os_str().is_empty() {
            anyhow::bail!("LINKS_FILE must not be empty");
        }

        if let Some(ref base) = self.public_base_url {
            let parsed = url::Url::parse(base)
                .with_context(|| format!("PUBLIC_BASE_URL is not a valid URL: '{}'", base))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!(
                    "PUBLIC_BASE_URL must use http or https, got '{}'",
                    parsed.scheme()
                );
            }
        }

        if self.redirect_delay_seconds > 60 {
            anyhow::bail!(
                "REDIRECT_DELAY_SECONDS must be between 0 and 60, got {}",
                self.redirect_delay_seconds
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        match self.link_backend {
            LinkBackend::Sqlite => tracing::info!("  Storage: sqlite ({})", self.database_url),
            LinkBackend::JsonFile => {
                tracing::info!("  Storage: json ({})", self.links_file.display())
            }
        }
        tracing::info!("  Template image: {}", self.template_image_path.display());
        if let Some(ref dir) = self.fonts_dir {
            tracing::info!("  Extra fonts: {}", dir.display());
        }
        tracing::info!(
            "  Public base URL: {}",
            self.public_base_url.as_deref().unwrap_or("(relative)")
        );
        tracing::info!("  Redirect delay: {}s", self.redirect_delay_seconds);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn base_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            link_backend: LinkBackend::Sqlite,
            database_url: "sqlite://links.db".to_string(),
            db_max_connections: 5,
            links_file: PathBuf::from("links.json"),
            template_image_path: PathBuf::from("assets/template.png"),
            fonts_dir: None,
            public_base_url: None,
            redirect_delay_seconds: 5,
        }
    }

    #[test]
    fn test_link_backend_parse() {
        assert_eq!("sqlite".parse::<LinkBackend>().unwrap(), LinkBackend::Sqlite);
        assert_eq!("JSON".parse::<LinkBackend>().unwrap(), LinkBackend::JsonFile);
        assert_eq!("file".parse::<LinkBackend>().unwrap(), LinkBackend::JsonFile);
        assert!("postgres".parse::<LinkBackend>().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = base_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        config.database_url = "postgres://localhost/test".to_string();
        assert!(config.validate().is_err());

        // The database URL is irrelevant for the JSON backend.
        config.link_backend = LinkBackend::JsonFile;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_public_base_url_validation() {
        let mut config = base_config();

        config.public_base_url = Some("https://taqui.example".to_string());
        assert!(config.validate().is_ok());

        config.public_base_url = Some("ftp://taqui.example".to_string());
        assert!(config.validate().is_err());

        config.public_base_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redirect_delay_bounds() {
        let mut config = base_config();

        config.redirect_delay_seconds = 0;
        assert!(config.validate().is_ok());

        config.redirect_delay_seconds = 61;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("LINK_BACKEND");
            env::remove_var("PUBLIC_BASE_URL");
            env::remove_var("REDIRECT_DELAY_SECONDS");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.link_backend, LinkBackend::Sqlite);
        assert_eq!(config.redirect_delay_seconds, 5);
        assert!(config.public_base_url.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("LINK_BACKEND", "json");
            env::set_var("LINKS_FILE", "/tmp/custom-links.json");
            env::set_var("PUBLIC_BASE_URL", "https://taqui.example/");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.link_backend, LinkBackend::JsonFile);
        assert_eq!(config.links_file, PathBuf::from("/tmp/custom-links.json"));
        assert_eq!(
            config.public_base_url.as_deref(),
            Some("https://taqui.example")
        );

        // Cleanup
        unsafe {
            env::remove_var("LINK_BACKEND");
            env::remove_var("LINKS_FILE");
            env::remove_var("PUBLIC_BASE_URL");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_backend() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("LINK_BACKEND", "mongo");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("LINK_BACKEND");
        }
    }
}
