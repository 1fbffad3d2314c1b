use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr};

use catalog::CatalogSource;
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_PORT: &str = "1111";
const DEFAULT_CATALOG_SOURCE: &str = "products.csv";
const DEFAULT_FROM_EMAIL: &str = "noreply@thebannercompany.com";
const DEFAULT_TO_EMAIL: &str = "hello@thebannercompany.com";
const DEFAULT_SMTP_PORT: &str = "587";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl SmtpSettings {
    fn load() -> Result<Option<Self>, ConfigError> {
        let Some(host) = var("SMTP_HOST") else {
            info!("SMTP_HOST not set, contact mail is logged only");
            return Ok(None);
        };

        Ok(Some(Self {
            host,
            port: try_load("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            user: var("SMTP_USER"),
            pass: read_secret("SMTP_PASS"),
        }))
    }
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &self.pass.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub catalog_source: CatalogSource,
    pub from_email: String,
    pub to_email: String,
    pub smtp: Option<SmtpSettings>,
    pub contact_log: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("RUST_PORT", DEFAULT_PORT)?,
            catalog_source: try_load("CATALOG_SOURCE", DEFAULT_CATALOG_SOURCE)?,
            from_email: try_load("FROM_EMAIL", DEFAULT_FROM_EMAIL)?,
            to_email: try_load("TO_EMAIL", DEFAULT_TO_EMAIL)?,
            smtp: SmtpSettings::load()?,
            contact_log: var("CONTACT_LOG").map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 1111,
            catalog_source: CatalogSource::Path(PathBuf::from(DEFAULT_CATALOG_SOURCE)),
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            to_email: DEFAULT_TO_EMAIL.to_string(),
            smtp: None,
            contact_log: None,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .ok()
        .filter(|secret| !secret.is_empty())
}
