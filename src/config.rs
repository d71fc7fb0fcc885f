use std::time::Duration;
use std::{env, io};

use serde::Serialize;
use tracing::debug;

pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_GEOCODER_USER_AGENT: &str = "Addressify/1.0 (Contact: your-email@example.com)";
const DEFAULT_GEOCODER_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub geocoder_base_url: String,
    pub geocoder_user_agent: String,
    pub geocoder_timeout_secs: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct PublicAppConfig {
    pub geocoder_base_url: String,
    pub geocoder_user_agent: String,
    pub geocoder_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            geocoder_base_url: DEFAULT_GEOCODER_BASE_URL.to_string(),
            geocoder_user_agent: DEFAULT_GEOCODER_USER_AGENT.to_string(),
            geocoder_timeout_secs: DEFAULT_GEOCODER_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        load_dotenv_if_applicable();
        Self {
            geocoder_base_url: parse_string("GEOCODER_BASE_URL", DEFAULT_GEOCODER_BASE_URL),
            geocoder_user_agent: parse_string("GEOCODER_USER_AGENT", DEFAULT_GEOCODER_USER_AGENT),
            geocoder_timeout_secs: parse_u64(
                "GEOCODER_TIMEOUT_SECS",
                DEFAULT_GEOCODER_TIMEOUT_SECS,
            ),
        }
    }

    /// Points the client at another provider endpoint, e.g. a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.geocoder_base_url = base_url.into();
        self
    }

    /// `None` when the timeout is disabled with `GEOCODER_TIMEOUT_SECS=0`.
    pub fn geocoder_timeout(&self) -> Option<Duration> {
        (self.geocoder_timeout_secs > 0).then(|| Duration::from_secs(self.geocoder_timeout_secs))
    }

    pub fn public_profile(&self) -> PublicAppConfig {
        PublicAppConfig {
            geocoder_base_url: self.geocoder_base_url.clone(),
            geocoder_user_agent: self.geocoder_user_agent.clone(),
            geocoder_timeout_secs: self.geocoder_timeout_secs,
        }
    }
}

fn load_dotenv_if_applicable() {
    if !should_load_dotenv() {
        debug!("skipping .env load outside dev mode");
        return;
    }

    if let Err(err) = dotenvy::dotenv() {
        match &err {
            dotenvy::Error::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {}
            _ => debug!(?err, "unable to load .env file"),
        }
    }
}

fn should_load_dotenv() -> bool {
    cfg!(debug_assertions) || parse_bool("ALLOW_DOTENV", false)
}

fn parse_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(default)
}

fn parse_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_string(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_geocoder_settings_from_env() {
        env::set_var("GEOCODER_BASE_URL", "http://127.0.0.1:9/search");
        env::set_var("GEOCODER_USER_AGENT", "  ");
        env::set_var("GEOCODER_TIMEOUT_SECS", "0");

        let config = AppConfig::from_env();
        let public = config.public_profile();

        assert_eq!(public.geocoder_base_url, "http://127.0.0.1:9/search");
        assert_eq!(public.geocoder_user_agent, DEFAULT_GEOCODER_USER_AGENT);
        assert_eq!(public.geocoder_timeout_secs, 0);
        assert!(config.geocoder_timeout().is_none());

        env::remove_var("GEOCODER_BASE_URL");
        env::remove_var("GEOCODER_USER_AGENT");
        env::remove_var("GEOCODER_TIMEOUT_SECS");
    }

    #[test]
    fn default_config_has_a_timeout() {
        let config = AppConfig::default().with_base_url("http://stub/search");
        assert_eq!(config.geocoder_base_url, "http://stub/search");
        assert_eq!(config.geocoder_timeout(), Some(Duration::from_secs(10)));
    }
}
