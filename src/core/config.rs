use std::env;

use async_openai::config::OpenAIConfig;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
const MODEL_VAR: &str = "SNAP2SOLVE_MODEL";
const ADMIN_PASS_VAR: &str = "SNAP2SOLVE_ADMIN_PASS";
const SHOW_TIMESTAMPS_VAR: &str = "SNAP2SOLVE_SHOW_TIMESTAMPS";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_config: OpenAIConfig,
    pub base_url: String,
    pub model_id: String,
    /// Admin password; admin mode is unavailable when unset.
    pub admin_pass: Option<String>,
    pub show_timestamps: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set (add it to your environment or a .env file)")]
    MissingApiKey,
}

/// Load configuration from environment. Returns an error if API key is missing.
pub fn load() -> Result<Config, ConfigError> {
    from_lookup(|name| env::var(name).ok())
}

/// Build configuration from a variable lookup. Empty values count as unset.
pub(crate) fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let api_key = var(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
    let base_url = var(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let model_id = var(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let admin_pass = var(ADMIN_PASS_VAR);
    let show_timestamps = var(SHOW_TIMESTAMPS_VAR).is_some_and(|v| is_truthy(&v));

    let openai_config = OpenAIConfig::new()
        .with_api_base(base_url.clone())
        .with_api_key(api_key);

    Ok(Config {
        openai_config,
        base_url,
        model_id,
        admin_pass,
        show_timestamps,
    })
}

/// Key/value rows describing the effective configuration, without requiring the API key.
/// Secrets are reported as set/not set only.
pub fn status() -> Vec<(&'static str, String)> {
    status_from_lookup(|name| env::var(name).ok())
}

fn status_from_lookup<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let set_or_not = |name: &str| {
        if var(name).is_some() {
            "set".to_string()
        } else {
            "not set".to_string()
        }
    };
    vec![
        (API_KEY_VAR, set_or_not(API_KEY_VAR)),
        (
            BASE_URL_VAR,
            var(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        ),
        (
            MODEL_VAR,
            var(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        ),
        (ADMIN_PASS_VAR, set_or_not(ADMIN_PASS_VAR)),
        (
            SHOW_TIMESTAMPS_VAR,
            var(SHOW_TIMESTAMPS_VAR)
                .is_some_and(|v| is_truthy(&v))
                .to_string(),
        ),
    ]
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_api_key_is_error() {
        let err = from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn blank_api_key_is_error() {
        let err = from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn defaults_when_only_key_set() {
        let config = from_lookup(lookup(&[(API_KEY_VAR, "sk-test")])).unwrap();
        assert_eq!(config.model_id, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.admin_pass.is_none());
        assert!(!config.show_timestamps);
    }

    #[test]
    fn overrides_are_read() {
        let config = from_lookup(lookup(&[
            (API_KEY_VAR, "sk-test"),
            (BASE_URL_VAR, "http://localhost:8080/v1"),
            (MODEL_VAR, "gpt-4o-mini"),
            (ADMIN_PASS_VAR, "hunter2"),
            (SHOW_TIMESTAMPS_VAR, "true"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.model_id, "gpt-4o-mini");
        assert_eq!(config.admin_pass.as_deref(), Some("hunter2"));
        assert!(config.show_timestamps);
    }

    #[test]
    fn status_hides_secrets() {
        let rows = status_from_lookup(lookup(&[
            (API_KEY_VAR, "sk-secret"),
            (ADMIN_PASS_VAR, "hunter2"),
        ]));
        assert!(rows.iter().all(|(_, v)| !v.contains("sk-secret")));
        assert!(rows.iter().all(|(_, v)| !v.contains("hunter2")));
        assert!(rows.contains(&(API_KEY_VAR, "set".to_string())));
        assert!(rows.contains(&(MODEL_VAR, DEFAULT_MODEL.to_string())));
    }

    #[test]
    fn status_without_key() {
        let rows = status_from_lookup(lookup(&[]));
        assert!(rows.contains(&(API_KEY_VAR, "not set".to_string())));
    }

    #[test]
    fn truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" YES "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("nope"));
    }
}
