use crate::engine::ValidationMode;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub tax_service_url: String,
    pub request_timeout_ms: u64,
    pub retry_max_elapsed_ms: u64,
    pub client_profile: String,
    pub validation_mode: ValidationMode,
    pub default_currency_code: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let tax_service_url = env_map
            .get("TAX_SERVICE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("TAX_SERVICE_URL".to_string()))?;

        let request_timeout_ms = parse_millis(&env_map, "REQUEST_TIMEOUT_MS", "300000")?;
        let retry_max_elapsed_ms = parse_millis(&env_map, "RETRY_MAX_ELAPSED_MS", "30000")?;

        let client_profile = env_map
            .get("CLIENT_PROFILE")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or("taxbridge")
            .to_string();

        let validation_mode = env_map
            .get("VALIDATION_MODE")
            .map(|s| s.as_str())
            .unwrap_or("permissive")
            .parse::<ValidationMode>()
            .map_err(|reason| ConfigError::InvalidValue("VALIDATION_MODE".to_string(), reason))?;

        let default_currency_code = match env_map.get("DEFAULT_CURRENCY_CODE").map(|s| s.trim()) {
            None | Some("") => None,
            Some(code) if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
                Some(code.to_ascii_uppercase())
            }
            Some(other) => {
                return Err(ConfigError::InvalidValue(
                    "DEFAULT_CURRENCY_CODE".to_string(),
                    format!("must be a 3-letter ISO 4217 code, got {}", other),
                ))
            }
        };

        Ok(Config {
            tax_service_url,
            request_timeout_ms,
            retry_max_elapsed_ms,
            client_profile,
            validation_mode,
            default_currency_code,
        })
    }
}

fn parse_millis(
    env_map: &HashMap<String, String>,
    key: &str,
    default: &str,
) -> Result<u64, ConfigError> {
    let value = env_map
        .get(key)
        .map(|s| s.as_str())
        .unwrap_or(default)
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue(key.to_string(), "must be a valid u64".to_string()))?;
    if value == 0 {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert(
            "TAX_SERVICE_URL".to_string(),
            "https://tax.example.com/1.0".to_string(),
        );
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.request_timeout_ms, 300_000);
        assert_eq!(config.retry_max_elapsed_ms, 30_000);
        assert_eq!(config.client_profile, "taxbridge");
        assert_eq!(config.validation_mode, ValidationMode::Permissive);
        assert_eq!(config.default_currency_code, None);
    }

    #[test]
    fn test_missing_tax_service_url() {
        let mut env_map = setup_required_env();
        env_map.remove("TAX_SERVICE_URL");
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "TAX_SERVICE_URL"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_blank_tax_service_url_is_missing() {
        let mut env_map = setup_required_env();
        env_map.insert("TAX_SERVICE_URL".to_string(), "  ".to_string());
        assert!(matches!(
            Config::from_env_map(env_map),
            Err(ConfigError::MissingEnv(_))
        ));
    }

    #[test]
    fn test_invalid_timeout() {
        let mut env_map = setup_required_env();
        env_map.insert("REQUEST_TIMEOUT_MS".to_string(), "soon".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "REQUEST_TIMEOUT_MS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_zero_retry_budget_rejected() {
        let mut env_map = setup_required_env();
        env_map.insert("RETRY_MAX_ELAPSED_MS".to_string(), "0".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "RETRY_MAX_ELAPSED_MS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_validation_mode() {
        let mut env_map = setup_required_env();
        env_map.insert("VALIDATION_MODE".to_string(), "lenient".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "VALIDATION_MODE"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_strict_mode_and_currency() {
        let mut env_map = setup_required_env();
        env_map.insert("VALIDATION_MODE".to_string(), "strict".to_string());
        env_map.insert("DEFAULT_CURRENCY_CODE".to_string(), "usd".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.validation_mode, ValidationMode::Strict);
        assert_eq!(config.default_currency_code.as_deref(), Some("USD"));
    }

    #[test]
    fn test_invalid_currency() {
        let mut env_map = setup_required_env();
        env_map.insert("DEFAULT_CURRENCY_CODE".to_string(), "dollars".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "DEFAULT_CURRENCY_CODE"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
