use std::path::PathBuf;

use passvault_client_core::auth::{AuthInputError, normalize_base_url, resolve_api_base_url};

pub const ENV_TOKEN_PATH: &str = "PASSVAULT_TOKEN_PATH";
pub const ENV_LOG: &str = "PASSVAULT_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

const TOKEN_FILE_NAME: &str = "auth_token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub base_url: String,
    pub base_url_source: &'static str,
    pub token_path: PathBuf,
}

impl CliConfig {
    /// Flags win over environment, environment over defaults.
    pub fn resolve(
        base_url_flag: Option<&str>,
        token_path_flag: Option<PathBuf>,
    ) -> Result<Self, AuthInputError> {
        let (base_url, base_url_source) = match base_url_flag {
            Some(raw) => (normalize_base_url(raw)?, "flag"),
            None => resolve_api_base_url()?,
        };
        let token_path = token_path_flag
            .or_else(env_token_path)
            .unwrap_or_else(default_token_path);
        Ok(Self {
            base_url,
            base_url_source,
            token_path,
        })
    }
}

fn env_token_path() -> Option<PathBuf> {
    std::env::var(ENV_TOKEN_PATH)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn default_token_path() -> PathBuf {
    if let Some(mut config_dir) = dirs::config_dir() {
        config_dir.push("passvault");
        config_dir.push(TOKEN_FILE_NAME);
        return config_dir;
    }

    if let Some(mut home_dir) = dirs::home_dir() {
        home_dir.push(".passvault");
        home_dir.push(TOKEN_FILE_NAME);
        return home_dir;
    }

    PathBuf::from(TOKEN_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use passvault_client_core::auth::{DEFAULT_API_BASE_URL, ENV_API_BASE_URL};
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn with_env<T>(vars: &[(&str, Option<&str>)], test: impl FnOnce() -> T) -> T {
        let lock = ENV_LOCK.get_or_init(|| Mutex::new(()));
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let previous = vars
            .iter()
            .map(|(key, _)| (*key, std::env::var(key).ok()))
            .collect::<Vec<_>>();
        for (key, value) in vars {
            match value {
                Some(value) => unsafe { std::env::set_var(key, value) },
                None => unsafe { std::env::remove_var(key) },
            }
        }

        let result = test();

        for (key, value) in previous {
            match value {
                Some(value) => unsafe { std::env::set_var(key, value) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
        result
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        with_env(&[(ENV_API_BASE_URL, None), (ENV_TOKEN_PATH, None)], || {
            let config = CliConfig::resolve(None, None).expect("config");
            assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
            assert_eq!(config.base_url_source, "default_local");
            assert!(config.token_path.ends_with(TOKEN_FILE_NAME));
        });
    }

    #[test]
    fn env_overrides_defaults() {
        with_env(
            &[
                (ENV_API_BASE_URL, Some("https://vault.example.com/")),
                (ENV_TOKEN_PATH, Some("/tmp/passvault-token")),
            ],
            || {
                let config = CliConfig::resolve(None, None).expect("config");
                assert_eq!(config.base_url, "https://vault.example.com");
                assert_eq!(config.base_url_source, ENV_API_BASE_URL);
                assert_eq!(config.token_path, PathBuf::from("/tmp/passvault-token"));
            },
        );
    }

    #[test]
    fn flags_override_env() {
        with_env(
            &[
                (ENV_API_BASE_URL, Some("https://vault.example.com")),
                (ENV_TOKEN_PATH, Some("/tmp/from-env")),
            ],
            || {
                let config = CliConfig::resolve(
                    Some("http://localhost:9000/"),
                    Some(PathBuf::from("/tmp/from-flag")),
                )
                .expect("config");
                assert_eq!(config.base_url, "http://localhost:9000");
                assert_eq!(config.base_url_source, "flag");
                assert_eq!(config.token_path, PathBuf::from("/tmp/from-flag"));
            },
        );
    }

    #[test]
    fn invalid_flag_is_rejected() {
        let error = CliConfig::resolve(Some("ftp://vault"), None).expect_err("invalid");
        assert_eq!(error, AuthInputError::InvalidBaseUrl);
    }
}
