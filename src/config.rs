use std::env;
use std::time::Duration;

use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_NOTICE_DISMISS_MS: u64 = 3000;
/// Log filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "book_catalog_form=debug";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub notice_dismiss: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base_url = env::var("API_BASE_URL")
            .ok()
            .and_then(|raw| match Url::parse(&raw) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => Some(raw),
                Ok(url) => {
                    tracing::warn!("Ignoring API_BASE_URL with scheme '{}'", url.scheme());
                    None
                }
                Err(e) => {
                    tracing::warn!("Ignoring invalid API_BASE_URL '{}': {}", raw, e);
                    None
                }
            })
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self {
            api_base_url,
            notice_dismiss: Duration::from_millis(
                env::var("NOTICE_DISMISS_MS")
                    .ok()
                    .and_then(|ms| ms.parse().ok())
                    .unwrap_or(DEFAULT_NOTICE_DISMISS_MS),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // SAFETY (all tests): env mutation is serialized by #[serial]
    fn clear_env() {
        unsafe {
            env::remove_var("API_BASE_URL");
            env::remove_var("NOTICE_DISMISS_MS");
        }
    }

    #[test]
    fn test_default_log_filter_is_valid() {
        assert_eq!(DEFAULT_LOG_FILTER, "book_catalog_form=debug");
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.notice_dismiss, Duration::from_millis(3000));
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        unsafe {
            env::set_var("API_BASE_URL", "https://books.example.com/catalog");
            env::set_var("NOTICE_DISMISS_MS", "500");
        }

        let config = Config::from_env();
        assert_eq!(config.api_base_url, "https://books.example.com/catalog");
        assert_eq!(config.notice_dismiss, Duration::from_millis(500));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back() {
        clear_env();
        unsafe {
            env::set_var("API_BASE_URL", "not a url");
            env::set_var("NOTICE_DISMISS_MS", "soon");
        }

        let config = Config::from_env();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.notice_dismiss, Duration::from_millis(3000));

        unsafe { env::set_var("API_BASE_URL", "ftp://books.example.com") };
        assert_eq!(Config::from_env().api_base_url, DEFAULT_API_BASE_URL);
        clear_env();
    }
}
