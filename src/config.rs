use std::path::PathBuf;

pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_CHAT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_CHAT_MODEL: &str = "mixtral-8x7b-32768";
pub const DEFAULT_CHAT_RATE_LIMIT: usize = 20;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("{name} must be true or false, got {value:?}")]
    InvalidFlag { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    /// Requests per minute per client address.
    pub rate_limit: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_CHAT_API_BASE.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            rate_limit: DEFAULT_CHAT_RATE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub store_dir: Option<PathBuf>,
    /// Rate limit on the `X-Forwarded-For` client instead of the socket peer.
    pub trust_proxy_headers: bool,
    pub chat: ChatSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| {
            let port = var("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
            format!("0.0.0.0:{}", port)
        });

        let rate_limit = match var("CHAT_RATE_LIMIT") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "CHAT_RATE_LIMIT",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_CHAT_RATE_LIMIT,
        };

        let trust_proxy_headers = match var("TRUST_PROXY_HEADERS") {
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        name: "TRUST_PROXY_HEADERS",
                        value: raw,
                    })
                }
            },
            None => false,
        };

        Ok(Self {
            bind_addr,
            store_dir: var("STORE_DIR").map(PathBuf::from),
            trust_proxy_headers,
            chat: ChatSettings {
                api_key: var("GROQ_API_KEY").or_else(|| var("OPENAI_API_KEY")),
                api_base: var("CHAT_API_BASE")
                    .unwrap_or_else(|| DEFAULT_CHAT_API_BASE.to_string()),
                model: var("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
                rate_limit,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.store_dir, None);
        assert!(!config.trust_proxy_headers);
        assert_eq!(config.chat, ChatSettings::default());
    }

    #[test]
    fn proxy_header_trust_is_an_explicit_flag() {
        assert!(config_from(&[("TRUST_PROXY_HEADERS", "TRUE")]).unwrap().trust_proxy_headers);
        assert!(!config_from(&[("TRUST_PROXY_HEADERS", "0")]).unwrap().trust_proxy_headers);
        assert_eq!(
            config_from(&[("TRUST_PROXY_HEADERS", "maybe")]).unwrap_err(),
            ConfigError::InvalidFlag {
                name: "TRUST_PROXY_HEADERS",
                value: "maybe".to_string()
            }
        );
    }

    #[test]
    fn bind_addr_wins_over_port() {
        let config = config_from(&[("BIND_ADDR", "127.0.0.1:8080"), ("PORT", "9000")]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");

        let config = config_from(&[("PORT", "9000")]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn groq_key_preferred_over_openai_key() {
        let config = config_from(&[("GROQ_API_KEY", "gsk"), ("OPENAI_API_KEY", "sk")]).unwrap();
        assert_eq!(config.chat.api_key.as_deref(), Some("gsk"));

        let config = config_from(&[("GROQ_API_KEY", "  "), ("OPENAI_API_KEY", "sk")]).unwrap();
        assert_eq!(config.chat.api_key.as_deref(), Some("sk"));
    }

    #[test]
    fn chat_overrides_and_store_dir() {
        let config = config_from(&[
            ("CHAT_API_BASE", "https://api.openai.com/v1"),
            ("CHAT_MODEL", "gpt-4o-mini"),
            ("CHAT_RATE_LIMIT", "5"),
            ("STORE_DIR", "/var/lib/wellplan"),
        ])
        .unwrap();
        assert_eq!(config.chat.api_base, "https://api.openai.com/v1");
        assert_eq!(config.chat.model, "gpt-4o-mini");
        assert_eq!(config.chat.rate_limit, 5);
        assert_eq!(config.store_dir, Some(PathBuf::from("/var/lib/wellplan")));
    }

    #[test]
    fn invalid_rate_limit_is_rejected() {
        for bad in ["zero", "0", "-3"] {
            let err = config_from(&[("CHAT_RATE_LIMIT", bad)]).unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    name: "CHAT_RATE_LIMIT",
                    value: bad.to_string()
                }
            );
        }
    }
}
