use thiserror::Error;

/** \brief Default OpenAI-compatible upstream base address. */
pub const DEFAULT_BASE_URL: &str = "https://api.apifree.ai/v1";
/** \brief Default upstream model identifier. */
pub const DEFAULT_MODEL: &str = "openai/gpt-5.2";

pub const ENV_API_KEY: &str = "API";
pub const ENV_AUTH_SECRET: &str = "APP_AUTH";
pub const ENV_BASE_URL: &str = "LUMI_BASE_URL";
pub const ENV_MODEL: &str = "LUMI_MODEL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing upstream API key (set the API environment variable)")]
    MissingApiKey,
}

/**
 * \brief Process-wide gateway configuration, built once at startup and never mutated.
 */
#[derive(Clone)]
pub struct Config {
    /** \brief Upstream API base address, e.g. "https://api.apifree.ai/v1" */
    pub base_url: String,
    /** \brief Model identifier forwarded upstream */
    pub model: String,
    /** \brief Upstream API key */
    pub api_key: String,
    /** \brief Shared link secret; `None` means every protected request is refused. */
    pub auth_secret: Option<String>,
}

impl Config {
    /**
     * \brief Reads configuration from the process environment.
     */
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /**
     * \brief Builds configuration from an arbitrary key lookup. Empty values count as unset.
     */
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?;
        Ok(Self {
            base_url: non_empty(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: non_empty(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            auth_secret: non_empty(ENV_AUTH_SECRET),
        })
    }
}

// Keeps the key and secret out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("auth_secret", &self.auth_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
