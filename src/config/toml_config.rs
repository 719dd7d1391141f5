use crate::adapters::google_maps::DEFAULT_GOOGLE_ENDPOINT;
use crate::adapters::nominatim::{DEFAULT_NOMINATIM_ENDPOINT, DEFAULT_USER_AGENT};
use crate::adapters::pos_api::DEFAULT_API_URL;
use crate::core::ConfigProvider;
use crate::utils::error::{PosError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const API_URL_ENV: &str = "API_URL";
pub const GOOGLE_MAPS_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is a valid regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub google_api_key: Option<String>,
    #[serde(default = "default_google_endpoint")]
    pub google_endpoint: String,
    #[serde(default = "default_nominatim_endpoint")]
    pub nominatim_endpoint: String,
    #[serde(default = "default_true")]
    pub nominatim_enabled: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub json: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_google_endpoint() -> String {
    DEFAULT_GOOGLE_ENDPOINT.to_string()
}

fn default_nominatim_endpoint() -> String {
    DEFAULT_NOMINATIM_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_endpoint: default_google_endpoint(),
            nominatim_endpoint: default_nominatim_endpoint(),
            nominatim_enabled: true,
            user_agent: default_user_agent(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PosError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PosError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 沒有設定檔時，使用預設值加上 API_URL / GOOGLE_MAPS_API_KEY 環境變數
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_url) = std::env::var(API_URL_ENV) {
            if !api_url.trim().is_empty() {
                config.backend.api_url = api_url;
            }
        }
        if let Ok(key) = std::env::var(GOOGLE_MAPS_API_KEY_ENV) {
            config.geocoding.google_api_key = Some(key);
        }
        config
    }

    /// 替換環境變數 (例如 ${GOOGLE_MAPS_API_KEY})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_endpoint("backend.api_url", &self.backend.api_url)?;
        validation::validate_timeout_seconds(
            "backend.timeout_seconds",
            self.backend.timeout_seconds,
        )?;
        validation::validate_endpoint(
            "geocoding.google_endpoint",
            &self.geocoding.google_endpoint,
        )?;
        if self.geocoding.nominatim_enabled {
            validation::validate_endpoint(
                "geocoding.nominatim_endpoint",
                &self.geocoding.nominatim_endpoint,
            )?;
        }
        validation::validate_user_agent("geocoding.user_agent", &self.geocoding.user_agent)?;

        if self.backend.api_url.contains("${") {
            return Err(PosError::ConfigError {
                message: format!(
                    "backend.api_url still contains an unresolved placeholder: {}",
                    self.backend.api_url
                ),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_url(&self) -> &str {
        &self.backend.api_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_seconds)
    }

    fn google_api_key(&self) -> Option<&str> {
        // 沒被替換掉的 ${...} 視同未設定
        self.geocoding
            .google_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.contains("${"))
    }

    fn google_endpoint(&self) -> &str {
        &self.geocoding.google_endpoint
    }

    fn nominatim_endpoint(&self) -> Option<&str> {
        self.geocoding
            .nominatim_enabled
            .then_some(self.geocoding.nominatim_endpoint.as_str())
    }

    fn user_agent(&self) -> &str {
        &self.geocoding.user_agent
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
