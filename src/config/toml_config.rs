use crate::config::KitConfig;
use crate::utils::error::{KitError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use regex::Regex;
use std::path::Path;

/// Offsets outside +/-14h do not exist in any real zone.
const MAX_UTC_OFFSET_SECONDS: i32 = 14 * 3600;

impl KitConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let config: KitConfig = toml::from_str(&processed_content)?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${HTTP_PROXY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| KitError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for KitConfig {
    fn validate(&self) -> Result<()> {
        validate_range(
            "time.utc_offset_seconds",
            self.time.utc_offset_seconds,
            -MAX_UTC_OFFSET_SECONDS,
            MAX_UTC_OFFSET_SECONDS,
        )?;
        validate_non_empty_string("time.timezone", &self.time.timezone)?;
        validate_positive_number("http.timeout_seconds", self.http.timeout_seconds, 1)?;

        if let Some(proxy) = &self.http.proxy {
            validate_url("http.proxy", proxy, &["http", "https"])?;
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(KitError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Unsupported level. Valid levels: {}", valid_levels.join(", ")),
            });
        }

        Ok(())
    }
}
