use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Backend origin used until the config file says otherwise.
pub const DEFAULT_BASE_URL: &str = "http://diaaapi.runasp.net/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    //* API origin every endpoint path is appended to */
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            },
        }
    }
}

impl Config {
    /// Get the app config directory, creating it on first use
    pub fn app_dir() -> Result<PathBuf> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;

        let config_dir = home_dir.join(".config");
        let app_dir = config_dir.join("summary-admin-tui");

        // Create directory if it doesn't exist
        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.toml"))
    }

    /// Load config from file. The first run writes the default file so the
    /// base URL is easy to find and edit.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;

        if let Err(reason) = validate_url(&config.server.base_url) {
            return Err(color_eyre::eyre::eyre!(
                "invalid base_url in {}: {}",
                config_path.display(),
                reason
            ));
        }

        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;
        Ok(())
    }
}

/// Simple URL validation
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    if url::Url::parse(url).is_err() {
        return Err("Invalid URL format".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("http://localhost:5000/api").is_ok());
        assert!(validate_url("https://diaaapi.runasp.net/api").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_bad_input() {
        assert!(validate_url("").is_err());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("http://exa mple.com").is_err());
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.server.base_url, DEFAULT_BASE_URL);
    }
}
