//! CLI Configuration

use netrm_common::{NetrmError, NetrmResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://management.azure.com";
pub const DEFAULT_API_VERSION: &str = "2023-09-01";

/// Keys accepted by `config set` / `config get`
pub const KEYS: [&str; 5] = ["api_url", "subscription_id", "access_token", "api_version", "default_format"];

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub subscription_id: Option<String>,
    pub access_token: Option<String>,
    pub api_version: Option<String>,
    pub default_format: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> NetrmResult<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    /// Missing file yields defaults; an unreadable one is an error
    pub fn load_from(path: &Path) -> NetrmResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Self::parse(&content)
                .map_err(|e| NetrmError::Config(format!("{}: {}", path.display(), e)))
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save(&self, profile: Option<&str>) -> NetrmResult<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> NetrmResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn parse(content: &str) -> NetrmResult<Self> {
        toml::from_str(content).map_err(|e| NetrmError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> NetrmResult<String> {
        toml::to_string_pretty(self).map_err(|e| NetrmError::Config(e.to_string()))
    }

    pub fn config_path(profile: Option<&str>) -> NetrmResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| NetrmError::Config("Cannot find home directory".into()))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".netrm").join(filename))
    }

    pub fn set(&mut self, key: &str, value: String) -> NetrmResult<()> {
        let slot = self.slot_mut(key)?;
        *slot = Some(value);
        Ok(())
    }

    /// Value for display; the access token is masked
    pub fn get_display(&self, key: &str) -> NetrmResult<Option<String>> {
        let value = match key {
            "api_url" => self.api_url.clone(),
            "subscription_id" => self.subscription_id.clone(),
            "access_token" => self.access_token.as_deref().map(mask),
            "api_version" => self.api_version.clone(),
            "default_format" => self.default_format.clone(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    fn slot_mut(&mut self, key: &str) -> NetrmResult<&mut Option<String>> {
        match key {
            "api_url" => Ok(&mut self.api_url),
            "subscription_id" => Ok(&mut self.subscription_id),
            "access_token" => Ok(&mut self.access_token),
            "api_version" => Ok(&mut self.api_version),
            "default_format" => Ok(&mut self.default_format),
            _ => Err(unknown_key(key)),
        }
    }
}

fn unknown_key(key: &str) -> NetrmError {
    NetrmError::Config(format!("Unknown config key: {} (expected one of {})", key, KEYS.join(", ")))
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(8).collect();
    format!("{}****", visible)
}
