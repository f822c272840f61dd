//! Config commands

use crate::config::{Config, KEYS};
use crate::ConfigCommands;
use std::path::Path;

pub fn handle(action: ConfigCommands, profile: Option<&str>) -> anyhow::Result<()> {
    handle_at(action, &Config::config_path(profile)?)
}

/// Run a config command against the file at `path`. An unreadable file is
/// reported, never replaced.
fn handle_at(action: ConfigCommands, path: &Path) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Init => {
            Config::default().save_to(path)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_from(path)?;
            config.set(&key, value)?;
            config.save_to(path)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load_from(path)?;
            let value = config.get_display(&key)?;
            println!("{}: {}", key, value.unwrap_or_else(|| "(not set)".into()));
        }
        ConfigCommands::List => {
            let config = Config::load_from(path)?;
            for key in KEYS {
                let value = config.get_display(key)?;
                println!("{}: {}", key, value.unwrap_or_else(|| "(not set)".into()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("netrm-config-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join("config.toml")
    }

    #[test]
    fn test_corrupt_file_left_untouched() {
        let path = scratch_file("corrupt");
        let corrupt = "subscription_id = \"sub-1\"\naccess_token = [unterminated\n";
        fs::write(&path, corrupt).unwrap();

        let set = ConfigCommands::Set { key: "api_url".into(), value: "https://example.test".into() };
        assert!(handle_at(set, &path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), corrupt);

        assert!(handle_at(ConfigCommands::Get { key: "api_url".into() }, &path).is_err());
        assert!(handle_at(ConfigCommands::List, &path).is_err());

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_set_keeps_existing_keys() {
        let path = scratch_file("set");
        fs::write(&path, "subscription_id = \"sub-1\"\n").unwrap();

        let set = ConfigCommands::Set { key: "default_format".into(), value: "json".into() };
        handle_at(set, &path).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.subscription_id.as_deref(), Some("sub-1"));
        assert_eq!(config.default_format.as_deref(), Some("json"));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_missing_file_reads_as_defaults() {
        let path = scratch_file("missing");
        fs::remove_file(&path).ok();
        assert!(handle_at(ConfigCommands::List, &path).is_ok());
        assert!(!path.exists());

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
