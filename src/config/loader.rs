use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::info;

use super::ClientConfig;

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Loads the client configuration from `path`, writing the default
/// configuration there first if the file does not exist.
///
/// `CHECKMK_*` environment variables override values from the file.
pub fn load_configuration(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        write_config_to(path, get_default_config()).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    let cfg = Config::builder()
        .add_source(config::File::with_name(filename).format(config::FileFormat::Toml))
        .add_source(Environment::with_prefix("CHECKMK").prefix_separator("_").separator("__"))
        .build()
        .context("Could not build config")?;

    cfg.try_deserialize().context("Invalid client configuration")
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn test_missing_file_is_created_from_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_configuration(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    #[serial]
    fn test_file_values_are_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_to(
            &path,
            "host = \"monitor.example.com\"\nsite = \"prod\"\nport = 8443\nbearer_token = \"tok\"\n",
        )
        .unwrap();

        let config = load_configuration(&path).unwrap();

        assert_eq!(config.host, "monitor.example.com");
        assert_eq!(config.site, "prod");
        assert_eq!(config.port, 8443);
        assert_eq!(config.bearer_token.as_deref(), Some("tok"));
        assert_eq!(config.scheme, "https");
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_to(&path, "site = \"prod\"\n").unwrap();

        unsafe { std::env::set_var("CHECKMK_SITE", "staging") };
        let result = load_configuration(&path);
        unsafe { std::env::remove_var("CHECKMK_SITE") };

        assert_eq!(result.unwrap().site, "staging");
    }
}
