mod schema;

pub use schema::{Config, OutputFormat};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Get the config directory path (~/.config/receipt-points/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("receipt-points"))
}

/// Get the default config file path (~/.config/receipt-points/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    if config_content.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref level) = config.log_level {
        if tracing::Level::from_str(level).is_err() {
            errors.push(format!(
                "log_level: invalid '{}' - expected error, warn, info, debug or trace",
                level
            ));
        }
    }

    if let Some(ref report) = config.report {
        if report.is_dir() {
            errors.push(format!("report: '{}' is a directory", report.display()));
        } else if let Some(parent) = report.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                errors.push(format!(
                    "report: directory '{}' does not exist",
                    parent.display()
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.yaml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "format: tsv\nbreakdown: true\n");
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.format(), OutputFormat::Tsv);
        assert!(config.breakdown());
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let dir = TempDir::new().unwrap();
        let result = load_config(Some(dir.path().join("nope.yaml")));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }

    #[test]
    fn test_load_config_empty_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "\n");
        assert_eq!(load_config(Some(path)).unwrap(), Config::default());
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "format: [table\n");
        let err = format!("{:#}", load_config(Some(path)).unwrap_err());
        assert!(err.contains("Failed to parse config"));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_log_level() {
        let config = Config {
            log_level: Some("DEBUG".to_string()),
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());

        let config = Config {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("log_level"));
    }

    #[test]
    fn test_validate_report_path() {
        let dir = TempDir::new().unwrap();

        let config = Config {
            report: Some(dir.path().join("report.json")),
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());

        let config = Config {
            report: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("is a directory"));

        let config = Config {
            report: Some(dir.path().join("missing").join("report.json")),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("does not exist"));
    }

    #[test]
    fn test_validate_reports_all_errors() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            log_level: Some("loud".to_string()),
            report: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(validate_config(&config).unwrap_err().len(), 2);
    }
}
