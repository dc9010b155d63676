use crate::config::LogFormat;
use crate::utils::error::{Result, SchedulerError};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: Option<StorageConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
    pub patients_file: Option<String>,
    pub appointments_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| SchedulerError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SchedulerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SchedulerError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(storage) = &self.storage {
            if let Some(dir) = &storage.data_dir {
                validate_path("storage.data_dir", dir)?;
            }
            if let Some(file) = &storage.patients_file {
                validate_path("storage.patients_file", file)?;
            }
            if let Some(file) = &storage.appointments_file {
                validate_path("storage.appointments_file", file)?;
            }
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
data_dir = "/var/lib/clinic"
patients_file = "patients.json"
appointments_file = "appointments.json"

[logging]
level = "debug"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let storage = config.storage.as_ref().unwrap();
        assert_eq!(storage.data_dir.as_deref(), Some("/var/lib/clinic"));
        assert_eq!(storage.patients_file.as_deref(), Some("patients.json"));
        let logging = config.logging.as_ref().unwrap();
        assert_eq!(logging.level.as_deref(), Some("debug"));
        assert_eq!(logging.format, Some(LogFormat::Json));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.storage.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CLINIC_TEST_DATA_DIR", "/tmp/clinic-data");

        let toml_content = r#"
[storage]
data_dir = "${CLINIC_TEST_DATA_DIR}"
patients_file = "${CLINIC_TEST_UNSET_VARIABLE}.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let storage = config.storage.unwrap();
        assert_eq!(storage.data_dir.as_deref(), Some("/tmp/clinic-data"));
        assert_eq!(
            storage.patients_file.as_deref(),
            Some("${CLINIC_TEST_UNSET_VARIABLE}.json")
        );

        std::env::remove_var("CLINIC_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"chatty\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[storage]\npatients_file = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[storage\n").unwrap_err();
        assert!(matches!(err, SchedulerError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_dir = \"./clinic\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.storage.unwrap().data_dir.as_deref(),
            Some("./clinic")
        );
    }
}
