#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::storage::{JsonFileStore, DEFAULT_APPOINTMENTS_FILE, DEFAULT_PATIENTS_FILE};
use crate::utils::error::{Result, SchedulerError};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml_config::{TomlConfig, LOG_LEVELS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Effective settings after layering defaults, the TOML file and command line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: String,
    pub patients_file: String,
    pub appointments_file: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            patients_file: DEFAULT_PATIENTS_FILE.to_string(),
            appointments_file: DEFAULT_APPOINTMENTS_FILE.to_string(),
            log_level: "warn".to_string(),
            log_format: LogFormat::Compact,
            verbose: false,
        }
    }
}

impl AppConfig {
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &cli::CliConfig) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = &cli.config {
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            config.apply_toml(&file_config);
        }

        if let Some(dir) = &cli.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(file) = &cli.patients_file {
            config.patients_file = file.clone();
        }
        if let Some(file) = &cli.appointments_file {
            config.appointments_file = file.clone();
        }
        if let Some(format) = cli.log_format {
            config.log_format = format;
        }
        config.verbose = cli.verbose;

        Ok(config)
    }

    pub fn apply_toml(&mut self, file_config: &TomlConfig) {
        if let Some(storage) = &file_config.storage {
            if let Some(dir) = &storage.data_dir {
                self.data_dir = dir.clone();
            }
            if let Some(file) = &storage.patients_file {
                self.patients_file = file.clone();
            }
            if let Some(file) = &storage.appointments_file {
                self.appointments_file = file.clone();
            }
        }

        if let Some(logging) = &file_config.logging {
            if let Some(level) = &logging.level {
                self.log_level = level.clone();
            }
            if let Some(format) = logging.format {
                self.log_format = format;
            }
        }
    }

    pub fn patients_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.patients_file)
    }

    pub fn appointments_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.appointments_file)
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.patients_path(), self.appointments_path())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_path("patients_file", &self.patients_file)?;
        validate_path("appointments_file", &self.appointments_file)?;
        validate_one_of("log_level", &self.log_level, &LOG_LEVELS)?;

        if self.patients_path() == self.appointments_path() {
            return Err(SchedulerError::InvalidConfigValueError {
                field: "appointments_file".to_string(),
                value: self.appointments_file.clone(),
                reason: "must differ from the patients file".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_working_directory() {
        let config = AppConfig::default();
        assert_eq!(config.patients_path(), PathBuf::from("./pacientes.json"));
        assert_eq!(config.appointments_path(), PathBuf::from("./agendamentos.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let file_config = TomlConfig::from_toml_str(
            "[storage]\ndata_dir = \"/srv/clinic\"\n[logging]\nlevel = \"info\"\nformat = \"json\"\n",
        )
        .unwrap();
        let mut config = AppConfig::default();
        config.apply_toml(&file_config);

        assert_eq!(
            config.patients_path(),
            PathBuf::from("/srv/clinic/pacientes.json")
        );
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_absolute_file_ignores_data_dir() {
        let config = AppConfig {
            patients_file: "/elsewhere/p.json".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.patients_path(), PathBuf::from("/elsewhere/p.json"));
    }

    #[test]
    fn test_same_file_for_both_collections_is_rejected() {
        let config = AppConfig {
            appointments_file: DEFAULT_PATIENTS_FILE.to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_toml() {
        use std::io::Write;
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_dir = \"/from/toml\"\npatients_file = \"toml.json\"\n")
            .unwrap();

        let cli = cli::CliConfig {
            config: Some(temp_file.path().to_string_lossy().into_owned()),
            data_dir: Some("/from/cli".to_string()),
            verbose: true,
            ..cli::CliConfig::default()
        };
        let config = AppConfig::from_cli(&cli).unwrap();

        assert_eq!(config.patients_path(), PathBuf::from("/from/cli/toml.json"));
        assert!(config.verbose);
    }
}
