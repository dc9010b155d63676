use std::path::PathBuf;
use thiserror::Error;

/// Validation failures of the booking operations. None of them mutate or persist anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("A patient with phone {phone} is already registered")]
    DuplicatePatient { phone: String },

    #[error("Invalid patient: {reason}")]
    InvalidPatient { reason: String },

    #[error("No patients registered")]
    NoPatients,

    #[error("Invalid selection, choose a number between 1 and {len}")]
    InvalidSelection { index: usize, len: usize },

    #[error("Invalid date and time '{input}', use dd/mm/yyyy HH:MM")]
    InvalidDateTimeFormat { input: String },

    #[error("Cannot book an appointment in the past ({requested})")]
    RetroactiveBooking { requested: String },

    #[error("{patient} already has an appointment at {date_time}")]
    DuplicateAppointment { patient: String, date_time: String },

    #[error("No appointments booked")]
    NoAppointments,

    #[error("No patient registered with phone {phone}")]
    UnknownPatient { phone: String },

    #[error("No appointment for {patient} at {date_time}")]
    UnknownAppointment { patient: String, date_time: String },
}

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Corrupt data file {}: {source}", .path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SchedulerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SchedulerError::Booking(_) => ErrorCategory::Validation,
            SchedulerError::IoError(_)
            | SchedulerError::CorruptData { .. }
            | SchedulerError::SerializationError(_) => ErrorCategory::Storage,
            SchedulerError::ConfigError { .. } | SchedulerError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SchedulerError::Booking(_) => ErrorSeverity::Low,
            SchedulerError::ConfigError { .. } | SchedulerError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Medium
            }
            SchedulerError::IoError(_) | SchedulerError::SerializationError(_) => {
                ErrorSeverity::High
            }
            SchedulerError::CorruptData { .. } => ErrorSeverity::Critical,
        }
    }

    /// Whether the operator can simply try again with different input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SchedulerError::Booking(_))
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SchedulerError::Booking(BookingError::DuplicatePatient { .. }) => {
                "Select the existing patient instead of registering again".to_string()
            }
            SchedulerError::Booking(BookingError::NoPatients) => {
                "Register a patient first".to_string()
            }
            SchedulerError::Booking(BookingError::NoAppointments) => {
                "Book an appointment first".to_string()
            }
            SchedulerError::Booking(BookingError::InvalidDateTimeFormat { .. }) => {
                "Enter the date as dd/mm/yyyy HH:MM, e.g. 31/12/2099 10:00".to_string()
            }
            SchedulerError::Booking(BookingError::RetroactiveBooking { .. }) => {
                "Choose a date and time from now on".to_string()
            }
            SchedulerError::Booking(_) => "Check the input and try again".to_string(),
            SchedulerError::IoError(_) => {
                "Check that the data directory exists and is writable".to_string()
            }
            SchedulerError::CorruptData { path, .. } => format!(
                "Fix or move away {} and start again; it is not a valid JSON list",
                path.display()
            ),
            SchedulerError::SerializationError(_) => {
                "Report this problem; the records could not be encoded".to_string()
            }
            SchedulerError::ConfigError { .. } | SchedulerError::InvalidConfigValueError { .. } => {
                "Check the command line flags and the configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SchedulerError::Booking(e) => e.to_string(),
            SchedulerError::IoError(e) => format!("Could not access the data files: {}", e),
            SchedulerError::CorruptData { path, .. } => {
                format!("The data file {} is unreadable", path.display())
            }
            SchedulerError::SerializationError(_) => "Could not save the records".to_string(),
            SchedulerError::ConfigError { message } => format!("Configuration problem: {}", message),
            SchedulerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in {}: {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
