pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::JsonFileStore;
pub use app::Menu;
pub use config::AppConfig;
pub use crate::core::booking::{BookingService, Outcome};
pub use crate::core::{Appointment, AppointmentKey, Clock, FixedClock, Patient, Session, Store, SystemClock};
pub use utils::error::{BookingError, Result, SchedulerError};
