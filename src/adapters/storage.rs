use crate::domain::model::{Appointment, Patient};
use crate::domain::ports::Store;
use crate::domain::session::Session;
use crate::utils::error::{Result, SchedulerError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_PATIENTS_FILE: &str = "pacientes.json";
pub const DEFAULT_APPOINTMENTS_FILE: &str = "agendamentos.json";

/// Keeps each collection as a JSON array in its own file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    patients_path: PathBuf,
    appointments_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(patients_path: impl Into<PathBuf>, appointments_path: impl Into<PathBuf>) -> Self {
        Self {
            patients_path: patients_path.into(),
            appointments_path: appointments_path.into(),
        }
    }

    /// Default file names inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self::new(
            data_dir.join(DEFAULT_PATIENTS_FILE),
            data_dir.join(DEFAULT_APPOINTMENTS_FILE),
        )
    }

    pub fn patients_path(&self) -> &Path {
        &self.patients_path
    }

    pub fn appointments_path(&self) -> &Path {
        &self.appointments_path
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<Session> {
        let patients: Vec<Patient> = read_collection(&self.patients_path)?;
        let appointments: Vec<Appointment> = read_collection(&self.appointments_path)?;
        tracing::debug!(
            "Loaded {} patients and {} appointments",
            patients.len(),
            appointments.len()
        );
        Ok(Session::new(patients, appointments))
    }

    fn save(&self, session: &Session) -> Result<()> {
        write_collection(&self.patients_path, session.patients())?;
        write_collection(&self.appointments_path, session.appointments())?;
        tracing::debug!(
            "Saved {} patients and {} appointments",
            session.patients().len(),
            session.appointments().len()
        );
        Ok(())
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("{} not found, starting with an empty list", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(SchedulerError::IoError(e)),
    };

    serde_json::from_str(&content).map_err(|source| SchedulerError::CorruptData {
        path: path.to_path_buf(),
        source,
    })
}

fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let data = serde_json::to_vec(items)?;
    fs::write(path, data)?;
    Ok(())
}
