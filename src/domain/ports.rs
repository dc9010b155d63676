use crate::domain::session::Session;
use crate::utils::error::Result;
use chrono::NaiveDateTime;

/// Durable home of the patient and appointment collections.
pub trait Store {
    /// Missing data is an empty collection, never an error.
    fn load(&self) -> Result<Session>;
    /// Overwrites both collections. The pair is not written atomically.
    fn save(&self, session: &Session) -> Result<()>;
}

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Always reports the same moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
