pub mod booking;

pub use crate::domain::model::{Appointment, AppointmentKey, Patient};
pub use crate::domain::ports::{Clock, FixedClock, Store, SystemClock};
pub use crate::domain::session::Session;
pub use crate::utils::error::Result;
