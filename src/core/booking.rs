use crate::core::{Clock, Store, SystemClock};
use crate::domain::model::{format_date_time, parse_date_time, Appointment, AppointmentKey, Patient};
use crate::domain::session::Session;
use crate::utils::error::{BookingError, Result};
use std::fmt;

/// What a successful operation did, for the caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    PatientRegistered(Patient),
    AppointmentBooked(Appointment),
    AppointmentCancelled(Appointment),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PatientRegistered(p) => write!(f, "Patient {} registered", p.name),
            Outcome::AppointmentBooked(a) => write!(f, "Appointment booked: {}", a),
            Outcome::AppointmentCancelled(a) => write!(f, "Appointment cancelled: {}", a),
        }
    }
}

/// Validates and applies the mutating operations. Every check runs before
/// the session is touched, and every successful change is saved right away.
pub struct BookingService<S: Store, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: Store> BookingService<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: Store, C: Clock> BookingService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_session(&self) -> Result<Session> {
        self.store.load()
    }

    pub fn register_patient(&self, session: &mut Session, name: &str, phone: &str) -> Result<Outcome> {
        let patient = Patient::new(name, phone)?;

        if session.find_patient(&patient.phone).is_some() {
            tracing::warn!("Rejected registration, phone {} already in use", patient.phone);
            return Err(BookingError::DuplicatePatient {
                phone: patient.phone,
            }
            .into());
        }

        let mut candidate = session.clone();
        candidate.push_patient(patient.clone());
        self.commit(session, candidate)?;
        tracing::info!("Registered patient {}", patient.name);
        Ok(Outcome::PatientRegistered(patient))
    }

    /// Index-based entry point for callers that showed the patient list.
    pub fn book_appointment(
        &self,
        session: &mut Session,
        patient_index: usize,
        raw_date_time: &str,
    ) -> Result<Outcome> {
        let phone = session.patient_at(patient_index)?.phone.clone();
        self.book_appointment_for(session, &phone, raw_date_time)
    }

    pub fn book_appointment_for(
        &self,
        session: &mut Session,
        phone: &str,
        raw_date_time: &str,
    ) -> Result<Outcome> {
        if session.patients().is_empty() {
            return Err(BookingError::NoPatients.into());
        }

        let patient_name = session
            .find_patient(phone)
            .map(|p| p.name.clone())
            .ok_or_else(|| BookingError::UnknownPatient {
                phone: phone.to_string(),
            })?;

        let date_time = parse_date_time(raw_date_time)?;

        let now = self.clock.now();
        if date_time < now {
            tracing::warn!("Rejected retroactive booking for {} (now {})", date_time, now);
            return Err(BookingError::RetroactiveBooking {
                requested: format_date_time(&date_time),
            }
            .into());
        }

        let appointment = Appointment::new(patient_name, date_time);
        if session.find_appointment(&appointment.key()).is_some() {
            tracing::warn!("Rejected duplicate appointment {}", appointment);
            return Err(BookingError::DuplicateAppointment {
                patient: appointment.patient_name,
                date_time: format_date_time(&date_time),
            }
            .into());
        }

        let mut candidate = session.clone();
        candidate.push_appointment(appointment.clone());
        self.commit(session, candidate)?;
        tracing::info!("Booked appointment {}", appointment);
        Ok(Outcome::AppointmentBooked(appointment))
    }

    /// Index-based entry point for callers that showed the appointment list.
    pub fn cancel_appointment(&self, session: &mut Session, appointment_index: usize) -> Result<Outcome> {
        let key = session.appointment_at(appointment_index)?.key();
        self.cancel_appointment_by_key(session, &key)
    }

    pub fn cancel_appointment_by_key(&self, session: &mut Session, key: &AppointmentKey) -> Result<Outcome> {
        if session.appointments().is_empty() {
            return Err(BookingError::NoAppointments.into());
        }

        let index = session
            .find_appointment(key)
            .ok_or_else(|| BookingError::UnknownAppointment {
                patient: key.patient_name.clone(),
                date_time: format_date_time(&key.date_time),
            })?;

        let mut candidate = session.clone();
        let removed = candidate.remove_appointment(index);
        self.commit(session, candidate)?;
        tracing::info!("Cancelled appointment {}", removed);
        Ok(Outcome::AppointmentCancelled(removed))
    }

    /// The session only takes the new state once it is on disk.
    fn commit(&self, session: &mut Session, candidate: Session) -> Result<()> {
        self.store.save(&candidate)?;
        *session = candidate;
        Ok(())
    }
}
