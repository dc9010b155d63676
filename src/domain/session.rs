use crate::domain::model::{Appointment, AppointmentKey, Patient};
use crate::utils::error::BookingError;

/// The two collections of a running scheduler. Insertion order is the
/// selection order shown to the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
}

impl Session {
    pub fn new(patients: Vec<Patient>, appointments: Vec<Appointment>) -> Self {
        Self {
            patients,
            appointments,
        }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn find_patient(&self, phone: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.phone == phone)
    }

    pub fn find_appointment(&self, key: &AppointmentKey) -> Option<usize> {
        self.appointments.iter().position(|a| a.matches(key))
    }

    pub fn patient_at(&self, index: usize) -> Result<&Patient, BookingError> {
        if self.patients.is_empty() {
            return Err(BookingError::NoPatients);
        }
        self.patients
            .get(index)
            .ok_or(BookingError::InvalidSelection {
                index,
                len: self.patients.len(),
            })
    }

    pub fn appointment_at(&self, index: usize) -> Result<&Appointment, BookingError> {
        if self.appointments.is_empty() {
            return Err(BookingError::NoAppointments);
        }
        self.appointments
            .get(index)
            .ok_or(BookingError::InvalidSelection {
                index,
                len: self.appointments.len(),
            })
    }

    pub(crate) fn push_patient(&mut self, patient: Patient) {
        self.patients.push(patient);
    }

    pub(crate) fn push_appointment(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
    }

    pub(crate) fn remove_appointment(&mut self, index: usize) -> Appointment {
        self.appointments.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_at_distinguishes_empty_from_out_of_range() {
        let mut session = Session::default();
        assert_eq!(session.patient_at(0), Err(BookingError::NoPatients));

        session.push_patient(Patient::new("Ana", "111").unwrap());
        assert_eq!(session.patient_at(0).unwrap().name, "Ana");
        assert_eq!(
            session.patient_at(5),
            Err(BookingError::InvalidSelection { index: 5, len: 1 })
        );
    }

    #[test]
    fn test_appointment_at_on_empty_session() {
        let session = Session::default();
        assert_eq!(session.appointment_at(0), Err(BookingError::NoAppointments));
    }
}
