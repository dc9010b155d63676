use crate::core::booking::{BookingService, Outcome};
use crate::core::{Clock, Session, Store};
use crate::utils::error::{BookingError, Result};
use std::io::{BufRead, Write};

/// Interactive text front end. Lists are numbered from 1 on screen and
/// converted to positions before reaching the booking service.
pub struct Menu<'a, S: Store, C: Clock, R: BufRead, W: Write> {
    service: &'a BookingService<S, C>,
    input: R,
    output: W,
}

impl<'a, S: Store, C: Clock, R: BufRead, W: Write> Menu<'a, S, C, R, W> {
    pub fn new(service: &'a BookingService<S, C>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs until the operator picks "Exit" or the input ends.
    pub fn run(&mut self, session: &mut Session) -> Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Menu:")?;
            writeln!(self.output, "1. Register patient")?;
            writeln!(self.output, "2. Book appointment")?;
            writeln!(self.output, "3. Cancel appointment")?;
            writeln!(self.output, "4. Exit")?;

            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };

            match choice.trim() {
                "1" => self.register_patient(session)?,
                "2" => self.book_appointment(session)?,
                "3" => self.cancel_appointment(session)?,
                "4" => break,
                other => {
                    tracing::debug!("Unknown menu option {:?}", other);
                    writeln!(self.output, "Invalid option, try again.")?;
                }
            }
        }

        tracing::debug!("Leaving menu");
        Ok(())
    }

    fn register_patient(&mut self, session: &mut Session) -> Result<()> {
        let Some(name) = self.prompt("Patient name: ")? else {
            return Ok(());
        };
        let Some(phone) = self.prompt("Patient phone: ")? else {
            return Ok(());
        };

        let result = self.service.register_patient(session, &name, &phone);
        self.report(result)
    }

    fn book_appointment(&mut self, session: &mut Session) -> Result<()> {
        if session.patients().is_empty() {
            return self.report(Err(BookingError::NoPatients.into()));
        }

        for (i, patient) in session.patients().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, patient.name)?;
        }

        let Some(raw) = self.prompt("Select the patient number: ")? else {
            return Ok(());
        };
        let index = match selection(&raw, session.patients().len()) {
            Ok(index) => index,
            Err(e) => return self.report(Err(e.into())),
        };
        if let Err(e) = session.patient_at(index) {
            return self.report(Err(e.into()));
        }

        let Some(date_time) = self.prompt("Appointment date and time (dd/mm/yyyy HH:MM): ")? else {
            return Ok(());
        };

        let result = self.service.book_appointment(session, index, &date_time);
        self.report(result)
    }

    fn cancel_appointment(&mut self, session: &mut Session) -> Result<()> {
        if session.appointments().is_empty() {
            return self.report(Err(BookingError::NoAppointments.into()));
        }

        for (i, appointment) in session.appointments().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, appointment)?;
        }

        let Some(raw) = self.prompt("Select the appointment to cancel: ")? else {
            return Ok(());
        };
        let index = match selection(&raw, session.appointments().len()) {
            Ok(index) => index,
            Err(e) => return self.report(Err(e.into())),
        };

        let result = self.service.cancel_appointment(session, index);
        self.report(result)
    }

    /// `None` once the input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Storage failures are shown and the loop goes on; only output errors propagate.
    fn report(&mut self, result: Result<Outcome>) -> Result<()> {
        match result {
            Ok(outcome) => writeln!(self.output, "✅ {}", outcome)?,
            Err(e) if e.is_retryable() => writeln!(self.output, "❌ {}", e)?,
            Err(e) => {
                tracing::error!(
                    "Operation failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                writeln!(self.output, "❌ {}", e.user_friendly_message())?;
                writeln!(self.output, "💡 {}", e.recovery_suggestion())?;
            }
        }
        Ok(())
    }
}

/// Converts a 1-based choice typed by the operator into a list position.
pub fn selection(raw: &str, len: usize) -> std::result::Result<usize, BookingError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        // any out-of-range position; only `len` is shown to the operator
        .ok_or(BookingError::InvalidSelection { index: len, len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_one_based() {
        assert_eq!(selection("1", 3), Ok(0));
        assert_eq!(selection(" 3 ", 3), Ok(2));
        // range checks belong to the booking service
        assert_eq!(selection("7", 3), Ok(6));
    }

    #[test]
    fn test_selection_rejects_zero_and_text() {
        for raw in ["0", "", "abc", "-1", "1.5"] {
            assert_eq!(
                selection(raw, 2),
                Err(BookingError::InvalidSelection { index: 2, len: 2 }),
                "{raw}"
            );
        }
    }
}
