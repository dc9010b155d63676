use crate::utils::error::BookingError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// On-disk and on-screen layout of an appointment time.
pub const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Parses operator input in `dd/mm/yyyy HH:MM` form. Impossible calendar
/// dates such as 31/02 are rejected along with malformed text.
pub fn parse_date_time(raw: &str) -> Result<NaiveDateTime, BookingError> {
    let invalid = || BookingError::InvalidDateTimeFormat {
        input: raw.to_string(),
    };

    let text = raw.trim();
    if !has_date_time_shape(text) {
        return Err(invalid());
    }
    NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT).map_err(|_| invalid())
}

/// Digit groups separated by exactly `/`, `/`, one space and `:`. chrono
/// alone would also take signs and runs of whitespace.
fn has_date_time_shape(text: &str) -> bool {
    let Some((date, time)) = text.split_once(' ') else {
        return false;
    };
    let date_parts: Vec<&str> = date.split('/').collect();
    let time_parts: Vec<&str> = time.split(':').collect();

    date_parts.len() == 3
        && time_parts.len() == 2
        && date_parts
            .iter()
            .chain(time_parts.iter())
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

pub fn format_date_time(date_time: &NaiveDateTime) -> String {
    date_time.format(DATE_TIME_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

impl Patient {
    pub fn new(name: &str, phone: &str) -> Result<Self, BookingError> {
        let name = name.trim();
        let phone = phone.trim();
        if name.is_empty() {
            return Err(BookingError::InvalidPatient {
                reason: "name cannot be empty".to_string(),
            });
        }
        if phone.is_empty() {
            return Err(BookingError::InvalidPatient {
                reason: "phone cannot be empty".to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "paciente")]
    pub patient_name: String,
    #[serde(rename = "data_hora", with = "date_time_text")]
    pub date_time: NaiveDateTime,
}

impl Appointment {
    pub fn new(patient_name: impl Into<String>, date_time: NaiveDateTime) -> Self {
        Self {
            patient_name: patient_name.into(),
            date_time,
        }
    }

    pub fn key(&self) -> AppointmentKey {
        AppointmentKey {
            patient_name: self.patient_name.clone(),
            date_time: self.date_time,
        }
    }

    pub fn matches(&self, key: &AppointmentKey) -> bool {
        self.patient_name == key.patient_name && self.date_time == key.date_time
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.patient_name,
            format_date_time(&self.date_time)
        )
    }
}

/// Identifies an appointment independently of its position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppointmentKey {
    pub patient_name: String,
    pub date_time: NaiveDateTime,
}

mod date_time_text {
    use super::{format_date_time, DATE_TIME_FORMAT};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date_time(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(text.trim(), DATE_TIME_FORMAT)
            .map_err(|e| serde::de::Error::custom(format!("invalid data_hora '{}': {}", text, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, month: u32, year: i32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_date_time() {
        assert_eq!(parse_date_time("31/12/2099 10:00").unwrap(), at(31, 12, 2099, 10, 0));
        assert_eq!(parse_date_time(" 01/03/2030 08:05 ").unwrap(), at(1, 3, 2030, 8, 5));
        assert_eq!(parse_date_time("1/3/2030 8:05").unwrap(), at(1, 3, 2030, 8, 5));
    }

    #[test]
    fn test_parse_date_time_rejects_bad_input() {
        for raw in [
            "31/02/2025 10:00",
            "2099-12-31 10:00",
            "31/12/2099",
            "31/12/2099 24:00",
            "31/12/2099 10:60",
            "amanhã às 10",
            "",
            "31/12/+2099 10:00",
            "31/12/2099\t10:00",
            "31/12/2099    10:00",
            "31/12/2099 10:00:00",
            "31//2099 10:00",
        ] {
            assert_eq!(
                parse_date_time(raw),
                Err(BookingError::InvalidDateTimeFormat {
                    input: raw.to_string()
                }),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_patient_new_trims_and_rejects_blank_fields() {
        let patient = Patient::new("  Ana ", " 111 ").unwrap();
        assert_eq!(patient.name, "Ana");
        assert_eq!(patient.phone, "111");

        assert!(matches!(
            Patient::new("", "111"),
            Err(BookingError::InvalidPatient { .. })
        ));
        assert!(matches!(
            Patient::new("Ana", "  "),
            Err(BookingError::InvalidPatient { .. })
        ));
    }

    #[test]
    fn test_records_use_persisted_field_names() {
        let patient = Patient::new("Ana", "111").unwrap();
        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Ana", "telefone": "111"}));

        let appointment = Appointment::new("Ana", at(5, 1, 2099, 9, 30));
        let json = serde_json::to_value(&appointment).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"paciente": "Ana", "data_hora": "05/01/2099 09:30"})
        );
    }

    #[test]
    fn test_legacy_patient_key_is_accepted() {
        let patient: Patient =
            serde_json::from_str(r#"{"nome": "Bruno", "telefone": "222"}"#).unwrap();
        assert_eq!(patient.name, "Bruno");
        assert_eq!(patient.phone, "222");
    }

    #[test]
    fn test_appointment_display_and_key() {
        let appointment = Appointment::new("Ana", at(31, 12, 2099, 10, 0));
        assert_eq!(appointment.to_string(), "Ana - 31/12/2099 10:00");
        assert!(appointment.matches(&appointment.key()));
    }
}
