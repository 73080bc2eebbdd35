//! Appointment request records.
//!
//! Records are appended to a flat file, one line each, with no header and
//! no escaping of embedded commas. Field order is fixed:
//!
//!   contact-only records:   name,phone,notes
//!   typed requests:         name,phone,request_type,notes

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kinds of appointment request the appointment assistant accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Schedule,
    Reschedule,
    Cancel,
}

impl RequestType {
    /// Normalize a caller-supplied request type.
    ///
    /// Surrounding whitespace is trimmed and case is ignored. Anything other
    /// than the three recognized words (including phrases such as
    /// "cancel please") is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "schedule" => Some(Self::Schedule),
            "reschedule" => Some(Self::Reschedule),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Schedule => "schedule",
            Self::Reschedule => "reschedule",
            Self::Cancel => "cancel",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One appointment follow-up request captured during a call.
///
/// `request_type` is `None` for contact-only records taken by the
/// single-agent assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub name: String,
    pub phone: String,
    pub request_type: Option<RequestType>,
    pub notes: Option<String>,
}

impl AppointmentRecord {
    /// A contact-only record (name, phone, notes).
    pub fn contact(
        name: impl Into<String>,
        phone: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            request_type: None,
            notes,
        }
    }

    /// A typed request record (name, phone, request type, notes).
    pub fn request(
        name: impl Into<String>,
        phone: impl Into<String>,
        request_type: RequestType,
        notes: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            request_type: Some(request_type),
            notes,
        }
    }

    /// Render the record as one newline-terminated line.
    ///
    /// Fields are written verbatim; an embedded comma will shift columns for
    /// downstream readers.
    pub fn to_line(&self) -> String {
        let notes = self.notes.as_deref().unwrap_or("");
        match self.request_type {
            Some(kind) => format!("{},{},{},{}\n", self.name, self.phone, kind, notes),
            None => format!("{},{},{}\n", self.name, self.phone, notes),
        }
    }
}
