use serde::Serialize;

/// Origin of an attendance action: a QR self-scan from the mobile app or a
/// manual action performed by an admin.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Provenance {
    Qr,
    Manual,
}

impl Provenance {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Provenance::Qr => "qr",
            Provenance::Manual => "manual",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "qr" => Some(Provenance::Qr),
            "manual" => Some(Provenance::Manual),
            _ => None,
        }
    }

    pub fn as_display(&self) -> &'static str {
        match self {
            Provenance::Qr => "QR",
            Provenance::Manual => "Manual",
        }
    }
}
