//! Field-tagged validation failures.

use serde::Serialize;
use std::fmt;

/// Form field a violation is attached to. Serializes as the form's field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    #[serde(rename = "nama")]
    Name,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "nohp")]
    Phone,
}

impl Field {
    /// Form field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "nama",
            Self::Email => "email",
            Self::Phone => "nohp",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ViolationKind {
    /// Name is empty or whitespace only
    EmptyName,
    /// Email fails syntax check
    InvalidEmail,
    /// Phone fails the locale's mobile pattern
    InvalidPhone,
    /// Name collides with an existing, different record
    DuplicateName,
}

impl ViolationKind {
    /// Field this kind of violation is reported against.
    pub fn field(&self) -> Field {
        match self {
            Self::EmptyName | Self::DuplicateName => Field::Name,
            Self::InvalidEmail => Field::Email,
            Self::InvalidPhone => Field::Phone,
        }
    }

    /// Message shown next to the field.
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "Contact name is required!",
            Self::InvalidEmail => "Invalid email!",
            Self::InvalidPhone => "Invalid phone number!",
            Self::DuplicateName => "Contact name is already taken!",
        }
    }
}

/// A single validation failure, tagged with its field and the submitted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    #[serde(rename = "path")]
    pub field: Field,
    #[serde(rename = "msg")]
    pub message: String,
    pub value: String,
}

impl Violation {
    /// Build a violation with the kind's default field and message.
    pub fn new(kind: ViolationKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            field: kind.field(),
            message: kind.message().to_string(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
