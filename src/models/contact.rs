//! Contact model, the only entity in the contact book.
//!
//! Wire names match the form fields: `_id`, `nama` (name),
//! `email` and `nohp` (phone).

use crate::domain::ContactId;
use serde::{Deserialize, Serialize};

/// The field set submitted by an add or edit form, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ProposedContact {
    /// Display name, unique across the book
    #[serde(rename = "nama")]
    pub name: String,

    /// Email address
    pub email: String,

    /// Mobile phone number
    #[serde(rename = "nohp")]
    pub phone: String,
}

impl ProposedContact {
    /// Create a proposal from its three fields.
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// A stored contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Store-assigned identifier; never changes after creation
    #[serde(rename = "_id")]
    pub id: ContactId,

    /// Display name
    #[serde(rename = "nama")]
    pub name: String,

    /// Email address
    pub email: String,

    /// Mobile phone number
    #[serde(rename = "nohp")]
    pub phone: String,
}

impl Contact {
    /// Build a stored record from an accepted proposal.
    pub fn from_proposed(id: ContactId, proposed: ProposedContact) -> Self {
        Self {
            id,
            name: proposed.name,
            email: proposed.email,
            phone: proposed.phone,
        }
    }

    /// The editable fields of this record.
    pub fn to_proposed(&self) -> ProposedContact {
        ProposedContact {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Overwrite the editable fields, keeping the id.
    pub fn apply(&mut self, proposed: ProposedContact) {
        self.name = proposed.name;
        self.email = proposed.email;
        self.phone = proposed.phone;
    }
}
