//! Ordered contact table shared by the in-process backends.

use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, ProposedContact};

/// Contacts kept in insertion order.
///
/// When `unique_names` is set the table refuses writes that would leave two
/// records with the same name; otherwise duplicates are stored as given.
#[derive(Debug, Clone, Default)]
pub(crate) struct ContactTable {
    rows: Vec<Contact>,
    unique_names: bool,
}

impl ContactTable {
    pub(crate) fn new(unique_names: bool) -> Self {
        Self {
            rows: Vec::new(),
            unique_names,
        }
    }

    pub(crate) fn with_rows(rows: Vec<Contact>, unique_names: bool) -> Self {
        Self { rows, unique_names }
    }

    pub(crate) fn rows(&self) -> &[Contact] {
        &self.rows
    }

    pub(crate) fn find_by_name(&self, name: &str) -> Option<&Contact> {
        self.rows.iter().find(|c| c.name == name)
    }

    pub(crate) fn insert(&mut self, proposed: ProposedContact) -> StoreResult<Contact> {
        if self.unique_names && self.find_by_name(&proposed.name).is_some() {
            return Err(StoreError::Conflict(proposed.name));
        }

        let contact = Contact::from_proposed(ContactId::generate(), proposed);
        self.rows.push(contact.clone());
        Ok(contact)
    }

    pub(crate) fn update(&mut self, id: &ContactId, proposed: ProposedContact) -> StoreResult<Contact> {
        if self.unique_names
            && self
                .rows
                .iter()
                .any(|c| c.name == proposed.name && &c.id != id)
        {
            return Err(StoreError::Conflict(proposed.name));
        }

        let row = self
            .rows
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        row.apply(proposed);
        Ok(row.clone())
    }

    pub(crate) fn delete_by_name(&mut self, name: &str) -> bool {
        match self.rows.iter().position(|c| c.name == name) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }
}
