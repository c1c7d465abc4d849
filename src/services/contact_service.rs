//! Contact service layer.
//!
//! Business logic for listing, viewing, creating, editing and deleting
//! contacts. Writes go through the validator first and reach the store only
//! when accepted.

use crate::domain::ContactId;
use crate::error::{ContactBookError, ContactBookResult, StoreError};
use crate::metrics::Metrics;
use crate::models::{Contact, ProposedContact};
use crate::repositories::ContactRepository;
use crate::validation::{
    ContactValidator, ValidationMode, ValidationOutcome, Violation, ViolationKind,
};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// An edit submission: which record, what it was called, what it should become.
#[derive(Debug, Clone)]
pub struct ContactUpdate {
    pub id: ContactId,
    pub previous_name: String,
    pub proposed: ProposedContact,
}

/// What a form shows: the values, the record being edited and any errors.
///
/// Returned on rejection so the caller can redisplay the form with the
/// submitted values preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,

    #[serde(rename = "oldNama", skip_serializing_if = "Option::is_none")]
    pub previous_name: Option<String>,

    #[serde(flatten)]
    pub values: ProposedContact,

    pub errors: Vec<Violation>,
}

impl FormState {
    /// Empty add form.
    pub fn blank() -> Self {
        Self {
            id: None,
            previous_name: None,
            values: ProposedContact::default(),
            errors: Vec::new(),
        }
    }

    /// Edit form pre-filled from a stored record.
    pub fn for_edit(contact: &Contact) -> Self {
        Self {
            id: Some(contact.id.clone()),
            previous_name: Some(contact.name.clone()),
            values: contact.to_proposed(),
            errors: Vec::new(),
        }
    }

    /// Kinds of the attached errors.
    pub fn error_kinds(&self) -> Vec<ViolationKind> {
        self.errors.iter().map(|v| v.kind).collect()
    }
}

/// Result of a create or update submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record as stored.
    Saved(Contact),
    /// The form to redisplay, with errors.
    Invalid(FormState),
}

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// All contacts in insertion order.
    async fn list_contacts(&self) -> ContactBookResult<Vec<Contact>>;

    /// The contact currently named `name`.
    async fn get_contact(&self, name: &str) -> ContactBookResult<Contact>;

    /// Validate and, if accepted, insert a new contact.
    async fn create_contact(&self, proposed: ProposedContact) -> ContactBookResult<WriteOutcome>;

    /// Validate and, if accepted, apply an edit.
    async fn update_contact(&self, update: ContactUpdate) -> ContactBookResult<WriteOutcome>;

    /// Delete the contact named `name`. Returns whether a record was removed.
    async fn delete_contact(&self, name: &str) -> ContactBookResult<bool>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repo: Arc<dyn ContactRepository>,
    validator: ContactValidator,
    metrics: Metrics,
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(repo: Arc<dyn ContactRepository>, validator: ContactValidator, metrics: Metrics) -> Self {
        Self {
            repo,
            validator,
            metrics,
        }
    }

    fn store_failure(&self, op: &str, err: StoreError) -> ContactBookError {
        self.metrics.record_store_error();
        error!(operation = op, error = %err, "contact store failed");
        ContactBookError::Store(err)
    }

    fn rejected(&self, form: FormState) -> WriteOutcome {
        self.metrics.record_rejection(&form.errors);
        warn!(
            name = %form.values.name,
            errors = ?form.error_kinds(),
            "contact submission rejected"
        );
        WriteOutcome::Invalid(form)
    }

    // A store-level unique constraint fired after validation passed: the
    // name was taken between the check and the write.
    fn conflict_form(
        &self,
        id: Option<ContactId>,
        previous_name: Option<String>,
        values: ProposedContact,
    ) -> WriteOutcome {
        let errors = vec![Violation::new(ViolationKind::DuplicateName, values.name.as_str())];
        self.rejected(FormState {
            id,
            previous_name,
            values,
            errors,
        })
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list_contacts(&self) -> ContactBookResult<Vec<Contact>> {
        self.repo
            .list()
            .await
            .map_err(|e| self.store_failure("list", e))
    }

    async fn get_contact(&self, name: &str) -> ContactBookResult<Contact> {
        self.repo
            .find_by_name(name)
            .await
            .map_err(|e| self.store_failure("find_by_name", e))?
            .ok_or_else(|| ContactBookError::NotFound(format!("contact '{}'", name)))
    }

    async fn create_contact(&self, proposed: ProposedContact) -> ContactBookResult<WriteOutcome> {
        let outcome = self
            .validator
            .validate(proposed.clone(), &ValidationMode::Create, self.repo.as_ref())
            .await
            .map_err(|e| self.store_failure("find_by_name", e))?;

        let accepted = match outcome {
            ValidationOutcome::Accepted(accepted) => accepted,
            ValidationOutcome::Rejected(errors) => {
                return Ok(self.rejected(FormState {
                    id: None,
                    previous_name: None,
                    values: proposed,
                    errors,
                }));
            }
        };

        match self.repo.insert(accepted).await {
            Ok(contact) => {
                self.metrics.record_contact_created();
                info!(id = %contact.id, name = %contact.name, "contact created");
                Ok(WriteOutcome::Saved(contact))
            }
            Err(StoreError::Conflict(_)) => Ok(self.conflict_form(None, None, proposed)),
            Err(e) => Err(self.store_failure("insert", e)),
        }
    }

    async fn update_contact(&self, update: ContactUpdate) -> ContactBookResult<WriteOutcome> {
        let ContactUpdate {
            id,
            previous_name,
            proposed,
        } = update;

        let mode = ValidationMode::Update {
            previous_name: previous_name.clone(),
        };
        let outcome = self
            .validator
            .validate(proposed.clone(), &mode, self.repo.as_ref())
            .await
            .map_err(|e| self.store_failure("find_by_name", e))?;

        let accepted = match outcome {
            ValidationOutcome::Accepted(accepted) => accepted,
            ValidationOutcome::Rejected(errors) => {
                return Ok(self.rejected(FormState {
                    id: Some(id),
                    previous_name: Some(previous_name),
                    values: proposed,
                    errors,
                }));
            }
        };

        match self.repo.update(&id, accepted).await {
            Ok(contact) => {
                self.metrics.record_contact_updated();
                info!(id = %contact.id, name = %contact.name, "contact updated");
                Ok(WriteOutcome::Saved(contact))
            }
            Err(StoreError::NotFound(_)) => {
                Err(ContactBookError::NotFound(format!("contact with id '{}'", id)))
            }
            Err(StoreError::Conflict(_)) => {
                Ok(self.conflict_form(Some(id), Some(previous_name), proposed))
            }
            Err(e) => Err(self.store_failure("update", e)),
        }
    }

    async fn delete_contact(&self, name: &str) -> ContactBookResult<bool> {
        let deleted = self
            .repo
            .delete_by_name(name)
            .await
            .map_err(|e| self.store_failure("delete_by_name", e))?;

        if deleted {
            self.metrics.record_contact_deleted();
            info!(name = %name, "contact deleted");
        } else {
            warn!(name = %name, "delete matched no contact");
        }
        Ok(deleted)
    }
}
