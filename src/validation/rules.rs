//! Independent field rules and the uniqueness decision.
//!
//! Every rule is a plain function of the proposal and a context; none of
//! them reads the store. The store read for uniqueness happens once in the
//! validator, which then hands the result to [`duplicate_name`].

use super::violation::{Violation, ViolationKind};
use crate::domain::{is_valid_email, MobileLocale};
use crate::models::{Contact, ProposedContact};

/// Whether a write creates a record or edits one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    /// `previous_name` is the name the record held before this edit.
    Update { previous_name: String },
}

/// Inputs every field rule may consult.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleContext {
    pub locale: MobileLocale,
}

/// A syntactic field check. Returns a violation or `None`.
pub type FieldRule = fn(&ProposedContact, &RuleContext) -> Option<Violation>;

/// Field rules in the order they run.
pub const DEFAULT_FIELD_RULES: [FieldRule; 3] = [name_present, email_syntax, phone_syntax];

/// Name must contain something other than whitespace.
pub fn name_present(proposed: &ProposedContact, _ctx: &RuleContext) -> Option<Violation> {
    proposed
        .name
        .trim()
        .is_empty()
        .then(|| Violation::new(ViolationKind::EmptyName, proposed.name.as_str()))
}

/// Email must be a syntactically valid address.
pub fn email_syntax(proposed: &ProposedContact, _ctx: &RuleContext) -> Option<Violation> {
    (!is_valid_email(&proposed.email))
        .then(|| Violation::new(ViolationKind::InvalidEmail, proposed.email.as_str()))
}

/// Phone must match the configured locale's mobile pattern.
pub fn phone_syntax(proposed: &ProposedContact, ctx: &RuleContext) -> Option<Violation> {
    (!ctx.locale.matches(&proposed.phone))
        .then(|| Violation::new(ViolationKind::InvalidPhone, proposed.phone.as_str()))
}

/// Decide whether `existing` (the record currently holding
/// `proposed.name`, if any) makes this write a duplicate.
///
/// Creates collide with any match. Updates collide only when the name
/// changes: a record may keep its own name.
pub fn duplicate_name(
    proposed: &ProposedContact,
    mode: &ValidationMode,
    existing: Option<&Contact>,
) -> Option<Violation> {
    if existing.is_none() {
        return None;
    }

    let collides = match mode {
        ValidationMode::Create => true,
        ValidationMode::Update { previous_name } => proposed.name != *previous_name,
    };

    collides.then(|| Violation::new(ViolationKind::DuplicateName, proposed.name.as_str()))
}
