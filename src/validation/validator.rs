//! The contact validator: field rules plus one uniqueness check.

use super::rules::{duplicate_name, FieldRule, RuleContext, ValidationMode, DEFAULT_FIELD_RULES};
use super::violation::{Violation, ViolationKind};
use crate::domain::MobileLocale;
use crate::error::StoreResult;
use crate::models::ProposedContact;
use crate::repositories::ContactRepository;
use tracing::debug;

/// Result of validating a proposed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The write may proceed with these fields.
    Accepted(ProposedContact),
    /// Every violation found, ordered by field (name, email, phone).
    Rejected(Vec<Violation>),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Violations of a rejected outcome; empty when accepted.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Accepted(_) => &[],
            Self::Rejected(violations) => violations,
        }
    }

    /// Kinds of the violations, in report order.
    pub fn kinds(&self) -> Vec<ViolationKind> {
        self.violations().iter().map(|v| v.kind).collect()
    }
}

/// Decides whether a create or update may proceed.
///
/// Stateless apart from its configuration, so one instance can serve
/// concurrent requests. Rules never short-circuit: a submission gets every
/// problem reported at once. The validator never writes to the store.
#[derive(Debug, Clone)]
pub struct ContactValidator {
    locale: MobileLocale,
    rules: Vec<FieldRule>,
}

impl ContactValidator {
    /// Validator with the default rules for `locale`.
    pub fn new(locale: MobileLocale) -> Self {
        Self {
            locale,
            rules: DEFAULT_FIELD_RULES.to_vec(),
        }
    }

    /// Append an extra field rule; it runs after the existing ones.
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn locale(&self) -> MobileLocale {
        self.locale
    }

    /// Validate `proposed` under `mode`.
    ///
    /// Performs at most one store read (`find_by_name`), skipped when the
    /// name is blank. Store failures come back as `Err`; they are never
    /// folded into the violation list.
    pub async fn validate(
        &self,
        proposed: ProposedContact,
        mode: &ValidationMode,
        store: &dyn ContactRepository,
    ) -> StoreResult<ValidationOutcome> {
        let ctx = RuleContext {
            locale: self.locale,
        };

        let mut violations: Vec<Violation> = self
            .rules
            .iter()
            .filter_map(|rule| rule(&proposed, &ctx))
            .collect();

        // A blank name cannot collide usefully, so it costs no store read
        if !proposed.name.trim().is_empty() {
            let existing = store.find_by_name(&proposed.name).await?;
            violations.extend(duplicate_name(&proposed, mode, existing.as_ref()));
        }

        if violations.is_empty() {
            return Ok(ValidationOutcome::Accepted(proposed));
        }

        violations.sort_by_key(|v| v.field);
        debug!(
            name = %proposed.name,
            violations = violations.len(),
            "contact rejected by validation"
        );
        Ok(ValidationOutcome::Rejected(violations))
    }
}

impl Default for ContactValidator {
    fn default() -> Self {
        Self::new(MobileLocale::default())
    }
}
