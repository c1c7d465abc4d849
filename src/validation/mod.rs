//! Contact record validation and name uniqueness.
//!
//! A proposed write passes through an ordered list of independent field
//! rules and a single uniqueness check against the store. All violations
//! are collected and returned together so a form can show every problem
//! at once.
//!
//! The uniqueness check and the caller's subsequent write are two separate
//! store operations. Two concurrent creates with the same name can both be
//! accepted; backends that must guarantee uniqueness enforce it themselves
//! (see `Config::enforce_unique_names`).

pub mod rules;
pub mod validator;
pub mod violation;

pub use rules::{FieldRule, RuleContext, ValidationMode};
pub use validator::{ContactValidator, ValidationOutcome};
pub use violation::{Field, Violation, ViolationKind};
