//! Contact Book - a small web service for keeping names, emails and phone numbers.
//!
//! Every create and edit passes through a validator that checks the email
//! syntax, the mobile-number format for a configured locale and that the
//! name is not already taken. All problems with a submission are reported
//! together.
//!
//! # Architecture
//!
//! - **domain**: Contact ids, email syntax and mobile-number locales
//! - **models**: The stored contact and the proposed field set
//! - **validation**: Field rules, uniqueness check and the validator
//! - **repositories**: Storage trait with in-memory and JSON file backends
//! - **services**: Business operations tying validation to storage
//! - **server**: axum router and HTTP handlers
//! - **config**: Configuration from environment variables
//! - **metrics**: Request and validation counters
//! - **error**: Error types

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod validation;

pub use config::{Config, StoreBackend};
pub use domain::{is_valid_email, ContactId, MobileLocale, ValidationError};
pub use error::{ConfigError, ContactBookError, StoreError};
pub use metrics::{Metrics, MetricsSummary, RequestTimer};
pub use models::{Contact, ProposedContact};
pub use repositories::{ContactRepository, InMemoryContactRepository, JsonFileContactRepository};
pub use services::{ContactService, ContactServiceImpl, ContactUpdate, FormState, WriteOutcome};
pub use validation::{
    ContactValidator, ValidationMode, ValidationOutcome, Violation, ViolationKind,
};
