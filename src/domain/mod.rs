//! Domain value objects and types.
//!
//! The store-assigned contact id, the email syntax check and the
//! mobile-number locales used by the phone rule.

pub mod contact_id;
pub mod email;
pub mod errors;
pub mod phone;

pub use contact_id::ContactId;
pub use email::is_valid_email;
pub use errors::ValidationError;
pub use phone::MobileLocale;
