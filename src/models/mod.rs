//! Data models for the contact book.
//!
//! `Contact` is the stored record; `ProposedContact` is the unvalidated
//! field set a create or edit form submits.

pub mod contact;

pub use contact::{Contact, ProposedContact};
