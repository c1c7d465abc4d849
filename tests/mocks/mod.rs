//! Test doubles shared by the integration tests.

mod mock_contact_repository;

pub use mock_contact_repository::MockContactRepository;
