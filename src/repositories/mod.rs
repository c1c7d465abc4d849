//! Repository layer for contact storage.
//!
//! Repositories sit between the service layer and the storage backend.
//! Each backend implements [`ContactRepository`]; the service and validator
//! only ever see the trait object.

mod file_contact_repository;
mod memory_contact_repository;
mod table;
mod traits;

pub use file_contact_repository::JsonFileContactRepository;
pub use memory_contact_repository::InMemoryContactRepository;
pub use traits::ContactRepository;

use crate::config::StoreBackend;
use std::sync::Arc;

/// Build the repository selected by configuration. The result still needs `init`.
pub fn build_repository(backend: &StoreBackend, unique_names: bool) -> Arc<dyn ContactRepository> {
    match backend {
        StoreBackend::Memory => Arc::new(InMemoryContactRepository::new(unique_names)),
        StoreBackend::File(path) => Arc::new(JsonFileContactRepository::new(path.clone(), unique_names)),
    }
}
