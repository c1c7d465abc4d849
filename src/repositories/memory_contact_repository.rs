use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::{Contact, ProposedContact};
use crate::repositories::table::ContactTable;
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Contact repository that keeps everything in process memory.
///
/// Records are lost when the process exits. Useful for tests and for
/// running the service without any storage configured.
pub struct InMemoryContactRepository {
    table: RwLock<ContactTable>,
}

impl InMemoryContactRepository {
    /// Create an empty repository.
    ///
    /// With `unique_names` set, inserts and updates that would duplicate a
    /// name fail with `StoreError::Conflict`.
    pub fn new(unique_names: bool) -> Self {
        Self {
            table: RwLock::new(ContactTable::new(unique_names)),
        }
    }

    /// Create a repository pre-loaded with `contacts`.
    pub fn with_contacts(contacts: Vec<Contact>, unique_names: bool) -> Self {
        Self {
            table: RwLock::new(ContactTable::with_rows(contacts, unique_names)),
        }
    }
}

impl Default for InMemoryContactRepository {
    fn default() -> Self {
        Self::new(false)
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>> {
        debug!(name = %name, "memory store: find_by_name");
        Ok(self.table.read().await.find_by_name(name).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        Ok(self.table.read().await.rows().to_vec())
    }

    async fn insert(&self, proposed: ProposedContact) -> StoreResult<Contact> {
        let contact = self.table.write().await.insert(proposed)?;
        debug!(id = %contact.id, "memory store: inserted contact");
        Ok(contact)
    }

    async fn update(&self, id: &ContactId, proposed: ProposedContact) -> StoreResult<Contact> {
        debug!(id = %id, "memory store: update");
        self.table.write().await.update(id, proposed)
    }

    async fn delete_by_name(&self, name: &str) -> StoreResult<bool> {
        debug!(name = %name, "memory store: delete_by_name");
        Ok(self.table.write().await.delete_by_name(name))
    }
}
