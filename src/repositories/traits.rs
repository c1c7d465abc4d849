use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::{Contact, ProposedContact};
use async_trait::async_trait;

/// Storage capability for contacts.
///
/// Provides abstraction over contact storage so the service and validator
/// never depend on a concrete backend (in-memory, JSON file, mock).
/// Lookups and deletes key on the current name; when several records share
/// a name the first one in insertion order wins.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Prepare the backend (open files, load records). Called once before use.
    async fn init(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Flush and release the backend. Called once at shutdown.
    async fn shutdown(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Exact, case-sensitive lookup by name.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>>;

    /// All contacts in insertion order.
    async fn list(&self) -> StoreResult<Vec<Contact>>;

    /// Store a new contact and assign its id.
    async fn insert(&self, proposed: ProposedContact) -> StoreResult<Contact>;

    /// Replace the editable fields of the record with `id`.
    async fn update(&self, id: &ContactId, proposed: ProposedContact) -> StoreResult<Contact>;

    /// Remove the first record named `name`. Returns whether one was removed.
    async fn delete_by_name(&self, name: &str) -> StoreResult<bool>;
}
