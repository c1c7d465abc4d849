use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, ProposedContact};
use crate::repositories::table::ContactTable;
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Contact repository persisted as a JSON array in a single file.
///
/// The file is read on `init` and rewritten after every successful write,
/// through a sibling temp file and a rename so readers never observe a
/// half-written document. Writes are serialized by the table lock.
pub struct JsonFileContactRepository {
    path: PathBuf,
    unique_names: bool,
    table: RwLock<Option<ContactTable>>,
}

impl JsonFileContactRepository {
    /// Create a repository backed by `path`. Nothing is read until `init`.
    pub fn new(path: impl Into<PathBuf>, unique_names: bool) -> Self {
        Self {
            path: path.into(),
            unique_names,
            table: RwLock::new(None),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<Vec<Contact>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, table: &ContactTable) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(table.rows())?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), count = table.rows().len(), "file store: persisted");
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for JsonFileContactRepository {
    async fn init(&self) -> StoreResult<()> {
        let rows = self.load().await?;
        info!(
            path = %self.path.display(),
            count = rows.len(),
            "file store: loaded contacts"
        );
        *self.table.write().await = Some(ContactTable::with_rows(rows, self.unique_names));
        Ok(())
    }

    async fn shutdown(&self) -> StoreResult<()> {
        let mut guard = self.table.write().await;
        if let Some(table) = guard.as_ref() {
            self.persist(table).await?;
        }
        *guard = None;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>> {
        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        Ok(table.find_by_name(name).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        Ok(table.rows().to_vec())
    }

    async fn insert(&self, proposed: ProposedContact) -> StoreResult<Contact> {
        let mut guard = self.table.write().await;
        let table = guard.as_mut().ok_or(StoreError::NotInitialized)?;

        // Roll back the in-memory row if the file write fails
        let before = table.clone();
        let contact = table.insert(proposed)?;
        if let Err(e) = self.persist(table).await {
            *table = before;
            return Err(e);
        }
        Ok(contact)
    }

    async fn update(&self, id: &ContactId, proposed: ProposedContact) -> StoreResult<Contact> {
        let mut guard = self.table.write().await;
        let table = guard.as_mut().ok_or(StoreError::NotInitialized)?;

        let before = table.clone();
        let contact = table.update(id, proposed)?;
        if let Err(e) = self.persist(table).await {
            *table = before;
            return Err(e);
        }
        Ok(contact)
    }

    async fn delete_by_name(&self, name: &str) -> StoreResult<bool> {
        let mut guard = self.table.write().await;
        let table = guard.as_mut().ok_or(StoreError::NotInitialized)?;

        let before = table.clone();
        if !table.delete_by_name(name) {
            return Ok(false);
        }
        if let Err(e) = self.persist(table).await {
            *table = before;
            return Err(e);
        }
        Ok(true)
    }
}
