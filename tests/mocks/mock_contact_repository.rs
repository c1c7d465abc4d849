use async_trait::async_trait;
use contact_book::domain::ContactId;
use contact_book::error::{StoreError, StoreResult};
use contact_book::models::{Contact, ProposedContact};
use contact_book::repositories::ContactRepository;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Keeps contacts in insertion order, tracks method calls for verification
/// and can be switched into a failing mode to simulate an unreachable store.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(false)),
        }
    }

    /// Add a contact with a fresh id and return it.
    pub fn add(&self, name: &str, email: &str, phone: &str) -> Contact {
        let contact = Contact::from_proposed(
            ContactId::generate(),
            ProposedContact::new(name, email, phone),
        );
        self.contacts.lock().unwrap().push(contact.clone());
        contact
    }

    /// Snapshot of the stored contacts.
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Make every subsequent call fail with an I/O error.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total calls to methods that modify the store.
    pub fn write_count(&self) -> usize {
        ["insert", "update", "delete_by_name"]
            .iter()
            .map(|m| self.get_call_count(m))
            .sum()
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if *self.failing.lock().unwrap() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "mock store unavailable",
            )));
        }
        Ok(())
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>> {
        self.track_call("find_by_name")?;
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().find(|c| c.name == name).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        self.track_call("list")?;
        Ok(self.contacts())
    }

    async fn insert(&self, proposed: ProposedContact) -> StoreResult<Contact> {
        self.track_call("insert")?;
        let contact = Contact::from_proposed(ContactId::generate(), proposed);
        self.contacts.lock().unwrap().push(contact.clone());
        Ok(contact)
    }

    async fn update(&self, id: &ContactId, proposed: ProposedContact) -> StoreResult<Contact> {
        self.track_call("update")?;
        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        contact.apply(proposed);
        Ok(contact.clone())
    }

    async fn delete_by_name(&self, name: &str) -> StoreResult<bool> {
        self.track_call("delete_by_name")?;
        let mut contacts = self.contacts.lock().unwrap();
        match contacts.iter().position(|c| c.name == name) {
            Some(index) => {
                contacts.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
