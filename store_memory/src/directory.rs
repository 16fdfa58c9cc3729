//! In-memory identity directory.

use std::collections::HashMap;
use std::sync::Mutex;

use carelink_store::{ContactDirectory, Demographics, IdentityDirectory, StoreError};
use carelink_types::{ActorRole, ContactValue, IdentityHandle, IdentityRef};

/// Holds demographics per identity and a contact index for one role.
///
/// A [`carelink_store::DirectorySet`] for tests is three of these (or the
/// same one shared, when roles do not matter to the test).
#[derive(Default)]
pub struct MemoryDirectory {
    role: Option<ActorRole>,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    demographics: HashMap<IdentityHandle, Demographics>,
    contacts: HashMap<ContactValue, IdentityHandle>,
}

impl MemoryDirectory {
    pub fn new(role: ActorRole) -> Self {
        Self {
            role: Some(role),
            inner: Mutex::default(),
        }
    }

    /// Register an identity with its demographics; indexes its email and
    /// phone for contact lookup.
    pub fn put(&self, identity: IdentityHandle, demographics: Demographics) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(email) = &demographics.email {
            inner
                .contacts
                .insert(ContactValue::Email(email.clone()), identity.clone());
        }
        if let Some(phone) = &demographics.phone {
            inner
                .contacts
                .insert(ContactValue::Phone(phone.clone()), identity.clone());
        }
        inner.demographics.insert(identity, demographics);
    }
}

impl IdentityDirectory for MemoryDirectory {
    fn demographics(
        &self,
        identity: &IdentityHandle,
    ) -> Result<Option<Demographics>, StoreError> {
        Ok(self.inner.lock().unwrap().demographics.get(identity).cloned())
    }
}

impl ContactDirectory for MemoryDirectory {
    fn lookup_by_contact(
        &self,
        contact: &ContactValue,
    ) -> Result<Option<IdentityRef>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.contacts.get(contact).map(|handle| IdentityRef {
            role: self.role.unwrap_or(ActorRole::Holder),
            handle: handle.clone(),
        }))
    }
}
