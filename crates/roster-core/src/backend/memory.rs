use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Result, bail};
use async_trait::async_trait;

use super::{AuthApi, Session, UserStore};
use crate::records::{UserDraft, UserId, UserRecord};

/// Email of the account the demo backend is seeded with.
pub const DEMO_EMAIL: &str = "admin@example.com";
/// Password of the seeded demo account.
pub const DEMO_PASSWORD: &str = "admin";

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, String>,
    records: Vec<UserRecord>,
    next_id: u64,
}

/// In-process backend: accounts and user records held in memory.
///
/// Identifiers are assigned from an increasing counter and never reused.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
    fail_writes: AtomicBool,
    omit_session: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with the demo account and a handful of users.
    pub fn seeded() -> Self {
        let backend = Self::new().with_account(DEMO_EMAIL, DEMO_PASSWORD);
        {
            let mut inner = backend.lock();
            for (name, email, department, group) in [
                ("Ada Lovelace", "ada@example.com", "Engineering", "Admins"),
                ("Grace Hopper", "grace@example.com", "Engineering", "Users"),
                ("Alan Turing", "alan@example.com", "Research", "Users"),
                ("Katherine Johnson", "katherine@example.com", "Research", "Admins"),
                ("Linus Torvalds", "linus@example.com", "Operations", "Users"),
            ] {
                let draft = UserDraft {
                    name: name.to_string(),
                    email: email.to_string(),
                    department: department.to_string(),
                    group: group.to_string(),
                };
                Self::push(&mut inner, draft);
            }
        }
        backend
    }

    #[must_use]
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.lock()
            .accounts
            .insert(email.to_string(), password.to_string());
        self
    }

    /// Makes insert/update/delete fail until turned off again.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes sign-in succeed without returning a session.
    pub fn set_omit_session(&self, omit: bool) {
        self.omit_session.store(omit, Ordering::SeqCst);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(inner: &mut Inner, draft: UserDraft) -> UserId {
        inner.next_id += 1;
        let id = UserId::new(inner.next_id.to_string());
        inner.records.push(draft.into_record(id.clone()));
        id
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("write rejected by store");
        }
        Ok(())
    }
}

#[async_trait]
impl AuthApi for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>> {
        let known = self
            .lock()
            .accounts
            .get(email)
            .is_some_and(|stored| stored == password);
        if !known {
            bail!("Invalid login credentials");
        }
        if self.omit_session.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(Session {
            access_token: format!("memory-token-{email}"),
            user_email: Some(email.to_string()),
        }))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        if email.trim().is_empty() || password.is_empty() {
            bail!("Signup requires a valid password");
        }
        let mut inner = self.lock();
        if inner.accounts.contains_key(email) {
            bail!("User already registered");
        }
        inner
            .accounts
            .insert(email.to_string(), password.to_string());
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryBackend {
    async fn select_all(&self) -> Result<Vec<UserRecord>> {
        Ok(self.lock().records.clone())
    }

    async fn insert(&self, draft: &UserDraft) -> Result<()> {
        self.check_writable()?;
        Self::push(&mut self.lock(), draft.clone());
        Ok(())
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<()> {
        self.check_writable()?;
        let mut inner = self.lock();
        // Like a filtered PATCH, an unknown id matches zero rows and succeeds.
        if let Some(record) = inner.records.iter_mut().find(|r| &r.id == id) {
            *record = draft.clone().into_record(id.clone());
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<()> {
        self.check_writable()?;
        self.lock().records.retain(|r| &r.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn draft(name: &str) -> UserDraft {
        UserDraft {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            department: "Eng".to_string(),
            group: "Users".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_fresh_id() {
        let backend = MemoryBackend::seeded();
        let before = backend.select_all().await.unwrap();
        let existing: HashSet<_> = before.iter().map(|r| r.id.clone()).collect();

        backend.insert(&draft("Zed")).await.unwrap();

        let after = backend.select_all().await.unwrap();
        let added = after.iter().find(|r| r.name == "Zed").unwrap();
        assert!(!existing.contains(&added.id));
        assert_eq!(after.len(), before.len() + 1);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let backend = MemoryBackend::new();
        backend.insert(&draft("A")).await.unwrap();
        let first = backend.select_all().await.unwrap()[0].id.clone();
        backend.delete_by_id(&first).await.unwrap();
        backend.insert(&draft("B")).await.unwrap();
        let second = backend.select_all().await.unwrap()[0].id.clone();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let backend = MemoryBackend::seeded();
        let target = backend.select_all().await.unwrap()[2].id.clone();
        backend.delete_by_id(&target).await.unwrap();
        let after = backend.select_all().await.unwrap();
        assert!(after.iter().all(|r| r.id != target));
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields_and_keeps_id() {
        let backend = MemoryBackend::seeded();
        let target = backend.select_all().await.unwrap()[0].clone();
        let edited = UserDraft {
            name: "New Name".to_string(),
            email: "new@example.com".to_string(),
            department: "Legal".to_string(),
            group: "Guests".to_string(),
        };
        backend.update(&target.id, &edited).await.unwrap();

        let after = backend.select_all().await.unwrap();
        let row = after.iter().find(|r| r.id == target.id).unwrap();
        assert_eq!(row.to_draft(), edited);
    }

    #[tokio::test]
    async fn test_fail_writes_leaves_records_untouched() {
        let backend = MemoryBackend::seeded();
        let before = backend.select_all().await.unwrap();
        backend.set_fail_writes(true);

        assert!(backend.insert(&draft("X")).await.is_err());
        assert!(backend.delete_by_id(&before[0].id).await.is_err());
        assert_eq!(backend.select_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_sign_in_checks_password() {
        let backend = MemoryBackend::seeded();
        let session = backend
            .sign_in(DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.user_email.as_deref(), Some(DEMO_EMAIL));

        let err = backend.sign_in(DEMO_EMAIL, "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicates() {
        let backend = MemoryBackend::new();
        backend.sign_up("new@example.com", "pw").await.unwrap();
        let err = backend.sign_up("new@example.com", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "User already registered");
        assert!(backend.sign_in("new@example.com", "pw").await.is_ok());
    }
}
