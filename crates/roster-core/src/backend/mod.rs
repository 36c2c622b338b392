//! Backend capabilities.
//!
//! Authentication and the user collection live in an external
//! backend-as-a-service. The rest of the crate only sees the two capability
//! traits below, bundled in an explicitly passed [`Backend`] handle:
//! - `http`: REST client for a Supabase-style service (auth + PostgREST)
//! - `memory`: in-process implementation for demo mode and tests

mod http;
mod memory;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
pub use http::SupabaseClient;
pub use memory::{DEMO_EMAIL, DEMO_PASSWORD, MemoryBackend};

use crate::config::BackendConfig;
use crate::records::{UserDraft, UserId, UserRecord};

/// An authenticated session returned by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user_email: Option<String>,
}

/// Authentication capability.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Signs in with email and password.
    ///
    /// `Ok(None)` means the service answered successfully but returned no
    /// session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>>;

    /// Creates an account.
    async fn sign_up(&self, email: &str, password: &str) -> Result<()>;
}

/// Data capability scoped to the user collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn select_all(&self) -> Result<Vec<UserRecord>>;

    /// Inserts a record; the store assigns the identifier.
    async fn insert(&self, draft: &UserDraft) -> Result<()>;

    /// Replaces the four editable fields of the record with `id`.
    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<()>;

    async fn delete_by_id(&self, id: &UserId) -> Result<()>;
}

/// Capability handle passed to everything that talks to the backend.
#[derive(Clone)]
pub struct Backend {
    pub auth: Arc<dyn AuthApi>,
    pub users: Arc<dyn UserStore>,
}

impl Backend {
    pub fn new(auth: Arc<dyn AuthApi>, users: Arc<dyn UserStore>) -> Self {
        Self { auth, users }
    }

    /// Builds a handle where one object serves both capabilities.
    pub fn shared<T>(service: Arc<T>) -> Self
    where
        T: AuthApi + UserStore + 'static,
    {
        Self {
            auth: Arc::clone(&service) as Arc<dyn AuthApi>,
            users: service as Arc<dyn UserStore>,
        }
    }

    /// Connects to the HTTP service described by the config.
    ///
    /// # Errors
    /// Returns an error if the URL or anon key cannot be resolved.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let client = SupabaseClient::from_config(config)?;
        Ok(Self::shared(Arc::new(client)))
    }

    /// In-memory backend seeded with sample users.
    pub fn demo() -> Self {
        Self::shared(Arc::new(MemoryBackend::seeded()))
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").finish_non_exhaustive()
    }
}
