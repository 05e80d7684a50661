//! Account lookup used by the login route.
//!
//! Credential storage and password hashing live behind [`AccountDirectory`];
//! the API only needs "who is this, and what role do they hold".

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use consultdesk_auth::CallerIdentity;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("account backend unavailable: {0}")]
    Backend(String),
}

#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// `Ok(None)` for an unknown email or a wrong password; callers must not
    /// be able to tell the two apart.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<CallerIdentity>, AccountError>;
}

/// In-memory directory (dev/test).
///
/// Compares passwords verbatim; it is a stand-in for the real credential
/// store, not a credential store.
#[derive(Default)]
pub struct InMemoryAccounts {
    accounts: HashMap<String, (String, CallerIdentity)>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, email: impl Into<String>, password: impl Into<String>, identity: CallerIdentity) -> Self {
        self.accounts
            .insert(normalize_email(&email.into()), (password.into(), identity));
        self
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccounts {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<CallerIdentity>, AccountError> {
        Ok(self
            .accounts
            .get(&normalize_email(email))
            .filter(|(stored, _)| stored == password)
            .map(|(_, identity)| identity.clone()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use consultdesk_auth::Role;

    fn directory() -> InMemoryAccounts {
        InMemoryAccounts::new().with_account(
            "Admin@Example.com",
            "senha-forte-123",
            CallerIdentity::new("admin-1", Role::Admin),
        )
    }

    #[tokio::test]
    async fn matching_credentials_resolve_identity() {
        let identity = directory()
            .authenticate("admin@example.com", "senha-forte-123")
            .await
            .unwrap();
        assert_eq!(identity, Some(CallerIdentity::new("admin-1", Role::Admin)));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let dir = directory();
        assert_eq!(dir.authenticate("admin@example.com", "nope").await, Ok(None));
        assert_eq!(dir.authenticate("ghost@example.com", "senha-forte-123").await, Ok(None));
    }
}
