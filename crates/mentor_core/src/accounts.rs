//! crates/mentor_core/src/accounts.rs
//!
//! Lookup and creation of login accounts in the `users` collection. The
//! signup/login flow itself (duplicate-email rejection, the password check)
//! lives at the web boundary; this component only talks to the store.

use crate::domain::{Role, UserAccount};
use crate::ports::{from_fields, to_fields, DatabaseService, PortResult};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const USERS_COLLECTION: &str = "users";

/// Store-backed account registry.
#[derive(Clone)]
pub struct Accounts {
    db: Arc<dyn DatabaseService>,
}

impl Accounts {
    pub fn new(db: Arc<dyn DatabaseService>) -> Self {
        Self { db }
    }

    /// Finds the account registered under `email`, if any. Emails are unique
    /// by the signup flow, so the lookup is an equality filter with limit 1.
    pub async fn find_by_email(&self, email: &str) -> PortResult<Option<UserAccount>> {
        let rows = self
            .db
            .find_eq(USERS_COLLECTION, &[("email", json!(email))], Some(1))
            .await?;

        match rows.into_iter().next() {
            Some((id, fields)) => {
                let mut account: UserAccount = from_fields(fields)?;
                account.id = id;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }

    /// Creates a new account under a fresh id and returns it.
    pub async fn create(&self, email: &str, password: &str, role: Role) -> PortResult<UserAccount> {
        let account = UserAccount {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        };
        self.db
            .set(USERS_COLLECTION, &account.id, to_fields(&account)?)
            .await?;
        info!("Created user {} with role {}", account.id, account.role);
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn accounts() -> Accounts {
        Accounts::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn created_account_is_found_by_email() {
        let accounts = accounts();

        let created = accounts
            .create("maya@example.edu", "s3cret", Role::Volunteer)
            .await
            .unwrap();

        let found = accounts
            .find_by_email("maya@example.edu")
            .await
            .unwrap()
            .expect("account should exist");
        assert_eq!(found.id, created.id);
        assert_eq!(found.role, Role::Volunteer);
        assert!(found.password_matches("s3cret"));
        assert!(!found.password_matches("other"));
    }

    #[tokio::test]
    async fn unknown_email_finds_nothing() {
        let accounts = accounts();
        assert!(accounts
            .find_by_email("nobody@example.edu")
            .await
            .unwrap()
            .is_none());
    }
}
