use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserAccount, UserId};

use super::poisoned;

/// Accounts keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<String, UserAccount>>,
}

impl InMemoryUserRepository {
    fn accounts(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<String, UserAccount>>, UserPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| UserPersistenceError::query(poisoned("user store")))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.accounts()?;
        let username = account.user.username().as_str();
        if accounts.contains_key(username) {
            return Err(UserPersistenceError::duplicate_username(username));
        }
        accounts.insert(username.to_owned(), account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.accounts()?.get(username).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .accounts()?
            .values()
            .find(|account| account.user.id() == id)
            .map(|account| account.user.clone()))
    }
}
