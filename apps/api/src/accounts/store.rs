use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::Account;

/// Read access to accounts created by the sign-up flow.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, sqlx::Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, sqlx::Error>;
}

pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            "SELECT id, name, email, is_verified, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            "SELECT id, name, email, is_verified, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: std::sync::Mutex<Vec<Account>>,
}

#[cfg(test)]
impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, account: Account) {
        self.lock().push(account);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Account>> {
        self.accounts.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, sqlx::Error> {
        Ok(self.lock().iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, sqlx::Error> {
        Ok(self.lock().iter().find(|a| a.email == email).cloned())
    }
}
