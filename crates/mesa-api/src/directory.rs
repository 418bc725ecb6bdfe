//! In-memory account and table directory.
//!
//! Stands in for the business-side persistence layer behind the
//! [`IdentityProvider`] seam. Account passwords are stored as Argon2id
//! hashes.

use std::collections::HashMap;

use async_trait::async_trait;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use mesa_core::error::AppError;
use mesa_core::result::AppResult;
use mesa_core::traits::{GuestLogin, IdentityProvider, LoginCredentials};
use mesa_core::types::{Identity, Role};

#[derive(Debug, Clone)]
struct AccountRecord {
    id: Uuid,
    name: String,
    role: Role,
    password_hash: String,
}

/// In-memory identity backend keyed by account email.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    accounts: RwLock<HashMap<String, AccountRecord>>,
    /// Tables guests may open a session at.
    tables: Vec<u32>,
}

impl MemoryDirectory {
    /// Creates an empty directory with the given tables.
    pub fn new(tables: Vec<u32>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            tables,
        }
    }

    /// Creates a directory with a seeded owner account and twenty tables.
    pub async fn demo() -> AppResult<Self> {
        let directory = Self::new((1..=20).collect());
        directory
            .seed_account("owner@mesa.dev", "owner-secret", Role::Owner, "Owner")
            .await?;
        directory
            .seed_account("staff@mesa.dev", "staff-secret", Role::Employee, "Staff")
            .await?;
        Ok(directory)
    }

    /// Adds an account with a hashed password. Returns its identity ID.
    pub async fn seed_account(
        &self,
        email: &str,
        password: &str,
        role: Role,
        name: &str,
    ) -> AppResult<Uuid> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?
            .to_string();

        let record = AccountRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            role,
            password_hash: hash,
        };
        let id = record.id;
        self.accounts
            .write()
            .await
            .insert(email.to_lowercase(), record);
        Ok(id)
    }
}

#[async_trait]
impl IdentityProvider for MemoryDirectory {
    async fn login(&self, credentials: &LoginCredentials) -> AppResult<Identity> {
        let accounts = self.accounts.read().await;
        let record = accounts
            .get(&credentials.email.to_lowercase())
            .ok_or_else(|| AppError::authentication("Unknown email or wrong password"))?;

        let parsed = PasswordHash::new(&record.password_hash)
            .map_err(|e| AppError::internal(format!("Invalid stored hash: {e}")))?;
        match Argon2::default().verify_password(credentials.password.as_bytes(), &parsed) {
            Ok(()) => {}
            Err(argon2::password_hash::Error::Password) => {
                return Err(AppError::authentication("Unknown email or wrong password"));
            }
            Err(e) => {
                return Err(AppError::internal(format!(
                    "Password verification failed: {e}"
                )));
            }
        }

        Ok(Identity::account(record.id, record.role, record.name.clone()))
    }

    async fn guest_login(&self, login: &GuestLogin) -> AppResult<Identity> {
        if !self.tables.contains(&login.table_number) {
            return Err(AppError::validation(format!(
                "Unknown table: {}",
                login.table_number
            )));
        }
        Ok(Identity::guest(
            Uuid::new_v4(),
            login.name.clone(),
            login.table_number,
        ))
    }

    async fn logout(&self, identity_id: Uuid) -> AppResult<()> {
        // Tokens are stateless; nothing to revoke here.
        tracing::debug!(identity_id = %identity_id, "Business-side logout");
        Ok(())
    }
}
