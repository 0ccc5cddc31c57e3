use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::database::manager::{DatabaseManager, DatabaseError};
use crate::database::models::{Identity, Profile};

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Identity not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub struct IdentityService {
    pool: PgPool,
}

impl IdentityService {
    pub async fn new() -> Result<Self, IdentityError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// Create an identity and its profile in one transaction.
    ///
    /// The pairing is a correctness invariant: if the profile insert fails
    /// the identity insert rolls back with it, so an identity without a
    /// profile can never exist.
    pub async fn register(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let email = email.trim().to_lowercase();
        let password_hash = hash_password(password)?;

        let mut tx = self.pool.begin().await?;

        let identity = sqlx::query_as::<_, Identity>(
            "INSERT INTO identities (email, password_hash) \
             VALUES ($1, $2) \
             RETURNING id, email, password_hash, created_at",
        )
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "identities_email_key") {
                IdentityError::EmailTaken(email.clone())
            } else {
                IdentityError::Sqlx(e)
            }
        })?;

        sqlx::query("INSERT INTO profiles (id, email) VALUES ($1, $2)")
            .bind(identity.id)
            .bind(&identity.email)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("Registered identity {} ({})", identity.id, identity.email);
        Ok(identity)
    }

    /// Verify credentials and return the matching identity.
    ///
    /// Unknown email and wrong password collapse into the same error so the
    /// response does not reveal which one was wrong.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let email = email.trim().to_lowercase();

        let identity = sqlx::query_as::<_, Identity>(
            "SELECT id, email, password_hash, created_at FROM identities WHERE email = $1",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        let identity = match identity {
            Some(identity) => identity,
            None => {
                tracing::info!("Login attempt for unknown email");
                return Err(IdentityError::InvalidCredentials);
            }
        };

        if !verify_password(password, &identity.password_hash)? {
            tracing::info!("Login attempt with wrong password for {}", identity.id);
            return Err(IdentityError::InvalidCredentials);
        }

        Ok(identity)
    }

    /// The caller's own profile row.
    pub async fn profile(&self, identity_id: Uuid) -> Result<Profile, IdentityError> {
        sqlx::query_as::<_, Profile>("SELECT id, email, created_at FROM profiles WHERE id = $1")
            .bind(identity_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(IdentityError::NotFound(identity_id))
    }
}

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
    )
}
