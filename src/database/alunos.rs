//! Ownership-scoped store for aluno records.
//!
//! Every operation takes the caller's identity id and scopes its SQL by
//! `created_by`. Rows owned by other identities are never visible, mutable,
//! or deletable here; an attempt against someone else's row is rejected as
//! `NotOwner` at this boundary rather than silently filtered into a 404.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Aluno, AlunoChanges, NewAluno};

const ALUNO_COLUMNS: &str = "id, nome, email, data_nascimento, created_by, created_at, updated_at";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Aluno {0} not found")]
    NotFound(Uuid),

    #[error("Aluno {0} belongs to another identity")]
    NotOwner(Uuid),

    #[error("Email already in use by another aluno: {0}")]
    DuplicateEmail(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub struct AlunoStore {
    pool: PgPool,
}

impl AlunoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All records owned by `owner`, newest first.
    pub async fn list_owned(&self, owner: Uuid) -> Result<Vec<Aluno>, StoreError> {
        let sql = format!(
            "SELECT {ALUNO_COLUMNS} FROM alunos WHERE created_by = $1 ORDER BY created_at DESC"
        );

        let alunos = sqlx::query_as::<_, Aluno>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        Ok(alunos)
    }

    /// Insert a record attributed to `owner`. The payload carries no owner
    /// field, so a caller cannot create records on someone else's behalf.
    pub async fn insert_owned(&self, owner: Uuid, new: NewAluno) -> Result<Aluno, StoreError> {
        let sql = format!(
            "INSERT INTO alunos (nome, email, data_nascimento, created_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {ALUNO_COLUMNS}"
        );

        sqlx::query_as::<_, Aluno>(&sql)
            .bind(new.nome.trim())
            .bind(new.email.trim())
            .bind(new.data_nascimento)
            .bind(owner)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::map_unique_violation(e, &new.email))
    }

    /// Replace nome/email/data_nascimento on a record `owner` owns.
    ///
    /// `updated_at` is overwritten with the database clock on every update;
    /// no client-supplied value reaches this statement. `created_by` is not
    /// part of the SET list and can never change.
    pub async fn update_owned(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: AlunoChanges,
    ) -> Result<Aluno, StoreError> {
        let sql = format!(
            "UPDATE alunos \
             SET nome = $1, email = $2, data_nascimento = $3, updated_at = now() \
             WHERE id = $4 AND created_by = $5 \
             RETURNING {ALUNO_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, Aluno>(&sql)
            .bind(changes.nome.trim())
            .bind(changes.email.trim())
            .bind(changes.data_nascimento)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::map_unique_violation(e, &changes.email))?;

        match updated {
            Some(aluno) => Ok(aluno),
            None => Err(self.classify_miss(id).await?),
        }
    }

    /// Delete a record `owner` owns.
    pub async fn delete_owned(&self, owner: Uuid, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM alunos WHERE id = $1 AND created_by = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(self.classify_miss(id).await?);
        }
        Ok(())
    }

    /// A scoped update/delete matched nothing. Distinguish "row is someone
    /// else's" (authorization rejection) from "row does not exist".
    async fn classify_miss(&self, id: Uuid) -> Result<StoreError, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM alunos WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        if exists {
            tracing::warn!("Rejected access to aluno {} by a non-owning identity", id);
            Ok(StoreError::NotOwner(id))
        } else {
            Ok(StoreError::NotFound(id))
        }
    }

    fn map_unique_violation(err: sqlx::Error, email: &str) -> StoreError {
        if let sqlx::Error::Database(db_err) = &err {
            let unique = db_err.code().as_deref() == Some("23505");
            if unique && db_err.constraint() == Some("alunos_email_key") {
                return StoreError::DuplicateEmail(email.trim().to_string());
            }
        }
        StoreError::Sqlx(err)
    }
}
