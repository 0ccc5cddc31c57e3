use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A student record, owned by exactly one identity (`created_by`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Aluno {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub data_nascimento: NaiveDate,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating an aluno. Ownership comes from the
/// authenticated caller, never from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAluno {
    pub nome: String,
    pub email: String,
    pub data_nascimento: NaiveDate,
}

/// Fields accepted when updating an aluno. `created_by` and the timestamps
/// are deliberately absent: ownership is immutable and `updated_at` is
/// stamped server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlunoChanges {
    pub nome: String,
    pub email: String,
    pub data_nascimento: NaiveDate,
}
