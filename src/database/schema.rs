//! Startup schema provisioning.
//!
//! The tables are plain SQL; no triggers or row-level policies. The rules
//! live in application code instead: ownership scoping in
//! `database::alunos`, profile provisioning in `services::identity_service`,
//! and the `updated_at` stamp at the update chokepoint.

use sqlx::PgPool;

use crate::database::manager::DatabaseError;

const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS identities (
        id            UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        email         TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS profiles (
        id         UUID PRIMARY KEY REFERENCES identities(id) ON DELETE CASCADE,
        email      TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS alunos (
        id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        nome            TEXT NOT NULL CHECK (length(nome) > 0 AND length(nome) <= 100),
        email           TEXT NOT NULL UNIQUE,
        data_nascimento DATE NOT NULL,
        created_by      UUID NOT NULL REFERENCES identities(id) ON DELETE CASCADE,
        created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at      TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS alunos_created_by_idx ON alunos (created_by, created_at DESC)",
];

/// Create the tables if they do not exist yet. Idempotent; runs at startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("Database schema verified");
    Ok(())
}
