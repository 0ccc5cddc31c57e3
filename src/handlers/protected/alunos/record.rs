use axum::{extract::Path, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use chrono::NaiveDate;

use crate::database::alunos::AlunoStore;
use crate::database::manager::DatabaseManager;
use crate::database::models::AlunoChanges;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::validate::aluno_field_errors;

#[derive(Debug, Deserialize)]
pub struct UpdateAlunoRequest {
    pub nome: String,
    pub email: String,
    pub data_nascimento: NaiveDate,
}

/// PUT /api/alunos/:id - Replace nome/email/data_nascimento on an owned record.
///
/// `updated_at` is stamped by the store; a non-owned id yields 403, a missing
/// one 404.
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAlunoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let field_errors = aluno_field_errors(&payload.nome, &payload.email);
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid aluno fields", Some(field_errors)));
    }

    let store = AlunoStore::new(DatabaseManager::pool().await?);
    let aluno = store
        .update_owned(
            user.id,
            id,
            AlunoChanges {
                nome: payload.nome,
                email: payload.email,
                data_nascimento: payload.data_nascimento,
            },
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": aluno })))
}

/// DELETE /api/alunos/:id - Delete an owned record.
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let store = AlunoStore::new(DatabaseManager::pool().await?);
    store.delete_owned(user.id, id).await?;

    Ok(Json(json!({ "success": true, "data": { "deleted": id } })))
}
