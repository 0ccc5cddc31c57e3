use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;

use chrono::NaiveDate;

use crate::database::alunos::AlunoStore;
use crate::database::manager::DatabaseManager;
use crate::database::models::NewAluno;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::validate::aluno_field_errors;

#[derive(Debug, Deserialize)]
pub struct CreateAlunoRequest {
    pub nome: String,
    pub email: String,
    pub data_nascimento: NaiveDate,
}

/// GET /api/alunos - All records owned by the caller, newest first.
pub async fn list(Extension(user): Extension<AuthUser>) -> Result<impl IntoResponse, ApiError> {
    let store = AlunoStore::new(DatabaseManager::pool().await?);
    let alunos = store.list_owned(user.id).await?;

    Ok(Json(json!({ "success": true, "data": alunos })))
}

/// POST /api/alunos - Create a record attributed to the caller.
///
/// Ownership comes from the JWT context; the payload has no owner field.
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateAlunoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let field_errors = aluno_field_errors(&payload.nome, &payload.email);
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid aluno fields", Some(field_errors)));
    }

    let store = AlunoStore::new(DatabaseManager::pool().await?);
    let aluno = store
        .insert_owned(
            user.id,
            NewAluno {
                nome: payload.nome,
                email: payload.email,
                data_nascimento: payload.data_nascimento,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": aluno })),
    ))
}
