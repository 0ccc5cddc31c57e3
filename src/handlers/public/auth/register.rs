use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::error::ApiError;
use crate::services::identity_service::IdentityService;
use crate::validate::validate_email;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/register - Create an identity and sign it in.
///
/// The profile row is provisioned inside the registration transaction, so a
/// successful response always means both rows exist.
pub async fn register(Json(payload): Json<RegisterRequest>) -> Result<impl IntoResponse, ApiError> {
    let mut field_errors = HashMap::new();
    if let Some(msg) = validate_email(&payload.email) {
        field_errors.insert("email".to_string(), msg);
    }
    let min_len = config::config().security.min_password_len;
    if payload.password.chars().count() < min_len {
        field_errors.insert(
            "password".to_string(),
            format!("Password must be at least {} characters", min_len),
        );
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid registration fields", Some(field_errors)));
    }

    let service = IdentityService::new().await?;
    let identity = service.register(&payload.email, &payload.password).await?;
    let profile = service.profile(identity.id).await?;

    let token = generate_jwt(Claims::new(identity.id, identity.email.clone()))?;
    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "token": token,
                "user": {
                    "id": identity.id,
                    "email": identity.email,
                },
                "profile": profile,
                "expires_in": expires_in,
            }
        })),
    ))
}
