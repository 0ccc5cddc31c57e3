use axum::{response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::error::ApiError;
use crate::services::identity_service::IdentityService;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login - Authenticate and receive a JWT token.
///
/// Unknown email and wrong password are indistinguishable in the response.
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<impl IntoResponse, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let service = IdentityService::new().await?;
    let identity = service.authenticate(&payload.email, &payload.password).await?;

    let token = generate_jwt(Claims::new(identity.id, identity.email.clone()))?;
    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "user": {
                "id": identity.id,
                "email": identity.email,
            },
            "expires_in": expires_in,
        }
    })))
}
