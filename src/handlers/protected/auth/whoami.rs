use axum::{response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::services::identity_service::IdentityService;

/// GET /api/auth/whoami - Current caller's identity and profile.
pub async fn whoami(Extension(user): Extension<AuthUser>) -> Result<impl IntoResponse, ApiError> {
    let service = IdentityService::new().await?;
    let profile = service.profile(user.id).await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "user": {
                "id": user.id,
                "email": user.email,
            },
            "profile": profile,
        }
    })))
}
