//! HTTP client façade over the Aluno API.
//!
//! Every operation is one atomic request/response round trip that resolves
//! to either a typed result or exactly one [`ClientError`]. There are no
//! retries and no partial-success states; callers hold their in-memory state
//! unchanged on failure and re-fetch after successful mutations.

pub mod form;
pub mod roster;

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Aluno, NewAluno, Profile};

#[derive(Debug, Error)]
pub enum ClientError {
    /// Server-side field validation rejected the payload (400).
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },

    /// Missing or invalid credentials (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but does not own the record (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Record does not exist (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Email uniqueness violation (409).
    #[error("Conflict: {0}")]
    DuplicateEmail(String),

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Connectivity or protocol failure before a response was interpreted.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhoamiData {
    pub user: SessionUser,
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Default, Deserialize)]
struct ApiFailure {
    message: Option<String>,
    error: Option<String>,
    field_errors: Option<HashMap<String, String>>,
}

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // ---- Identity boundary ----

    pub async fn register(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let res = self
            .http
            .post(self.url("/auth/register"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let res = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn whoami(&self) -> Result<WhoamiData, ClientError> {
        let res = self.authorized(self.http.get(self.url("/api/auth/whoami"))).send().await?;
        Self::parse(res).await
    }

    // ---- Record access façade ----

    pub async fn list_alunos(&self) -> Result<Vec<Aluno>, ClientError> {
        let res = self.authorized(self.http.get(self.url("/api/alunos"))).send().await?;
        Self::parse(res).await
    }

    pub async fn create_aluno(&self, payload: &NewAluno) -> Result<Aluno, ClientError> {
        let res = self
            .authorized(self.http.post(self.url("/api/alunos")))
            .json(payload)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn update_aluno(&self, id: Uuid, payload: &NewAluno) -> Result<Aluno, ClientError> {
        let res = self
            .authorized(self.http.put(self.url(&format!("/api/alunos/{}", id))))
            .json(payload)
            .send()
            .await?;
        Self::parse(res).await
    }

    pub async fn delete_aluno(&self, id: Uuid) -> Result<(), ClientError> {
        let res = self
            .authorized(self.http.delete(self.url(&format!("/api/alunos/{}", id))))
            .send()
            .await?;

        if res.status().is_success() {
            Ok(())
        } else {
            Err(Self::failure(res).await)
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
        if res.status().is_success() {
            let envelope: Envelope<T> = res.json().await?;
            Ok(envelope.data)
        } else {
            Err(Self::failure(res).await)
        }
    }

    async fn failure(res: reqwest::Response) -> ClientError {
        let status = res.status().as_u16();
        let body: ApiFailure = res.json().await.unwrap_or_default();
        Self::classify_failure(status, body)
    }

    fn classify_failure(status: u16, body: ApiFailure) -> ClientError {
        let message = body
            .message
            .or(body.error)
            .unwrap_or_else(|| "request failed".to_string());

        match status {
            400 => ClientError::Validation {
                message,
                field_errors: body.field_errors.unwrap_or_default(),
            },
            401 => ClientError::Unauthorized(message),
            403 => ClientError::Forbidden(message),
            404 => ClientError::NotFound(message),
            409 => ClientError::DuplicateEmail(message),
            _ => ClientError::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure_body(message: &str) -> ApiFailure {
        ApiFailure {
            message: Some(message.to_string()),
            error: None,
            field_errors: None,
        }
    }

    #[test]
    fn conflict_maps_to_duplicate_email() {
        let err = ApiClient::classify_failure(409, failure_body("Email already in use"));
        assert!(matches!(err, ClientError::DuplicateEmail(msg) if msg == "Email already in use"));
    }

    #[test]
    fn validation_carries_field_errors() {
        let body = ApiFailure {
            message: Some("Invalid aluno fields".to_string()),
            error: None,
            field_errors: Some(
                [("nome".to_string(), "Nome é obrigatório".to_string())].into(),
            ),
        };

        match ApiClient::classify_failure(400, body) {
            ClientError::Validation { field_errors, .. } => {
                assert_eq!(field_errors.get("nome").map(String::as_str), Some("Nome é obrigatório"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn ownership_and_existence_statuses_stay_distinct() {
        assert!(matches!(
            ApiClient::classify_failure(403, failure_body("You do not own this record")),
            ClientError::Forbidden(_)
        ));
        assert!(matches!(
            ApiClient::classify_failure(404, failure_body("Aluno not found")),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ApiClient::classify_failure(500, ApiFailure::default()),
            ClientError::Api { status: 500, .. }
        ));
    }
}
