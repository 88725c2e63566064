use crate::domain::{ContactInquiry, RawContactPayload};
use crate::storage::ContactStore;
use crate::transport::http::error::AppError;
use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum::{Form, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Shared application state: the store is injected at startup so tests can
/// swap in the in-memory fake.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }
}

/// Envelope for `GET /api/contactos`.
#[derive(Serialize, Debug, ToSchema)]
pub struct ContactListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<ContactInquiry>,
}

/// Envelope for a successful `POST /api/contactos` (status 201).
#[derive(Serialize, Debug, ToSchema)]
pub struct ContactCreatedResponse {
    pub success: bool,
    pub message: String,
    pub data: ContactInquiry,
}

/// Uniform error envelope emitted by the centralized handler.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
    /// Full ordered list of violated validation rules, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Underlying error chain; only populated outside production mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Ingestion body extractor: accepts JSON or form-urlencoded payloads and
/// yields the untrusted [`RawContactPayload`] either way.
pub struct ContactBody(pub RawContactPayload);

#[async_trait]
impl<S> FromRequest<S> for ContactBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(payload) = Form::<RawContactPayload>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid form body: {e}")))?;
            Ok(ContactBody(payload))
        } else {
            let Json(payload) = Json::<RawContactPayload>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?;
            Ok(ContactBody(payload))
        }
    }
}
