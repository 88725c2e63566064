//! Contacts API: ingestion and listing.

use crate::domain::validate_contact;
use crate::transport::http::error::AppError;
use crate::transport::http::types::{
    AppState, ContactBody, ContactCreatedResponse, ContactListResponse,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/contactos",
    responses(
        (status = 200, description = "Every registered contact, most recent first", body = ContactListResponse),
        (status = 500, description = "Store failure", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn list_contacts_handler(
    State(state): State<AppState>,
) -> Result<Json<ContactListResponse>, AppError> {
    let data = state.store.list().await?;
    Ok(Json(ContactListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/api/contactos",
    request_body = crate::domain::RawContactPayload,
    responses(
        (status = 201, description = "Contact persisted", body = ContactCreatedResponse),
        (status = 400, description = "Validation failure; every violated rule is listed", body = crate::transport::http::types::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn create_contact_handler(
    State(state): State<AppState>,
    ContactBody(payload): ContactBody,
) -> Result<(StatusCode, Json<ContactCreatedResponse>), AppError> {
    let inquiry = validate_contact(&payload).map_err(AppError::Validation)?;
    let persisted = state.store.append(inquiry).await?;
    Ok((
        StatusCode::CREATED,
        Json(ContactCreatedResponse {
            success: true,
            message: "Contact registered successfully".to_string(),
            data: persisted,
        }),
    ))
}
