use crate::transport::http::handlers::{auth, contactos, health};
use crate::transport::http::types::{
    AppState, ContactCreatedResponse, ContactListResponse, ErrorResponse,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        contactos::list_contacts_handler,
        contactos::create_contact_handler
    ),
    components(schemas(
        crate::domain::ContactInquiry,
        crate::domain::RawContactPayload,
        ContactListResponse,
        ContactCreatedResponse,
        ErrorResponse
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

/// API routes only; the V2 binary layers static assets, Swagger UI, CORS and
/// request logging on top of this.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/contactos",
            get(contactos::list_contacts_handler).post(contactos::create_contact_handler),
        )
        .route("/api/contactos/listar", get(contactos::list_contacts_handler))
        .route("/api/contactos/cargar", post(contactos::create_contact_handler))
        .route("/auth/recuperar", post(auth::login_demo_handler))
        .with_state(app_state)
}
