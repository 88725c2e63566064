//! AgroTrack V1 portal server (legacy).
//!
//! The original file-backed portal: static pages served by hand with
//! path-traversal protection, contact submissions appended to a flat text
//! log, and server-rendered HTML for every response. Kept runnable alongside
//! V2 for environments without a database.

use agrotrack::domain::{validate_contact, RawContactPayload};
use agrotrack::infra::config;
use agrotrack::legacy::{pages, static_files};
use agrotrack::storage::{ContactStore, FileContactStore};
use agrotrack::transport::http::middleware;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct LegacyState {
    store: Arc<FileContactStore>,
    public_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = Arc::new(FileContactStore::open(config::consultas_file()).await?);
    let state = LegacyState {
        store,
        public_dir: PathBuf::from(config::public_dir()),
    };

    let app = Router::new()
        .route("/contacto/listar", get(listar_consultas))
        .route("/contacto/cargar", post(cargar_consulta))
        .route("/auth/recuperar", post(recuperar))
        .fallback(fallback)
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state);

    let port = config::server_port();
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "AgroTrack V1 (legacy) listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn listar_consultas(State(state): State<LegacyState>) -> Response {
    match state.store.list().await {
        Ok(records) => Html(pages::listar_page(&records)).into_response(),
        Err(e) => pages::internal_error_response(&e.to_string()),
    }
}

async fn cargar_consulta(
    State(state): State<LegacyState>,
    Form(payload): Form<RawContactPayload>,
) -> Response {
    let inquiry = match validate_contact(&payload) {
        Ok(inquiry) => inquiry,
        Err(errors) => {
            return (StatusCode::BAD_REQUEST, Html(pages::validation_error_page(&errors)))
                .into_response()
        }
    };
    match state.store.append(inquiry).await {
        Ok(_) => Html(pages::gracias_page()).into_response(),
        Err(e) => pages::internal_error_response(&e.to_string()),
    }
}

#[derive(Debug, Default, serde::Deserialize)]
struct RecuperarForm {
    #[serde(default)]
    usuario: Option<String>,
    #[serde(default)]
    clave: Option<String>,
}

async fn recuperar(form: Option<Form<RecuperarForm>>) -> Html<String> {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let usuario = form
        .usuario
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("Juan");
    let clave = form
        .clave
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("1234");
    Html(pages::login_result_page(usuario, clave))
}

/// Everything not matched above: page aliases, then static assets, then 404.
async fn fallback(State(state): State<LegacyState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        if method == Method::POST {
            return pages::not_found_response();
        }
        return (StatusCode::METHOD_NOT_ALLOWED, "Método no permitido").into_response();
    }

    let path = uri.path();
    let file = match path {
        "/" | "/index.html" => Some("index.html"),
        "/productos.html" => Some("productos.html"),
        "/contacto" | "/contacto.html" => Some("contacto.html"),
        "/login" | "/login.html" => Some("login.html"),
        _ => None,
    };
    if let Some(file) = file {
        return static_files::serve_file(&state.public_dir.join(file)).await;
    }

    match static_files::safe_public_path(&state.public_dir, path) {
        Some(resolved) => static_files::serve_file(&resolved).await,
        // Traversal attempts look exactly like a miss.
        None => pages::not_found_response(),
    }
}
