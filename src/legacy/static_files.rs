//! Static file serving for the legacy portal binary.
//!
//! The V1 server predates the framework static layer, so it resolves request
//! paths itself. Anything that would escape the public directory is treated
//! as a plain miss (404), not specially reported.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::path::{Component, Path, PathBuf};

/// Extension to MIME type map for the assets the portal ships.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Resolves a request path against the public directory, rejecting anything
/// that would traverse outside it.
pub fn safe_public_path(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    // Drop any query string; the route layer normally strips it already.
    let path = request_path.split('?').next().unwrap_or("");
    let relative = path.trim_start_matches('/');

    let mut resolved = public_dir.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            // ParentDir, RootDir or a prefix means a traversal attempt.
            _ => return None,
        }
    }
    Some(resolved)
}

/// Reads and serves one file. A missing file yields the 404 page; any other
/// read failure yields the 500 page.
pub async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(path))],
            bytes,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            crate::legacy::pages::not_found_response()
        }
        Err(e) => crate::legacy::pages::internal_error_response(&e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_plain_and_nested_paths() {
        let public = Path::new("public");
        assert_eq!(
            safe_public_path(public, "/estilos.css"),
            Some(PathBuf::from("public/estilos.css"))
        );
        assert_eq!(
            safe_public_path(public, "/img/logo.png"),
            Some(PathBuf::from("public/img/logo.png"))
        );
    }

    #[test]
    fn strips_query_strings() {
        let public = Path::new("public");
        assert_eq!(
            safe_public_path(public, "/contacto.html?nombre=Juan"),
            Some(PathBuf::from("public/contacto.html"))
        );
    }

    #[test]
    fn rejects_parent_traversal() {
        let public = Path::new("public");
        assert_eq!(safe_public_path(public, "/../etc/passwd"), None);
        assert_eq!(safe_public_path(public, "/css/../../secret.txt"), None);
        assert_eq!(safe_public_path(public, "/.."), None);
    }

    #[test]
    fn current_dir_components_are_ignored() {
        let public = Path::new("public");
        assert_eq!(
            safe_public_path(public, "/./estilos.css"),
            Some(PathBuf::from("public/estilos.css"))
        );
    }

    #[test]
    fn mime_map_covers_the_shipped_assets() {
        assert_eq!(
            content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            content_type_for(Path::new("estilos.css")),
            "text/css; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("logo.png")), "image/png");
        assert_eq!(
            content_type_for(Path::new("unknown.bin")),
            "application/octet-stream"
        );
    }
}
