//! Server-rendered HTML pages for the legacy portal.
//!
//! All user-submitted text is escaped before interpolation.

use crate::domain::ContactInquiry;
use crate::transport::html::escape_html;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="es"><head><meta charset="UTF-8"><title>{title}</title><link rel="stylesheet" href="/estilos.css"></head><body><div class="container"><main>{body}</main></div></body></html>"#
    )
}

/// The consultas listing, most recent first, in the historical block format.
pub fn listar_page(records: &[ContactInquiry]) -> String {
    let body = if records.is_empty() {
        r#"<div class="no-consultas">Aún no hay consultas registradas en el sistema.</div>"#
            .to_string()
    } else {
        let blocks: String = records
            .iter()
            .map(|r| {
                format!(
                    "-------------------------\nFecha: {}\nNombre: {}\nEmail: {}\nMensaje: {}\n-------------------------\n",
                    r.fecha.format("%Y-%m-%d %H:%M"),
                    escape_html(&r.nombre),
                    escape_html(&r.email),
                    escape_html(&r.mensaje),
                )
            })
            .collect();
        format!(r#"<div class="consultas-content"><pre>{blocks}</pre></div>"#)
    };
    page(
        "Consultas - AgroTrack",
        &format!(
            r#"<div class="consultas-page"><h1>Consultas Recibidas</h1><p>Aquí puedes ver todas las consultas que han enviado los usuarios del portal.</p>{body}<div class="actions"><a class="btn" href="/contacto.html">Volver a Contacto</a><a class="btn btn-secondary" href="/">Ir al Inicio</a></div></div>"#
        ),
    )
}

/// Thank-you page shown after a successful submission.
pub fn gracias_page() -> String {
    page(
        "Contacto - Gracias",
        r#"<div class="success-page"><h1>¡Gracias por tu consulta!</h1><p>Hemos recibido tu mensaje correctamente y será procesado por nuestro equipo.</p><div class="thanks-message"><p><strong>Tu consulta ha sido registrada exitosamente.</strong><br>Nos pondremos en contacto contigo pronto.</p></div><div class="actions"><a class="btn" href="/contacto.html">Enviar otra consulta</a><a class="btn btn-secondary" href="/contacto/listar">Ver todas las consultas</a><a class="btn btn-secondary" href="/">Ir al Inicio</a></div></div>"#,
    )
}

/// Validation-failure page listing every violated rule.
pub fn validation_error_page(errors: &[String]) -> String {
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape_html(e)))
        .collect();
    page(
        "Contacto - Error",
        &format!(
            r#"<div class="error-page"><h1>No se pudo registrar la consulta</h1><ul class="error-message">{items}</ul><div class="actions"><a class="btn" href="/contacto.html">Volver a Contacto</a></div></div>"#
        ),
    )
}

/// Login echo page, V1 style.
pub fn login_result_page(usuario: &str, clave: &str) -> String {
    let usuario = escape_html(usuario);
    let clave = escape_html(clave);
    page(
        "Login - Resultado",
        &format!(
            r#"<div class="login-success"><h1>¡Login Exitoso!</h1><p>Has iniciado sesión correctamente en el sistema AgroTrack.</p><div class="credentials"><p><strong>Usuario:</strong> {usuario}</p><p><strong>Clave:</strong> {clave}</p></div><div class="actions"><a class="btn" href="/">Ir al Inicio</a><a class="btn btn-secondary" href="/login.html">Volver al Login</a></div></div>"#
        ),
    )
}

pub fn not_found_response() -> Response {
    let html = page(
        "404 - No encontrado",
        r#"<div class="error-page"><h1>404 - Página no encontrada</h1><p>Lo sentimos, la página que buscas no existe o ha sido movida.</p><div class="actions"><a class="btn" href="/">Volver al Inicio</a><a class="btn btn-secondary" href="/productos.html">Ver Productos</a></div></div>"#,
    );
    (StatusCode::NOT_FOUND, Html(html)).into_response()
}

pub fn internal_error_response(message: &str) -> Response {
    let detail = escape_html(message);
    let html = page(
        "500 - Error interno",
        &format!(
            r#"<div class="error-page"><h1>500 - Error interno del servidor</h1><p>Lo sentimos, ha ocurrido un error interno en el servidor.</p><div class="error-description">{detail}</div><div class="actions"><a class="btn" href="/">Volver al Inicio</a><a class="btn btn-secondary" href="/contacto.html">Reportar problema</a></div></div>"#
        ),
    );
    (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn listar_page_escapes_user_text() {
        let records = vec![ContactInquiry {
            id: 1,
            nombre: "<b>Ana</b>".into(),
            email: "ana@x.com".into(),
            mensaje: "hola & chau".into(),
            fecha: Utc::now(),
        }];
        let html = listar_page(&records);
        assert!(html.contains("&lt;b&gt;Ana&lt;/b&gt;"));
        assert!(html.contains("hola &amp; chau"));
        assert!(!html.contains("<b>Ana</b>"));
    }

    #[test]
    fn empty_listing_shows_the_placeholder() {
        let html = listar_page(&[]);
        assert!(html.contains("Aún no hay consultas"));
    }

    #[test]
    fn login_page_escapes_credentials() {
        let html = login_result_page("<u>", "\"x\"");
        assert!(html.contains("&lt;u&gt;"));
        assert!(html.contains("&quot;x&quot;"));
    }
}
