//! Cosmetic login demo.
//!
//! Not an authentication mechanism: the handler echoes the submitted
//! credentials back in an HTML page (values escaped), exactly like the
//! historical portal did.

use crate::transport::html::escape_html;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RecuperarForm {
    #[serde(default)]
    pub usuario: Option<String>,
    #[serde(default)]
    pub clave: Option<String>,
}

pub async fn login_demo_handler(form: Option<Form<RecuperarForm>>) -> Html<String> {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let usuario = escape_html(
        form.usuario
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Usuario demo"),
    );
    let clave = escape_html(
        form.clave
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("1234"),
    );

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Login - Resultado</title>
    <link rel="stylesheet" href="/estilos.css">
</head>
<body>
    <div class="container">
        <header>
            <h1>AgroTrack</h1>
            <p class="subtitle">Portal Interno Agroindustrial</p>
            <nav>
                <a href="/">Inicio</a>
                <a href="/productos.html">Productos</a>
                <a href="/contacto.html">Contacto</a>
                <a href="/login.html" class="active">Login</a>
            </nav>
        </header>
        <main>
            <section class="page-header">
                <h2>¡Inicio de sesión exitoso!</h2>
                <p>¡Bienvenido a AgroTrack!</p>
            </section>
            <section class="login-success">
                <div class="success-card">
                    <p><strong>Usuario:</strong> {usuario}</p>
                    <p><strong>Clave:</strong> {clave}</p>
                    <div class="action-buttons">
                        <a href="/" class="btn">Ir al inicio</a>
                        <a href="/login.html" class="btn btn-secondary">Volver al login</a>
                    </div>
                </div>
            </section>
        </main>
        <footer>
            <p>&copy; 2025 AgroTrack. Portal Interno - Todos los derechos reservados.</p>
        </footer>
    </div>
</body>
</html>
"#
    ))
}
