//! Centralized configuration (environment variables + defaults).
//!
//! Every knob has a hardcoded fallback so the portal runs out of the box on a
//! developer machine; production deployments override via the environment (a
//! `.env` file is honored through `dotenv`).

use std::env;

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Listening port for either portal binary.
pub fn server_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(3000)
}

/// Full database URL. `DATABASE_URL` wins; otherwise assembled from the
/// individual `DB_*` variables and their defaults.
pub fn database_url() -> String {
    if let Ok(url) = env::var("DATABASE_URL") {
        return url;
    }
    let host = var_or("DB_HOST", "localhost");
    let user = var_or("DB_USER", "agrotrack");
    let password = var_or("DB_PASSWORD", "agrotrack");
    let name = var_or("DB_NAME", "agrotrack");
    format!("postgres://{user}:{password}@{host}/{name}")
}

/// Directory holding the static portal pages.
pub fn public_dir() -> String {
    var_or("PUBLIC_DIR", "public")
}

/// Flat file the legacy (V1) binary appends inquiries to.
pub fn consultas_file() -> String {
    var_or("CONSULTAS_FILE", "data/consultas.txt")
}

/// True outside production. Controls whether error responses carry the
/// underlying error chain.
pub fn is_development() -> bool {
    var_or("APP_ENV", "development") != "production"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_has_a_default_shape() {
        if env::var("DATABASE_URL").is_err()
            && env::var("DB_HOST").is_err()
            && env::var("DB_USER").is_err()
        {
            assert!(database_url().starts_with("postgres://"));
        }
    }

    #[test]
    fn port_falls_back_to_3000() {
        if env::var("PORT").is_err() {
            assert_eq!(server_port(), 3000);
        }
    }
}
