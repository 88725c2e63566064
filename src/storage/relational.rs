//! PostgreSQL-backed contact store.

use crate::domain::{ContactInquiry, NewInquiry};
use crate::storage::{ContactStore, PersistenceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

/// One row per inquiry in `contactos`; the database assigns the primary key
/// and the `fecha` default.
#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    /// Builds a lazily-connecting pool. Connection errors surface on first
    /// query, which lets the server start in degraded mode when the database
    /// is down (mirroring the portal's historical behavior).
    pub fn connect_lazy(database_url: &str) -> Result<Self, PersistenceError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(database_url)
            .map_err(PersistenceError::from)?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Pings the database. Used at startup to decide whether seeding can run.
    pub async fn test_connection(&self) -> Result<(), PersistenceError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Creates the `contactos` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS contactos (
                id BIGSERIAL PRIMARY KEY,
                nombre VARCHAR(100) NOT NULL,
                email VARCHAR(255) NOT NULL,
                mensaje TEXT NOT NULL,
                fecha TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn row_to_inquiry(row: &PgRow) -> Result<ContactInquiry, sqlx::Error> {
    Ok(ContactInquiry {
        id: row.try_get("id")?,
        nombre: row.try_get("nombre")?,
        email: row.try_get("email")?,
        mensaje: row.try_get("mensaje")?,
        fecha: row.try_get::<DateTime<Utc>, _>("fecha")?,
    })
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn append(&self, inquiry: NewInquiry) -> Result<ContactInquiry, PersistenceError> {
        // Single insert with read-back of the server-assigned id and fecha.
        let row = sqlx::query(
            "INSERT INTO contactos (nombre, email, mensaje)
             VALUES ($1, $2, $3)
             RETURNING id, nombre, email, mensaje, fecha",
        )
        .bind(&inquiry.nombre)
        .bind(&inquiry.email)
        .bind(&inquiry.mensaje)
        .fetch_one(&self.pool)
        .await?;
        Ok(row_to_inquiry(&row)?)
    }

    async fn list(&self) -> Result<Vec<ContactInquiry>, PersistenceError> {
        let rows = sqlx::query(
            "SELECT id, nombre, email, mensaje, fecha
             FROM contactos
             ORDER BY fecha DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            out.push(row_to_inquiry(row)?);
        }
        Ok(out)
    }

    async fn count(&self) -> Result<u64, PersistenceError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM contactos")
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = row.try_get("total")?;
        Ok(total.max(0) as u64)
    }
}
