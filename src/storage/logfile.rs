//! Flat-file contact store (legacy V1 backend).
//!
//! Inquiries are appended to a single text file as separator-delimited
//! blocks, matching the historical `data/consultas.txt` format:
//!
//! ```text
//! -------------------------
//! Fecha: 2025-01-15 14:30
//! Nombre: Ana
//! Email: ana@x.com
//! Mensaje: hola
//! -------------------------
//! ```
//!
//! The file has no structured ids; this store assigns positional ids (1-based
//! append order), which are stable because records are never deleted. All
//! file access serializes behind one async mutex so concurrent appends cannot
//! interleave blocks and reads never observe a torn write.

use crate::domain::{ContactInquiry, NewInquiry};
use crate::storage::{ContactStore, PersistenceError};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike, Utc};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const SEPARATOR: &str = "-------------------------";
const FECHA_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct FileContactStore {
    path: PathBuf,
    /// Guards the file and tracks the persisted record count (= last id).
    state: Mutex<u64>,
}

impl FileContactStore {
    /// Opens (or prepares to create) the log at `path`, counting any existing
    /// records so id assignment continues where the file left off.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let existing = match tokio::fs::read_to_string(&path).await {
            Ok(content) => parse_blocks(&content).len() as u64,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            state: Mutex::new(existing),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContactStore for FileContactStore {
    async fn append(&self, inquiry: NewInquiry) -> Result<ContactInquiry, PersistenceError> {
        let mut count = self.state.lock().await;

        let now = Local::now();
        let fecha_str = now.format(FECHA_FORMAT).to_string();
        let block = format!(
            "{sep}\nFecha: {fecha}\nNombre: {nombre}\nEmail: {email}\nMensaje: {mensaje}\n{sep}\n",
            sep = SEPARATOR,
            fecha = fecha_str,
            nombre = inquiry.nombre,
            email = inquiry.email,
            mensaje = inquiry.mensaje,
        );

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(block.as_bytes()).await?;
        file.flush().await?;

        *count += 1;
        // The file keeps minute precision only; return the truncated instant
        // so a later list() yields an equal record.
        let fecha = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now)
            .with_timezone(&Utc);
        Ok(ContactInquiry {
            id: *count as i64,
            nombre: inquiry.nombre,
            email: inquiry.email,
            mensaje: inquiry.mensaje,
            fecha,
        })
    }

    async fn list(&self) -> Result<Vec<ContactInquiry>, PersistenceError> {
        let _guard = self.state.lock().await;
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut records: Vec<ContactInquiry> = parse_blocks(&content)
            .into_iter()
            .enumerate()
            .map(|(i, b)| b.into_inquiry(i as i64 + 1))
            .collect();
        // File order is append order (oldest first); the canonical listing
        // order is most-recent-first.
        records.reverse();
        Ok(records)
    }

    async fn count(&self) -> Result<u64, PersistenceError> {
        Ok(*self.state.lock().await)
    }
}

#[derive(Default)]
struct ParsedBlock {
    fecha: Option<String>,
    nombre: Option<String>,
    email: Option<String>,
    mensaje: Option<String>,
}

impl ParsedBlock {
    fn into_inquiry(self, id: i64) -> ContactInquiry {
        ContactInquiry {
            id,
            nombre: self.nombre.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            mensaje: self.mensaje.unwrap_or_default(),
            fecha: self
                .fecha
                .as_deref()
                .and_then(parse_fecha)
                .unwrap_or_else(|| Utc.timestamp_opt(0, 0).single().unwrap_or_default()),
        }
    }
}

fn parse_fecha(s: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), FECHA_FORMAT).ok()?;
    // Timestamps were written with the server's local clock.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses the separator-delimited log into blocks, file order.
///
/// A message line equal to the separator would close the block early; that
/// ambiguity is inherent to the legacy format and is accepted here.
fn parse_blocks(content: &str) -> Vec<ParsedBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<ParsedBlock> = None;

    for line in content.lines() {
        if line.trim_end() == SEPARATOR {
            match current.take() {
                Some(block) => blocks.push(block),
                None => current = Some(ParsedBlock::default()),
            }
            continue;
        }
        let Some(block) = current.as_mut() else {
            continue;
        };
        if let Some(rest) = line.strip_prefix("Fecha: ") {
            block.fecha = Some(rest.to_string());
        } else if let Some(rest) = line.strip_prefix("Nombre: ") {
            block.nombre = Some(rest.to_string());
        } else if let Some(rest) = line.strip_prefix("Email: ") {
            block.email = Some(rest.to_string());
        } else if let Some(rest) = line.strip_prefix("Mensaje: ") {
            block.mensaje = Some(rest.to_string());
        } else if let Some(mensaje) = block.mensaje.as_mut() {
            // Continuation line of a multi-line message.
            mensaje.push('\n');
            mensaje.push_str(line);
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn inquiry(n: u32) -> NewInquiry {
        NewInquiry {
            nombre: format!("Persona {n}"),
            email: format!("persona{n}@agrotrack.com"),
            mensaje: format!("Consulta numero {n}"),
        }
    }

    #[tokio::test]
    async fn append_then_list_round_trips_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileContactStore::open(dir.path().join("consultas.txt"))
            .await
            .unwrap();

        let persisted = store.append(inquiry(1)).await.unwrap();
        assert_eq!(persisted.id, 1);

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].nombre, "Persona 1");
        assert_eq!(listed[0].email, "persona1@agrotrack.com");
        assert_eq!(listed[0].mensaje, "Consulta numero 1");
        assert_eq!(listed[0].fecha, persisted.fecha);
    }

    #[tokio::test]
    async fn missing_file_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileContactStore::open(dir.path().join("consultas.txt"))
            .await
            .unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileContactStore::open(dir.path().join("consultas.txt"))
            .await
            .unwrap();
        for n in 1..=3 {
            store.append(inquiry(n)).await.unwrap();
        }
        let listed = store.list().await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn multiline_message_survives_the_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileContactStore::open(dir.path().join("consultas.txt"))
            .await
            .unwrap();
        store
            .append(NewInquiry {
                nombre: "Ana".into(),
                email: "ana@x.com".into(),
                mensaje: "primera linea\nsegunda linea".into(),
            })
            .await
            .unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].mensaje, "primera linea\nsegunda linea");
    }

    #[tokio::test]
    async fn reopening_continues_id_assignment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("consultas.txt");
        {
            let store = FileContactStore::open(&path).await.unwrap();
            store.append(inquiry(1)).await.unwrap();
            store.append(inquiry(2)).await.unwrap();
        }
        let store = FileContactStore::open(&path).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
        let persisted = store.append(inquiry(3)).await.unwrap();
        assert_eq!(persisted.id, 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_do_not_corrupt_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(
            FileContactStore::open(dir.path().join("consultas.txt"))
                .await
                .unwrap(),
        );

        let mut handles = Vec::new();
        for n in 1..=16u32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.append(inquiry(n)).await.unwrap()
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16, "ids must be pairwise distinct");

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 16);
        for record in &listed {
            // Every block parsed back whole: fields belong to the same n.
            let n: u32 = record
                .nombre
                .strip_prefix("Persona ")
                .and_then(|s| s.parse().ok())
                .expect("uncorrupted nombre");
            assert_eq!(record.email, format!("persona{n}@agrotrack.com"));
            assert_eq!(record.mensaje, format!("Consulta numero {n}"));
        }
    }
}
