//! Best-effort seed-data population for the contacts table.
//!
//! Runs once at V2 startup, before the listener binds. Tops the store up to a
//! floor of synthetic inquiries without ever inserting past a ceiling, so a
//! demo database always has data but repeated restarts never flood it.
//! Seeding is a convenience, not a correctness path: every failure is logged
//! and swallowed, and the server starts regardless.

use crate::domain::NewInquiry;
use crate::storage::ContactStore;

struct SeedContact {
    nombre: &'static str,
    email: &'static str,
    mensaje: &'static str,
}

/// Fixed template pool; cycled when more records are needed than templates.
const SEED_POOL: &[SeedContact] = &[
    SeedContact {
        nombre: "Juan Pérez",
        email: "juan.perez@agrotrack.com",
        mensaje: "Consulta sobre disponibilidad de sensores de humedad.",
    },
    SeedContact {
        nombre: "María García",
        email: "maria.garcia@agrotrack.com",
        mensaje: "Necesito soporte para la plataforma de monitoreo.",
    },
    SeedContact {
        nombre: "Carlos López",
        email: "carlos.lopez@agrotrack.com",
        mensaje: "Requerimos información sobre nuevas semillas certificadas.",
    },
    SeedContact {
        nombre: "Ana Fernández",
        email: "ana.fernandez@agrotrack.com",
        mensaje: "Solicitud de capacitación para el equipo técnico.",
    },
    SeedContact {
        nombre: "Luis González",
        email: "luis.gonzalez@agrotrack.com",
        mensaje: "Consulta sobre mantenimiento preventivo de maquinaria.",
    },
    SeedContact {
        nombre: "Laura Torres",
        email: "laura.torres@agrotrack.com",
        mensaje: "Necesitamos cotización para fertilizantes orgánicos.",
    },
    SeedContact {
        nombre: "Diego Ruiz",
        email: "diego.ruiz@agrotrack.com",
        mensaje: "Reporte de incidencias en el módulo de reportes.",
    },
    SeedContact {
        nombre: "Sofía Castro",
        email: "sofia.castro@agrotrack.com",
        mensaje: "Solicitud de acceso a dashboards personalizados.",
    },
    SeedContact {
        nombre: "Matías Herrera",
        email: "matias.herrera@agrotrack.com",
        mensaje: "Revisión de contratos con proveedores locales.",
    },
    SeedContact {
        nombre: "Paula Vega",
        email: "paula.vega@agrotrack.com",
        mensaje: "Preguntas sobre el módulo de logística.",
    },
    SeedContact {
        nombre: "Andrés Romero",
        email: "andres.romero@agrotrack.com",
        mensaje: "Solicitud de datos históricos de producción.",
    },
    SeedContact {
        nombre: "Camila Navarro",
        email: "camila.navarro@agrotrack.com",
        mensaje: "Consulta sobre integraciones con sistemas externos.",
    },
    SeedContact {
        nombre: "Ignacio Díaz",
        email: "ignacio.diaz@agrotrack.com",
        mensaje: "Requerimos auditoría de seguridad en la red.",
    },
    SeedContact {
        nombre: "Julieta Ramos",
        email: "julieta.ramos@agrotrack.com",
        mensaje: "Coordinar visita técnica al predio experimental.",
    },
    SeedContact {
        nombre: "Valentín Castro",
        email: "valentin.castro@agrotrack.com",
        mensaje: "Solicitud de actualización de firmware en sensores.",
    },
    SeedContact {
        nombre: "Florencia Silva",
        email: "florencia.silva@agrotrack.com",
        mensaje: "Dudas sobre la política de privacidad de datos.",
    },
    SeedContact {
        nombre: "Sebastián Méndez",
        email: "sebastian.mendez@agrotrack.com",
        mensaje: "Coordinación de pruebas de campo con nuevos cultivos.",
    },
    SeedContact {
        nombre: "Lucía Ortega",
        email: "lucia.ortega@agrotrack.com",
        mensaje: "Solicita soporte para el módulo de inventario.",
    },
    SeedContact {
        nombre: "Federico Cabrera",
        email: "federico.cabrera@agrotrack.com",
        mensaje: "Requerimos documentación técnica de la API.",
    },
    SeedContact {
        nombre: "Bianca Flores",
        email: "bianca.flores@agrotrack.com",
        mensaje: "Interesada en participar del programa piloto de IoT.",
    },
    SeedContact {
        nombre: "Tomás Medina",
        email: "tomas.medina@agrotrack.com",
        mensaje: "Consulta sobre dashboards para la gerencia.",
    },
    SeedContact {
        nombre: "Martina Suárez",
        email: "martina.suarez@agrotrack.com",
        mensaje: "Necesitamos soporte para usuarios móviles.",
    },
    SeedContact {
        nombre: "Franco Arias",
        email: "franco.arias@agrotrack.com",
        mensaje: "Revisión de métricas de eficiencia energética.",
    },
    SeedContact {
        nombre: "Constanza Molina",
        email: "constanza.molina@agrotrack.com",
        mensaje: "Solicitud de pruebas controladas con drones.",
    },
];

/// Builds the nth synthetic inquiry (`suffix` is 1-based over the store's
/// lifetime). The suffix goes into the name and into the email's local part
/// so generated emails stay pairwise distinct.
fn synthetic_inquiry(template: &SeedContact, suffix: u64) -> NewInquiry {
    NewInquiry {
        nombre: format!("{} {}", template.nombre, suffix),
        email: template.email.replacen('@', &format!("+{suffix}@"), 1),
        mensaje: template.mensaje.to_string(),
    }
}

/// Tops the store up to `floor` records, never inserting past `ceiling`.
///
/// Returns true iff anything was inserted. Persistence errors abort seeding,
/// are logged at warn level and swallowed: a failed seed must never prevent
/// the server from starting.
pub async fn ensure_minimum_population(
    store: &dyn ContactStore,
    floor: u64,
    ceiling: u64,
) -> bool {
    let floor = floor.min(ceiling);

    let total = match store.count().await {
        Ok(total) => total,
        Err(e) => {
            tracing::warn!(error = %e, "seeding skipped: could not count contacts");
            return false;
        }
    };

    if total >= ceiling {
        tracing::info!(
            total,
            ceiling,
            "contacts already at or above the ceiling, no seed data added"
        );
        return false;
    }
    if total >= floor {
        return false;
    }

    let needed = (floor - total).min(ceiling - total);
    for i in 0..needed {
        let template = &SEED_POOL[(i % SEED_POOL.len() as u64) as usize];
        let inquiry = synthetic_inquiry(template, total + i + 1);
        if let Err(e) = store.append(inquiry).await {
            tracing::warn!(error = %e, inserted = i, "seeding aborted on persistence error");
            return i > 0;
        }
    }

    tracing::info!(inserted = needed, total = total + needed, "seed contacts inserted");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryContactStore;
    use std::collections::HashSet;

    #[tokio::test]
    async fn empty_store_is_topped_up_to_the_floor_with_distinct_emails() {
        let store = MemoryContactStore::new();
        assert!(ensure_minimum_population(&store, 20, 100).await);
        assert_eq!(store.count().await.unwrap(), 20);

        let emails: HashSet<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.email)
            .collect();
        assert_eq!(emails.len(), 20, "seeded emails must be pairwise distinct");
    }

    #[tokio::test]
    async fn second_run_at_or_above_the_floor_is_a_no_op() {
        let store = MemoryContactStore::new();
        assert!(ensure_minimum_population(&store, 20, 100).await);
        assert!(!ensure_minimum_population(&store, 20, 100).await);
        assert_eq!(store.count().await.unwrap(), 20);
    }

    #[tokio::test]
    async fn repeated_runs_never_exceed_the_ceiling() {
        let store = MemoryContactStore::new();
        for _ in 0..5 {
            ensure_minimum_population(&store, 20, 100).await;
            assert!(store.count().await.unwrap() <= 100);
        }
        assert_eq!(store.count().await.unwrap(), 20);
    }

    #[tokio::test]
    async fn ceiling_caps_a_floor_that_overshoots() {
        let store = MemoryContactStore::new();
        // 95 pre-existing records, floor above the ceiling: clamp to 100.
        for n in 0..95 {
            let template = &SEED_POOL[n % SEED_POOL.len()];
            store
                .append(synthetic_inquiry(template, 1000 + n as u64))
                .await
                .unwrap();
        }
        assert!(ensure_minimum_population(&store, 200, 100).await);
        assert_eq!(store.count().await.unwrap(), 100);
    }

    #[tokio::test]
    async fn store_at_the_ceiling_is_left_alone() {
        let store = MemoryContactStore::new();
        for n in 0..100 {
            let template = &SEED_POOL[n % SEED_POOL.len()];
            store
                .append(synthetic_inquiry(template, n as u64 + 1))
                .await
                .unwrap();
        }
        assert!(!ensure_minimum_population(&store, 200, 100).await);
        assert_eq!(store.count().await.unwrap(), 100);
    }

    #[tokio::test]
    async fn persistence_errors_are_swallowed() {
        let store = MemoryContactStore::new();
        store.set_failing(true);
        assert!(!ensure_minimum_population(&store, 20, 100).await);
        store.set_failing(false);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn suffix_lands_in_name_and_email_local_part() {
        let inquiry = synthetic_inquiry(&SEED_POOL[0], 7);
        assert_eq!(inquiry.nombre, "Juan Pérez 7");
        assert_eq!(inquiry.email, "juan.perez+7@agrotrack.com");
    }
}
