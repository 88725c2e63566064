pub mod error;
pub mod middleware;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod auth;
    pub mod contactos;
    pub mod health;
}

pub use error::AppError;
pub use router::{create_router, ApiDoc};
pub use types::AppState;
