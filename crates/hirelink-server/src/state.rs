use hirelink_core::LocationRegistry;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared per-process state, handed to request handlers by the router.
///
/// The registry is immutable after startup; concurrent reads need no
/// locking. The pool is cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub registry: Arc<LocationRegistry>,
}
