use sqlx::{PgPool, migrate::Migrator};

/// Compile-time discovered SQLx migrations for the `tipbot-database` crate.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Shared database handle passed across crates.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a database handle from an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Expose the underlying pool for query modules.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Last seen daemon height per coin, written by the chain watchers.
pub mod heights;
/// Help documents searched by `tool find`.
pub mod help_docs;
/// Per-guild settings.
pub mod servers;
/// Rolling trade volume per coin.
pub mod trades;
/// Audit log of text-to-speech and translation requests.
pub mod tts_log;
