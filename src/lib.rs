pub mod anuncios;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod plans;
pub mod profile;
pub mod session;
pub mod validation;

pub use db::DbPool;
pub use error::Error;

use config::Config;
use session::SessionStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Everything an embedding front-end needs: the configuration it was opened
/// with, the store pool and the session slot. One per device process.
pub struct AppState {
    pub config: Config,
    pub db: DbPool,
    pub session: SessionStore,
}

impl AppState {
    /// Open the store and the session slot under the configured data
    /// directory. Safe to call on every process start; schema creation and
    /// migration happen here.
    pub async fn init(config: Config) -> Result<Self, Error> {
        let db = db::init(&config.storage.data_dir).await?;
        let session = SessionStore::open(&config.storage.data_dir)?;
        Ok(Self {
            config,
            db,
            session,
        })
    }
}

/// Install the global tracing subscriber. Embedding applications call this
/// once at startup; RUST_LOG overrides the configured level.
pub fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
