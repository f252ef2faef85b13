use std::sync::Arc;

use tipbot_database::Database;
use twilight_http::Client;
use twilight_standby::Standby;

/// Coin table lookups.
pub mod coins;
/// Environment-backed runtime settings.
pub mod config;
/// Translation and text-to-speech backends.
pub mod speech;

pub use coins::{CoinFamily, CoinInfo, CoinRegistry, CoinTable};
pub use config::Settings;
pub use speech::SpeechBackend;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub standby: Arc<Standby>,
    pub db: Database,
    pub coins: Arc<dyn CoinRegistry>,
    pub speech: Arc<dyn SpeechBackend>,
    pub settings: Arc<Settings>,
}

impl Context {
    /// Create a new application context.
    pub fn new(
        http: Arc<Client>,
        standby: Arc<Standby>,
        db: Database,
        coins: Arc<dyn CoinRegistry>,
        speech: Arc<dyn SpeechBackend>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            http,
            standby,
            db,
            coins,
            speech,
            settings,
        }
    }
}
