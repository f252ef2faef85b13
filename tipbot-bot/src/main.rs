use std::sync::Arc;

use anyhow::Context as _;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;
use twilight_standby::Standby;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use tipbot_commands::handle_message;
use tipbot_core::{CoinTable, Context, Settings, speech::HttpSpeechBackend};
use tipbot_database::{Database, MIGRATOR};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load the .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    let settings = Arc::new(Settings::from_env()?);

    let coins = CoinTable::load(&settings.coin_config)
        .with_context(|| format!("loading {}", settings.coin_config.display()))?;
    info!(coins = coins.len(), "coin table loaded.");

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(settings.discord_token.clone()));
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await?;
    MIGRATOR.run(&db_pool).await?;
    info!("PostgreSQL connection established.");

    let standby = Arc::new(Standby::new());
    let speech = HttpSpeechBackend::new(
        settings.translate_api_url.clone(),
        settings.tts_api_url.clone(),
    );
    let ctx = Context::new(
        Arc::clone(&http),
        Arc::clone(&standby),
        Database::new(db_pool),
        Arc::new(coins),
        Arc::new(speech),
        Arc::clone(&settings),
    );

    // Reactions drive paginated embeds and the emoji and find pickers
    let intents = Intents::GUILDS
        | Intents::GUILD_MESSAGES
        | Intents::MESSAGE_CONTENT
        | Intents::GUILD_MESSAGE_REACTIONS
        | Intents::DIRECT_MESSAGES
        | Intents::DIRECT_MESSAGE_REACTIONS;

    let mut shard = Shard::new(ShardId::new(0, 1), settings.discord_token.clone(), intents);

    info!("TipBot is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        // Wake any reaction waits before dispatching
        standby.process(&event);

        match event {
            Event::Ready(_) => {
                info!("TipBot is ready.");
            }
            Event::MessageCreate(msg) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_message(ctx, msg).await {
                        error!(?source, "command handler failed");
                    }
                });
            }
            _ => {}
        }
    }

    Ok(())
}
