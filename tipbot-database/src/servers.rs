use sqlx::FromRow;

use crate::Database;

/// Prefix used where a guild has no stored settings.
pub const DEFAULT_PREFIX: &str = ".";

#[derive(Clone, Debug, Eq, FromRow, PartialEq)]
pub struct ServerInfo {
    pub guild_id: i64,
    pub prefix: String,
    pub enable_trade: bool,
    pub enable_find: bool,
}

impl ServerInfo {
    /// Settings for a guild that was never configured.
    pub fn unconfigured(guild_id: u64) -> Self {
        Self {
            guild_id: guild_id as i64,
            prefix: DEFAULT_PREFIX.to_owned(),
            enable_trade: false,
            enable_find: true,
        }
    }
}

pub async fn server_info(db: &Database, guild_id: u64) -> sqlx::Result<Option<ServerInfo>> {
    sqlx::query_as::<_, ServerInfo>(
        "SELECT guild_id, prefix, enable_trade, enable_find FROM discord_servers WHERE guild_id = $1",
    )
    .bind(guild_id as i64)
    .fetch_optional(db.pool())
    .await
}

/// Prefix configured for a guild; DMs and unknown guilds use the default.
pub async fn guild_prefix(db: &Database, guild_id: Option<u64>) -> sqlx::Result<String> {
    let Some(guild_id) = guild_id else {
        return Ok(DEFAULT_PREFIX.to_owned());
    };

    Ok(server_info(db, guild_id)
        .await?
        .map_or_else(|| DEFAULT_PREFIX.to_owned(), |info| info.prefix))
}
