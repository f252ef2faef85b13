use std::{env, path::PathBuf};

use thiserror::Error;
use twilight_model::id::{Id, marker::GuildMarker};

const DEFAULT_COIN_CONFIG: &str = "coins.toml";
const DEFAULT_TTS_SAVED_PATH: &str = "tts";
const DEFAULT_LANGUAGE_CODES_URL: &str = "https://tipbot-static.wrkz.work/language_codes.txt";
const DEFAULT_BOT_SERVER: &str = "DISCORD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Runtime settings read once at startup.
#[derive(Clone, Debug)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    /// TOML file with the `[[coins]]` table.
    pub coin_config: PathBuf,
    /// Directory generated speech files are written to.
    pub tts_saved_path: PathBuf,
    pub translate_api_url: Option<String>,
    pub tts_api_url: Option<String>,
    /// `tool` commands only run in this guild when set.
    pub tool_guild_id: Option<Id<GuildMarker>>,
    /// Guild where the coin list and `tool find` are disabled.
    pub coininfo_hidden_guild_id: Option<Id<GuildMarker>>,
    pub language_codes_url: String,
    /// Label stored with audit rows.
    pub bot_server: String,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            discord_token: require("DISCORD_TOKEN")?,
            database_url: require("DATABASE_URL")?,
            coin_config: get("COIN_CONFIG")
                .unwrap_or_else(|| DEFAULT_COIN_CONFIG.to_owned())
                .into(),
            tts_saved_path: get("TTS_SAVED_PATH")
                .unwrap_or_else(|| DEFAULT_TTS_SAVED_PATH.to_owned())
                .into(),
            translate_api_url: get("TRANSLATE_API_URL"),
            tts_api_url: get("TTS_API_URL"),
            tool_guild_id: parse_guild_id("TOOL_GUILD_ID", get("TOOL_GUILD_ID"))?,
            coininfo_hidden_guild_id: parse_guild_id(
                "COININFO_HIDDEN_GUILD_ID",
                get("COININFO_HIDDEN_GUILD_ID"),
            )?,
            language_codes_url: get("LANGUAGE_CODES_URL")
                .unwrap_or_else(|| DEFAULT_LANGUAGE_CODES_URL.to_owned()),
            bot_server: get("BOT_SERVER").unwrap_or_else(|| DEFAULT_BOT_SERVER.to_owned()),
        })
    }

    /// Whether `guild_id` is the guild that hides the coin list.
    pub fn is_hidden_guild(&self, guild_id: Option<Id<GuildMarker>>) -> bool {
        guild_id.is_some() && guild_id == self.coininfo_hidden_guild_id
    }
}

fn parse_guild_id(
    key: &'static str,
    raw: Option<String>,
) -> Result<Option<Id<GuildMarker>>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    raw.trim()
        .parse::<u64>()
        .ok()
        .and_then(Id::new_checked)
        .map(Some)
        .ok_or_else(|| ConfigError::Invalid {
            key,
            reason: format!("`{raw}` is not a guild id"),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_fill_optional_values() {
        let settings = settings(&[("DISCORD_TOKEN", "t"), ("DATABASE_URL", "postgres://x")])
            .expect("settings load");

        assert_eq!(settings.coin_config, PathBuf::from("coins.toml"));
        assert_eq!(settings.bot_server, "DISCORD");
        assert!(settings.tool_guild_id.is_none());
        assert!(settings.translate_api_url.is_none());
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = settings(&[("DATABASE_URL", "postgres://x")]).expect_err("token required");
        assert!(matches!(err, ConfigError::Missing("DISCORD_TOKEN")));
    }

    #[test]
    fn guild_ids_are_validated() {
        let settings_ok = settings(&[
            ("DISCORD_TOKEN", "t"),
            ("DATABASE_URL", "postgres://x"),
            ("TOOL_GUILD_ID", "460755304863498250"),
        ])
        .expect("settings load");
        assert_eq!(settings_ok.tool_guild_id, Some(Id::new(460755304863498250)));
        assert!(!settings_ok.is_hidden_guild(None));

        let err = settings(&[
            ("DISCORD_TOKEN", "t"),
            ("DATABASE_URL", "postgres://x"),
            ("TOOL_GUILD_ID", "guild"),
        ])
        .expect_err("bad guild id");
        assert!(matches!(err, ConfigError::Invalid { key: "TOOL_GUILD_ID", .. }));
    }
}
