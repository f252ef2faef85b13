//! `tool find`: help document lookup with number-reaction result picking.

use std::{sync::OnceLock, time::Duration};

use chrono::Utc;
use regex::Regex;
use tokio::time::timeout;
use twilight_model::{
    channel::message::embed::Embed, gateway::payload::incoming::MessageCreate, util::Timestamp,
};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder};

use tipbot_core::Context;
use tipbot_database::{
    help_docs::{ANY_SECTION, HelpDoc, help_doc, search_help_docs},
    servers::{ServerInfo, server_info},
};
use tipbot_utils::{
    embed::DEFAULT_EMBED_COLOR,
    reactions::{
        EMOJI_ERROR, EMOJI_INFORMATION, EMOJI_LOCKED, EMOJI_OK_BOX, EMOJI_OK_HAND, EMOJI_RED_NO,
        NUMBER_EMOJIS, ReactionEvents, StandbyReactions, add_reaction,
    },
};

use super::reply_to;

const MAX_QUERY_LEN: usize = 100;
const SEARCH_LIMIT: i64 = 5;
const SELECTION_IDLE_TIMEOUT: Duration = Duration::from_secs(60);
const FIELD_TEXT_LIMIT: usize = 1000;
const OTHER_LINKS: &str = "[Invite TipBot](http://invite.discord.bot.tips) / [Support Server](https://discord.com/invite/GpHzURM) / [TipBot Github](https://github.com/wrkzcoin/TipBot)";

fn query_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_ \-]+$").expect("find query pattern is valid"))
}

/// Result of validating a find request, in the order the checks apply.
#[derive(Debug, Eq, PartialEq)]
enum QueryCheck {
    BotRejected,
    Locked,
    InvalidText,
    Disabled,
    TooLong,
    NotAscii,
    Search,
}

fn check_query(author_is_bot: bool, hidden_guild: bool, find_enabled: bool, text: &str) -> QueryCheck {
    if author_is_bot {
        QueryCheck::BotRejected
    } else if hidden_guild {
        QueryCheck::Locked
    } else if !query_pattern().is_match(text) {
        QueryCheck::InvalidText
    } else if !find_enabled {
        QueryCheck::Disabled
    } else if text.len() >= MAX_QUERY_LEN {
        QueryCheck::TooLong
    } else if !text.is_ascii() {
        QueryCheck::NotAscii
    } else {
        QueryCheck::Search
    }
}

fn code_block(text: &str, prefix: &str) -> String {
    let text = text.replace("prefix", prefix);
    let clipped: String = text.chars().take(FIELD_TEXT_LIMIT).collect();
    format!("```{clipped}```")
}

/// Result embed; `position` is `(index, total)` when picking among several results.
fn find_embed(
    query: &str,
    doc: &HelpDoc,
    prefix: &str,
    requested_by: &str,
    position: Option<(usize, usize)>,
) -> anyhow::Result<Embed> {
    let title = match position {
        Some((index, total)) => format!("TipBot Find {}/{}", index + 1, total),
        None => "TipBot Find".to_owned(),
    };

    let mut builder = EmbedBuilder::new()
        .title(title)
        .description(format!("`{query}`"))
        .color(DEFAULT_EMBED_COLOR)
        .timestamp(Timestamp::from_secs(Utc::now().timestamp())?)
        .field(EmbedFieldBuilder::new("Title", code_block(&doc.what, prefix)))
        .field(EmbedFieldBuilder::new("Content", code_block(&doc.detail, prefix)));

    if let Some(example) = doc.example() {
        builder = builder.field(EmbedFieldBuilder::new("More", code_block(example, prefix)));
    }

    Ok(builder
        .field(EmbedFieldBuilder::new("OTHER LINKS", OTHER_LINKS))
        .footer(EmbedFooterBuilder::new(format!("Find requested by {requested_by}")))
        .validate()?
        .build())
}

pub(super) async fn run(
    ctx: &Context,
    msg: &MessageCreate,
    prefix: &str,
    text: &str,
) -> anyhow::Result<()> {
    let http = &ctx.http;
    let mention = format!("<@{}>", msg.author.id);

    let find_enabled = match msg.guild_id {
        Some(guild_id) => server_info(&ctx.db, guild_id.get())
            .await?
            .unwrap_or_else(|| ServerInfo::unconfigured(guild_id.get()))
            .enable_find,
        None => true,
    };
    let hidden = ctx.settings.is_hidden_guild(msg.guild_id);

    match check_query(msg.author.bot, hidden, find_enabled, text) {
        QueryCheck::Search => {}
        QueryCheck::Disabled => return Ok(()),
        QueryCheck::Locked => {
            add_reaction(http, msg.channel_id, msg.id, EMOJI_LOCKED).await;
            return Ok(());
        }
        QueryCheck::BotRejected => {
            add_reaction(http, msg.channel_id, msg.id, EMOJI_ERROR).await;
            let out = format!("{EMOJI_RED_NO} {mention} Bot is not allowed using this.");
            return reply_to(ctx, msg, &out).await;
        }
        QueryCheck::InvalidText => {
            let out = format!("{EMOJI_ERROR} {mention} Invalid help searching text **{text}**.");
            reply_to(ctx, msg, &out).await?;
            add_reaction(http, msg.channel_id, msg.id, EMOJI_ERROR).await;
            return Ok(());
        }
        QueryCheck::TooLong => {
            add_reaction(http, msg.channel_id, msg.id, EMOJI_ERROR).await;
            return reply_to(ctx, msg, &format!("{mention} Searched text is too long.")).await;
        }
        QueryCheck::NotAscii => {
            add_reaction(http, msg.channel_id, msg.id, EMOJI_ERROR).await;
            return reply_to(ctx, msg, &format!("{mention} **{text}** is not valid text.")).await;
        }
    }

    if let Err(source) = http.create_typing_trigger(msg.channel_id).await {
        tracing::warn!(?source, "failed to trigger typing");
    }

    let results = match help_doc(&ctx.db, ANY_SECTION, text).await? {
        Some(doc) => vec![doc],
        None => search_help_docs(&ctx.db, text, SEARCH_LIMIT).await?,
    };

    let Some(first) = results.first() else {
        add_reaction(http, msg.channel_id, msg.id, EMOJI_INFORMATION).await;
        let out = format!("{mention} Searching.. **{text}** and has no result.");
        return reply_to(ctx, msg, &out).await;
    };

    let requested_by = &msg.author.name;
    let embed = find_embed(text, first, prefix, requested_by, None)?;
    let sent = http
        .create_message(msg.channel_id)
        .embeds(&[embed])
        .reply(msg.id)
        .await?
        .model()
        .await?;
    add_reaction(http, msg.channel_id, sent.id, EMOJI_OK_BOX).await;
    add_reaction(http, msg.channel_id, msg.id, EMOJI_OK_HAND).await;

    if results.len() < 2 {
        return Ok(());
    }

    let mut events = StandbyReactions::added_or_removed(&ctx.standby, sent.id);
    let choices = &NUMBER_EMOJIS[..results.len()];
    for choice in choices {
        add_reaction(http, msg.channel_id, sent.id, choice).await;
    }

    // Adding and removing a number both select it.
    while let Ok(Some(event)) = timeout(SELECTION_IDLE_TIMEOUT, events.next_event()).await {
        if event.user_id != msg.author.id {
            continue;
        }
        let Some(index) = event.emoji.position_in(choices) else {
            continue;
        };
        let Some(doc) = results.get(index) else {
            continue;
        };

        let embed = find_embed(text, doc, prefix, requested_by, Some((index, results.len())))?;
        http.update_message(msg.channel_id, sent.id)
            .embeds(Some(&[embed]))
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(example: Option<&str>) -> HelpDoc {
        HelpDoc {
            what: "prefixtip".to_owned(),
            detail: "Use prefixtip <amount> <coin> @user".to_owned(),
            example: example.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn checks_apply_in_order() {
        assert_eq!(check_query(true, true, false, "ÿ"), QueryCheck::BotRejected);
        assert_eq!(check_query(false, true, true, "tip"), QueryCheck::Locked);
        assert_eq!(check_query(false, false, false, "tip?"), QueryCheck::InvalidText);
        assert_eq!(check_query(false, false, false, "tip"), QueryCheck::Disabled);
        assert_eq!(
            check_query(false, false, true, &"a".repeat(MAX_QUERY_LEN)),
            QueryCheck::TooLong
        );
        assert_eq!(check_query(false, false, true, "how to tip"), QueryCheck::Search);
        assert_eq!(check_query(false, false, true, "user_name-1"), QueryCheck::Search);
        assert_eq!(check_query(false, false, true, "héllo"), QueryCheck::InvalidText);
    }

    #[test]
    fn unconfigured_guilds_may_search() {
        let unconfigured = ServerInfo::unconfigured(1);
        assert_eq!(
            check_query(false, false, unconfigured.enable_find, "deposit"),
            QueryCheck::Search
        );
    }

    #[test]
    fn result_embed_replaces_prefix() -> anyhow::Result<()> {
        let embed = find_embed("tip", &doc(Some("prefixtip 10 WRKZ @bob")), "$", "alice", None)?;

        assert_eq!(embed.title.as_deref(), Some("TipBot Find"));
        assert_eq!(embed.description.as_deref(), Some("`tip`"));
        let names: Vec<_> = embed.fields.iter().map(|field| field.name.as_str()).collect();
        assert_eq!(names, ["Title", "Content", "More", "OTHER LINKS"]);
        assert_eq!(embed.fields[0].value, "```$tip```");
        assert_eq!(embed.fields[2].value, "```$tip 10 WRKZ @bob```");
        assert_eq!(
            embed.footer.map(|footer| footer.text).as_deref(),
            Some("Find requested by alice")
        );
        Ok(())
    }

    #[test]
    fn selection_title_counts_from_one() -> anyhow::Result<()> {
        let embed = find_embed("tip", &doc(None), ".", "alice", Some((0, 3)))?;
        assert_eq!(embed.title.as_deref(), Some("TipBot Find 1/3"));
        assert_eq!(embed.fields.len(), 3);

        let embed = find_embed("tip", &doc(Some("  ")), ".", "alice", Some((2, 3)))?;
        assert_eq!(embed.title.as_deref(), Some("TipBot Find 3/3"));
        assert_eq!(embed.fields.len(), 3);
        Ok(())
    }
}
