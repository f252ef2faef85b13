//! `tool emoji`: react to the posted embed to see an emoji's raw value.

use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;
use twilight_model::{
    channel::message::embed::Embed,
    gateway::payload::incoming::MessageCreate,
    id::{Id, marker::UserMarker},
};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder};

use tipbot_core::Context;
use tipbot_utils::{
    embed::DEFAULT_EMBED_COLOR,
    reactions::{
        EMOJI_ALARMCLOCK, EMOJI_OK_BOX, ReactionEmoji, ReactionEvents, StandbyReactions,
        add_reaction,
    },
};

const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

pub(super) fn emoji_info_embed(
    author_id: Id<UserMarker>,
    emoji: Option<&ReactionEmoji>,
) -> anyhow::Result<Embed> {
    let field = match emoji {
        Some(emoji) => EmbedFieldBuilder::new(format!("EMOJI {emoji}"), format!("`{}`", emoji.describe())),
        None => EmbedFieldBuilder::new("EMOJI", "None"),
    };

    let embed = EmbedBuilder::new()
        .title("EMOJI INFO")
        .description(format!("<@{author_id}>, Re-act and getinfo"))
        .color(DEFAULT_EMBED_COLOR)
        .field(field.inline())
        .footer(EmbedFooterBuilder::new("Timeout: 60s"))
        .validate()?
        .build();

    Ok(embed)
}

pub(super) async fn run(ctx: &Context, msg: &MessageCreate) -> anyhow::Result<()> {
    let http = &ctx.http;
    let author_id = msg.author.id;

    let embed = emoji_info_embed(author_id, None)?;
    let info = http
        .create_message(msg.channel_id)
        .embeds(&[embed])
        .await?
        .model()
        .await?;

    let mut events = StandbyReactions::added(&ctx.standby, info.id);

    loop {
        let event = match timeout(IDLE_TIMEOUT, events.next_event()).await {
            Ok(Some(event)) => event,
            Ok(None) => return Ok(()),
            Err(_elapsed) => {
                add_reaction(http, msg.channel_id, msg.id, EMOJI_ALARMCLOCK).await;
                if let Err(source) = http.delete_message(msg.channel_id, info.id).await {
                    debug!(?source, "emoji info message already gone");
                }
                return Ok(());
            }
        };

        if event.user_id != author_id {
            continue;
        }
        if event.emoji.is(EMOJI_OK_BOX) {
            return Ok(());
        }

        let embed = emoji_info_embed(author_id, Some(&event.emoji))?;
        http.update_message(msg.channel_id, info.id)
            .embeds(Some(&[embed]))
            .await?;
        add_reaction(http, msg.channel_id, info.id, EMOJI_OK_BOX).await;
    }
}
