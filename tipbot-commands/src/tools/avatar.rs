use tracing::debug;
use twilight_model::{
    gateway::payload::incoming::MessageCreate,
    id::{
        Id,
        marker::{GuildMarker, UserMarker},
    },
    util::ImageHash,
};

use tipbot_core::Context;
use tipbot_utils::{
    parse::parse_target_user_id,
    reactions::{EMOJI_OK_BOX, EMOJI_ZIPPED_MOUTH, add_reaction},
};

const CDN: &str = "https://cdn.discordapp.com";

fn extension(hash: &ImageHash) -> &'static str {
    if hash.is_animated() { "gif" } else { "png" }
}

/// URL of the avatar Discord shows for a user: guild avatar first, then the
/// user avatar, then the default avatar.
pub(super) fn display_avatar_url(
    user_id: Id<UserMarker>,
    discriminator: u16,
    guild_id: Option<Id<GuildMarker>>,
    member_avatar: Option<&ImageHash>,
    user_avatar: Option<&ImageHash>,
) -> String {
    if let (Some(guild_id), Some(hash)) = (guild_id, member_avatar) {
        return format!(
            "{CDN}/guilds/{guild_id}/users/{user_id}/avatars/{hash}.{}?size=1024",
            extension(hash)
        );
    }

    if let Some(hash) = user_avatar {
        return format!("{CDN}/avatars/{user_id}/{hash}.{}?size=1024", extension(hash));
    }

    let index = if discriminator == 0 {
        (user_id.get() >> 22) % 6
    } else {
        u64::from(discriminator % 5)
    };
    format!("{CDN}/embed/avatars/{index}.png")
}

pub(super) async fn run(ctx: &Context, msg: &MessageCreate, target: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let user_id = target
        .and_then(parse_target_user_id)
        .unwrap_or(msg.author.id);

    let url = match avatar_url(ctx, msg, user_id).await {
        Ok(url) => url,
        Err(source) => {
            debug!(?source, user_id = user_id.get(), "avatar lookup failed");
            add_reaction(http, msg.channel_id, msg.id, EMOJI_ZIPPED_MOUTH).await;
            return Ok(());
        }
    };

    let out = format!("Avatar image for <@{user_id}>:\n{url}");
    match http.create_message(msg.channel_id).content(&out).await {
        Ok(response) => {
            let sent = response.model().await?;
            add_reaction(http, msg.channel_id, sent.id, EMOJI_OK_BOX).await;
        }
        Err(source) => {
            debug!(?source, "failed to send avatar");
            add_reaction(http, msg.channel_id, msg.id, EMOJI_ZIPPED_MOUTH).await;
        }
    }

    Ok(())
}

async fn avatar_url(
    ctx: &Context,
    msg: &MessageCreate,
    user_id: Id<UserMarker>,
) -> anyhow::Result<String> {
    let http = &ctx.http;

    if let Some(guild_id) = msg.guild_id {
        let member = http.guild_member(guild_id, user_id).await?.model().await?;
        return Ok(display_avatar_url(
            user_id,
            member.user.discriminator,
            Some(guild_id),
            member.avatar.as_ref(),
            member.user.avatar.as_ref(),
        ));
    }

    let user = http.user(user_id).await?.model().await?;
    Ok(display_avatar_url(
        user_id,
        user.discriminator,
        None,
        None,
        user.avatar.as_ref(),
    ))
}
