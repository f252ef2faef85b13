//! `tool <subcommand>`: conversion, speech, search and inspection helpers.

mod avatar;
mod convert;
mod emoji;
mod find;
mod speech;
mod when;

use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::{CommandMeta, author_mentions};
use tipbot_core::Context;
use tipbot_utils::{parse::split_first_word, reactions::add_reaction};

pub const META: CommandMeta = CommandMeta {
    name: "tool",
    aliases: &["tools"],
    desc: "Various tool commands.",
    category: "tool",
    usage: "tool <subcommand>",
};

const fn sub(
    name: &'static str,
    aliases: &'static [&'static str],
    desc: &'static str,
    usage: &'static str,
) -> CommandMeta {
    CommandMeta {
        name,
        aliases,
        desc,
        category: "tool",
        usage,
    }
}

/// `tool` subcommands, listed in the help catalog.
pub const SUBCOMMANDS: &[CommandMeta] = &[
    sub("avatar", &[], "Get avatar of a user.", "tool avatar [user]"),
    sub("prime", &[], "Check a given number if it is a prime number.", "tool prime <number>"),
    sub("dec2hex", &[], "Convert decimal to hex.", "tool dec2hex <param>"),
    sub("hex2dec", &[], "Convert hex to decimal.", "tool hex2dec <param>"),
    sub("hex2str", &["hex2ascii"], "Convert hex to string.", "tool hex2str <param>"),
    sub("str2hex", &["ascii2hex"], "Convert string to hex.", "tool str2hex <param>"),
    sub("emoji", &[], "Get emoji value by re-acting.", "tool emoji"),
    sub("trans", &["translate", "tran"], "Translate text and read it out.", "tool trans <to language> <text>"),
    sub("tts", &[], "Text to speech.", "tool tts <text>"),
    sub("ttskh", &[], "Text to speech in Khmer.", "tool ttskh <text>"),
    sub("ttscn", &[], "Text to speech in Chinese.", "tool ttscn <text>"),
    sub("find", &["search"], "Search something in TipBot.", "tool find <text>"),
    sub("when", &[], "Show the time a duration from now.", "tool when <duration>"),
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ToolCommand {
    Avatar,
    Prime,
    Dec2Hex,
    Hex2Dec,
    Hex2Str,
    Str2Hex,
    Emoji,
    Trans,
    Tts,
    TtsKhmer,
    TtsChinese,
    Find,
    When,
}

impl ToolCommand {
    fn parse(name: &str) -> Option<Self> {
        let meta = SUBCOMMANDS.iter().find(|meta| meta.answers_to(name))?;

        Some(match meta.name {
            "avatar" => Self::Avatar,
            "prime" => Self::Prime,
            "dec2hex" => Self::Dec2Hex,
            "hex2dec" => Self::Hex2Dec,
            "hex2str" => Self::Hex2Str,
            "str2hex" => Self::Str2Hex,
            "emoji" => Self::Emoji,
            "trans" => Self::Trans,
            "tts" => Self::Tts,
            "ttskh" => Self::TtsKhmer,
            "ttscn" => Self::TtsChinese,
            "find" => Self::Find,
            "when" => Self::When,
            _ => return None,
        })
    }

    /// Subcommands that cannot run without an argument.
    fn needs_argument(self) -> bool {
        !matches!(self, Self::Avatar | Self::Emoji)
    }
}

/// Reactions and text produced by a subcommand, applied by [`deliver`].
#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) struct Outcome {
    /// Reaction on the invoking message.
    pub reaction: Option<&'static str>,
    pub reply: Option<String>,
    /// React on the sent reply with this emoji.
    pub reply_reaction: Option<&'static str>,
}

impl Outcome {
    pub fn react(reaction: &'static str) -> Self {
        Self {
            reaction: Some(reaction),
            ..Self::default()
        }
    }

    pub fn reply(reaction: &'static str, reply: String) -> Self {
        Self {
            reaction: Some(reaction),
            reply: Some(reply),
            reply_reaction: None,
        }
    }

    pub fn acknowledged(mut self, emoji: &'static str) -> Self {
        self.reply_reaction = Some(emoji);
        self
    }
}

/// Apply an [`Outcome`] in the invoking channel.
pub(crate) async fn deliver(ctx: &Context, msg: &MessageCreate, outcome: Outcome) -> anyhow::Result<()> {
    let http = &ctx.http;

    if let Some(reaction) = outcome.reaction {
        add_reaction(http, msg.channel_id, msg.id, reaction).await;
    }

    if let Some(content) = outcome.reply {
        let mentions = author_mentions(msg.author.id);
        let sent = http
            .create_message(msg.channel_id)
            .content(&content)
            .allowed_mentions(Some(&mentions))
            .await?
            .model()
            .await?;

        if let Some(emoji) = outcome.reply_reaction {
            add_reaction(http, msg.channel_id, sent.id, emoji).await;
        }
    }

    Ok(())
}

/// Post in the invoking channel, pinging only the author.
async fn send_to_author(ctx: &Context, msg: &MessageCreate, content: &str) -> anyhow::Result<()> {
    let mentions = author_mentions(msg.author.id);
    ctx.http
        .create_message(msg.channel_id)
        .content(content)
        .allowed_mentions(Some(&mentions))
        .await?;

    Ok(())
}

/// Reply to the invoking message.
pub(crate) async fn reply_to(ctx: &Context, msg: &MessageCreate, content: &str) -> anyhow::Result<()> {
    let mentions = author_mentions(msg.author.id);
    ctx.http
        .create_message(msg.channel_id)
        .content(content)
        .allowed_mentions(Some(&mentions))
        .reply(msg.id)
        .await?;

    Ok(())
}

/// Dispatch a `tool` subcommand.
///
/// Only runs in guild channels of the configured tool guild.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    prefix: &str,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let Some(guild_id) = msg.guild_id else {
        return Ok(());
    };
    if ctx
        .settings
        .tool_guild_id
        .is_some_and(|tool_guild| tool_guild != guild_id)
    {
        return Ok(());
    }

    let mention = format!("<@{}>", msg.author.id);

    let Some(command) = arg1.and_then(ToolCommand::parse) else {
        let out = format!("{mention} Invalid {prefix}tool command.\n Please use {prefix}help tool");
        return send_to_author(&ctx, &msg, &out).await;
    };

    let rest = arg_tail.unwrap_or("");
    if command.needs_argument() && rest.is_empty() {
        let usage = SUBCOMMANDS
            .iter()
            .find(|meta| arg1.is_some_and(|name| meta.answers_to(name)))
            .map_or(META.usage, |meta| meta.usage);
        let out = format!("{mention} Usage: `{prefix}{usage}`");
        return send_to_author(&ctx, &msg, &out).await;
    }

    let (first_word, _) = split_first_word(rest);
    let first_word = first_word.unwrap_or("");

    match command {
        ToolCommand::Avatar => avatar::run(&ctx, &msg, (!first_word.is_empty()).then_some(first_word)).await,
        ToolCommand::Prime => {
            let (author, number) = (mention.clone(), first_word.to_owned());
            let outcome =
                tokio::task::spawn_blocking(move || convert::prime(&author, &number)).await?;
            deliver(&ctx, &msg, outcome).await
        }
        ToolCommand::Dec2Hex => deliver(&ctx, &msg, convert::dec2hex(&mention, first_word)).await,
        ToolCommand::Hex2Dec => deliver(&ctx, &msg, convert::hex2dec(&mention, first_word)).await,
        ToolCommand::Hex2Str => deliver(&ctx, &msg, convert::hex2str(&mention, first_word)).await,
        ToolCommand::Str2Hex => deliver(&ctx, &msg, convert::str2hex(&mention, rest)).await,
        ToolCommand::Emoji => emoji::run(&ctx, &msg).await,
        ToolCommand::Trans => speech::translate(&ctx, &msg, rest).await,
        ToolCommand::Tts => speech::tts(&ctx, &msg, rest, speech::Voice::English).await,
        ToolCommand::TtsKhmer => speech::tts(&ctx, &msg, rest, speech::Voice::Khmer).await,
        ToolCommand::TtsChinese => speech::tts(&ctx, &msg, rest, speech::Voice::Chinese).await,
        ToolCommand::Find => find::run(&ctx, &msg, prefix, rest).await,
        ToolCommand::When => deliver(&ctx, &msg, when::when(&mention, rest)).await,
    }
}
