pub mod coininfo;
pub mod tools;
pub mod utility;

use tracing::warn;
use twilight_model::{
    channel::message::AllowedMentions,
    gateway::payload::incoming::MessageCreate,
    id::{Id, marker::UserMarker},
};

use tipbot_core::Context;
use tipbot_database::servers::{DEFAULT_PREFIX, guild_prefix};

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

impl CommandMeta {
    /// Whether `name` is this command's name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

pub const COMMANDS: &[CommandMeta] = &[
    coininfo::META,
    tools::META,
    utility::help::META,
    // Add new commands here
];

/// Top-level command answering to `name`.
pub fn find_command(name: &str) -> Option<&'static CommandMeta> {
    COMMANDS.iter().find(|command| command.answers_to(name))
}

/// Mentions a reply may ping: the invoking user only, never roles or `@everyone`.
pub fn author_mentions(author_id: Id<UserMarker>) -> AllowedMentions {
    AllowedMentions {
        users: vec![author_id],
        ..AllowedMentions::default()
    }
}

/// A prefixed command split into its name, first argument and remainder.
#[derive(Debug, Eq, PartialEq)]
pub struct Invocation<'a> {
    pub name: String,
    pub arg1: Option<&'a str>,
    pub arg_tail: Option<&'a str>,
}

/// Split `content` if it starts with `prefix`.
pub fn parse_invocation<'a>(content: &'a str, prefix: &str) -> Option<Invocation<'a>> {
    let content = content.trim().strip_prefix(prefix)?.trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let name = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }

    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let (arg1, arg_tail) = match rest {
        Some(value) => {
            let mut args = value.splitn(2, char::is_whitespace);
            let first = args.next().filter(|arg| !arg.is_empty());
            let tail = args
                .next()
                .map(str::trim)
                .filter(|remaining| !remaining.is_empty());

            (first, tail)
        }
        None => (None, None),
    };

    Some(Invocation {
        name,
        arg1,
        arg_tail,
    })
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let prefix = match guild_prefix(&ctx.db, msg.guild_id.map(|id| id.get())).await {
        Ok(prefix) => prefix,
        Err(source) => {
            warn!(?source, "failed to load guild prefix, using default");
            DEFAULT_PREFIX.to_owned()
        }
    };

    let content = msg.content.clone();
    let Some(invocation) = parse_invocation(&content, &prefix) else {
        return Ok(());
    };

    let Some(command) = find_command(&invocation.name) else {
        return Ok(());
    };

    let arg1 = invocation.arg1;
    let arg_tail = invocation.arg_tail;

    match command.name {
        "coininfo" => coininfo::run(ctx.clone(), msg, arg1).await?,
        "tool" => tools::run(ctx.clone(), msg, &prefix, arg1, arg_tail).await?,
        "help" => utility::help::run(ctx.clone(), msg, &prefix, arg1).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}
