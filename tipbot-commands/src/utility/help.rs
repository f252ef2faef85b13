use std::sync::Arc;

use twilight_model::{channel::message::embed::Embed, gateway::payload::incoming::MessageCreate};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder};

use crate::{COMMANDS, CommandMeta, author_mentions, tools::SUBCOMMANDS};
use tipbot_core::Context;
use tipbot_utils::{
    embed::{DEFAULT_EMBED_COLOR, page_embed},
    pagination::{Page, PaginationTarget, paginate},
};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    aliases: &[],
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "help [page|category|command]",
};

const HELP_ENTRIES_PER_PAGE: usize = 8;

/// Top-level commands followed by `tool` subcommands.
fn catalog() -> impl Iterator<Item = &'static CommandMeta> {
    COMMANDS.iter().chain(SUBCOMMANDS)
}

fn categories() -> Vec<&'static str> {
    let mut categories: Vec<&str> = catalog().map(|meta| meta.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

/// Catalog pages, grouped by category; a category never shares a page.
fn help_pages(prefix: &str, category: Option<&str>) -> Vec<Page> {
    let mut pages = Vec::new();

    for current in categories() {
        if category.is_some_and(|wanted| wanted != current) {
            continue;
        }

        let entries: Vec<&CommandMeta> = catalog().filter(|meta| meta.category == current).collect();
        for chunk in entries.chunks(HELP_ENTRIES_PER_PAGE) {
            let page = chunk.iter().fold(
                Page::new(format!("TipBot Help: {current}"))
                    .footer(format!("Use {prefix}help <command> for details")),
                |page, meta| page.field(format!("{prefix}{}", meta.usage), meta.desc, false),
            );
            pages.push(page);
        }
    }

    pages
}

/// Command or `tool` subcommand answering to `name`.
fn lookup(name: &str) -> Option<&'static CommandMeta> {
    COMMANDS
        .iter()
        .find(|meta| meta.answers_to(name))
        .or_else(|| SUBCOMMANDS.iter().find(|meta| meta.answers_to(name)))
}

fn command_embed(meta: &CommandMeta, prefix: &str) -> anyhow::Result<Embed> {
    let mut builder = EmbedBuilder::new()
        .title(format!("{prefix}{}", meta.usage))
        .description(meta.desc)
        .color(DEFAULT_EMBED_COLOR)
        .field(EmbedFieldBuilder::new("Category", meta.category).inline());

    if !meta.aliases.is_empty() {
        let aliases = meta.aliases.join(", ");
        builder = builder.field(EmbedFieldBuilder::new("Aliases", aliases).inline());
    }

    Ok(builder
        .footer(EmbedFooterBuilder::new(format!("Use {prefix}help to see every command")))
        .validate()?
        .build())
}

fn unknown_topic_message(topic: &str) -> String {
    format!(
        "No help for `{topic}`. Available categories: {}.",
        categories().join(", ")
    )
}

/// Render the command catalog, a single page of it, one category or one command.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    prefix: &str,
    arg1: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;
    let topic = arg1.map(str::to_ascii_lowercase);

    if let Some(raw) = topic.as_deref()
        && let Ok(requested) = raw.parse::<usize>()
    {
        let pages = help_pages(prefix, None);
        let total = pages.len();

        let Some(page) = requested.checked_sub(1).and_then(|index| pages.get(index)) else {
            let out = format!("Page {requested} does not exist. Available pages: 1-{total}.");
            http.create_message(msg.channel_id).content(&out).await?;
            return Ok(());
        };

        let embed = page_embed(page, requested - 1, total)?;
        http.create_message(msg.channel_id).embeds(&[embed]).await?;
        return Ok(());
    }

    let category = match topic.as_deref() {
        None => None,
        Some(raw) if categories().contains(&raw) => Some(raw),
        Some(raw) => {
            match lookup(raw) {
                Some(meta) => {
                    let embed = command_embed(meta, prefix)?;
                    http.create_message(msg.channel_id).embeds(&[embed]).await?;
                }
                None => {
                    let out = unknown_topic_message(raw);
                    let mentions = author_mentions(msg.author.id);
                    http.create_message(msg.channel_id)
                        .content(&out)
                        .allowed_mentions(Some(&mentions))
                        .await?;
                }
            }
            return Ok(());
        }
    };

    let target = PaginationTarget {
        channel_id: msg.channel_id,
        owner_id: msg.author.id,
        private: msg.guild_id.is_none(),
    };
    let pages = help_pages(prefix, category);
    paginate(Arc::clone(&ctx.http), &ctx.standby, target, &pages).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_count(pages: &[Page]) -> usize {
        pages.iter().map(|page| page.fields.len()).sum()
    }

    #[test]
    fn pages_cover_catalog_without_mixing_categories() {
        let pages = help_pages(".", None);

        assert_eq!(field_count(&pages), COMMANDS.len() + SUBCOMMANDS.len());
        assert!(pages.iter().all(|page| page.fields.len() <= HELP_ENTRIES_PER_PAGE));
        assert!(pages.iter().all(|page| !page.fields.is_empty()));

        let titles: Vec<_> = pages.iter().filter_map(|page| page.title.as_deref()).collect();
        assert_eq!(
            titles,
            [
                "TipBot Help: coin",
                "TipBot Help: tool",
                "TipBot Help: tool",
                "TipBot Help: utility",
            ]
        );
    }

    #[test]
    fn category_filter_and_prefix() {
        let pages = help_pages("$", Some("coin"));

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].fields[0].name, "$coininfo [coin]");
        assert_eq!(pages[0].footer.as_deref(), Some("Use $help <command> for details"));
        assert!(help_pages(".", Some("games")).is_empty());
    }

    #[test]
    fn lookup_prefers_top_level_commands() {
        assert_eq!(lookup("coin").map(|meta| meta.name), Some("coininfo"));
        assert_eq!(lookup("hex2ascii").map(|meta| meta.name), Some("hex2str"));
        assert_eq!(lookup("tools").map(|meta| meta.name), Some("tool"));
        assert!(lookup("tip").is_none());
    }

    #[test]
    fn command_embed_lists_aliases() -> anyhow::Result<()> {
        let meta = lookup("trans").expect("trans is listed");
        let embed = command_embed(meta, ".")?;

        assert_eq!(embed.title.as_deref(), Some(".tool trans <to language> <text>"));
        assert_eq!(embed.fields[1].value, "translate, tran");

        let embed = command_embed(&META, ".")?;
        assert_eq!(embed.fields.len(), 1);
        Ok(())
    }

    #[test]
    fn unknown_topic_lists_categories() {
        assert_eq!(
            unknown_topic_message("games"),
            "No help for `games`. Available categories: coin, tool, utility."
        );
    }
}
