use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder};

use crate::pagination::{Page, indicator_title};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x6B_89_47;

/// Build the embed for one page, with its title tagged with the page indicator.
pub fn page_embed(page: &Page, index: usize, total_pages: usize) -> anyhow::Result<Embed> {
    let title = indicator_title(page.title.as_deref(), index, total_pages);

    let mut builder = EmbedBuilder::new().title(title).color(DEFAULT_EMBED_COLOR);

    if let Some(description) = page.description.as_deref() {
        builder = builder.description(description);
    }

    for field in &page.fields {
        let field_builder = EmbedFieldBuilder::new(field.name.as_str(), field.value.as_str());
        builder = if field.inline {
            builder.field(field_builder.inline())
        } else {
            builder.field(field_builder)
        };
    }

    if let Some(footer) = page.footer.as_deref() {
        builder = builder.footer(EmbedFooterBuilder::new(footer));
    }

    Ok(builder.validate()?.build())
}

/// Render a whole page sequence up front so invalid pages fail before anything is sent.
pub fn render_pages(pages: &[Page]) -> anyhow::Result<Vec<Embed>> {
    let total = pages.len();

    pages
        .iter()
        .enumerate()
        .map(|(index, page)| page_embed(page, index, total))
        .collect()
}
