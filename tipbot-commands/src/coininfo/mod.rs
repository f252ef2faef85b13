mod render;

pub use render::{CoinListRow, TradeDisplay, coin_detail_message, coin_list_message};

use tracing::error;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::{CommandMeta, author_mentions};
use tipbot_core::{CoinInfo, Context};
use tipbot_database::{
    heights::daemon_height,
    servers::{ServerInfo, server_info},
    trades::coin_trade_stat,
};

pub const META: CommandMeta = CommandMeta {
    name: "coininfo",
    aliases: &["coin", "coinf_info"],
    desc: "Get coin's information in TipBot.",
    category: "coin",
    usage: "coininfo [coin]",
};

/// Show the coin list, or details for one coin.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    match arg1 {
        None => coin_list(ctx, msg).await,
        Some(ticker) => coin_detail(ctx, msg, &ticker.to_uppercase()).await,
    }
}

async fn coin_list(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if ctx.settings.is_hidden_guild(msg.guild_id) {
        return Ok(());
    }

    let mut rows = Vec::new();
    for coin in ctx.coins.enabled_coins() {
        match daemon_height(&ctx.db, &coin.ticker).await {
            Ok(Some(height)) => rows.push(CoinListRow::new(coin, height)),
            Ok(None) => {}
            Err(source) => error!(?source, coin = %coin.ticker, "failed to read daemon height"),
        }
    }

    let out = coin_list_message(rows);
    ctx.http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}

async fn coin_detail(ctx: Context, msg: Box<MessageCreate>, ticker: &str) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(coin) = ctx.coins.coin(ticker) else {
        let channel = http.create_private_channel(msg.author.id).await?.model().await?;
        let out = format!("<@{}> **{ticker}** is not in our list.", msg.author.id);
        let mentions = author_mentions(msg.author.id);
        http.create_message(channel.id)
            .content(&out)
            .allowed_mentions(Some(&mentions))
            .await?;
        return Ok(());
    };

    let height = match daemon_height(&ctx.db, &coin.ticker).await {
        Ok(height) => height,
        Err(source) => {
            error!(?source, coin = %coin.ticker, "failed to read daemon height");
            None
        }
    };

    let trade = trade_display(&ctx, &msg, coin).await;
    let out = coin_detail_message(coin, height, &trade);
    http.create_message(msg.channel_id)
        .content(&out)
        .reply(msg.id)
        .await?;

    Ok(())
}

/// DMs show trade limits for tradeable coins; guilds also need trading
/// enabled and add volume when stats exist.
async fn trade_display(ctx: &Context, msg: &MessageCreate, coin: &CoinInfo) -> TradeDisplay {
    if !coin.is_tradeable() {
        return TradeDisplay::Hidden;
    }

    let Some(guild_id) = msg.guild_id else {
        return TradeDisplay::Limits;
    };

    let enable_trade = match server_info(&ctx.db, guild_id.get()).await {
        Ok(info) => {
            info.unwrap_or_else(|| ServerInfo::unconfigured(guild_id.get()))
                .enable_trade
        }
        Err(source) => {
            error!(?source, guild_id = guild_id.get(), "failed to load server info");
            false
        }
    };
    if !enable_trade {
        return TradeDisplay::Hidden;
    }

    match coin_trade_stat(&ctx.db, &coin.ticker).await {
        Ok(Some(stat)) => TradeDisplay::LimitsWithVolume(stat),
        Ok(None) => TradeDisplay::Limits,
        Err(source) => {
            error!(?source, coin = %coin.ticker, "failed to load trade stats");
            TradeDisplay::Limits
        }
    }
}
