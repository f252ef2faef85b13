use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::Database;

#[derive(Clone, Debug, FromRow, PartialEq)]
pub struct TradeStat {
    pub trade_24h: Decimal,
    pub trade_7d: Decimal,
    pub trade_30d: Decimal,
}

pub async fn coin_trade_stat(db: &Database, coin: &str) -> sqlx::Result<Option<TradeStat>> {
    sqlx::query_as::<_, TradeStat>(
        "SELECT trade_24h, trade_7d, trade_30d FROM coin_trade_stats WHERE coin = $1",
    )
    .bind(coin.to_uppercase())
    .fetch_optional(db.pool())
    .await
}
