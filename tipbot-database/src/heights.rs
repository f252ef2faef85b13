use crate::Database;

/// Cached daemon height for `coin`, if a watcher has reported one.
pub async fn daemon_height(db: &Database, coin: &str) -> sqlx::Result<Option<u64>> {
    let height: Option<i64> =
        sqlx::query_scalar("SELECT height FROM daemon_heights WHERE coin = $1")
            .bind(coin.to_uppercase())
            .fetch_optional(db.pool())
            .await?;

    Ok(height.and_then(|height| u64::try_from(height).ok()))
}

