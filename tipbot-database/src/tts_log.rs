use crate::Database;

/// One synthesized speech request.
#[derive(Clone, Debug)]
pub struct TtsRecord<'a> {
    pub user_id: u64,
    pub user_name: &'a str,
    pub original_text: &'a str,
    pub lang: &'a str,
    pub media_file: &'a str,
    pub bot_server: &'a str,
}

/// Translation details attached to a speech request.
#[derive(Clone, Debug)]
pub struct Translation<'a> {
    pub translated_text: &'a str,
    pub source_lang: &'a str,
}

pub async fn record_tts(db: &Database, record: &TtsRecord<'_>) -> sqlx::Result<()> {
    insert(db, record, None).await
}

pub async fn record_translation(
    db: &Database,
    record: &TtsRecord<'_>,
    translation: &Translation<'_>,
) -> sqlx::Result<()> {
    insert(db, record, Some(translation)).await
}

async fn insert(
    db: &Database,
    record: &TtsRecord<'_>,
    translation: Option<&Translation<'_>>,
) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO tts_log
            (user_id, user_name, original_text, translated_text, source_lang, target_lang, media_file, bot_server)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(record.user_id as i64)
    .bind(record.user_name)
    .bind(record.original_text)
    .bind(translation.map(|translation| translation.translated_text))
    .bind(translation.map(|translation| translation.source_lang))
    .bind(record.lang)
    .bind(record.media_file)
    .bind(record.bot_server)
    .execute(db.pool())
    .await?;

    Ok(())
}
