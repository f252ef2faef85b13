use sqlx::FromRow;

use crate::Database;

/// Section that matches every help document.
pub const ANY_SECTION: &str = "any";

#[derive(Clone, Debug, Eq, FromRow, PartialEq)]
pub struct HelpDoc {
    pub what: String,
    pub detail: String,
    pub example: Option<String>,
}

impl HelpDoc {
    /// Example text, if present and not blank.
    pub fn example(&self) -> Option<&str> {
        self.example
            .as_deref()
            .filter(|example| !example.trim().is_empty())
    }
}

/// Exact (case-insensitive) title lookup.
pub async fn help_doc(db: &Database, section: &str, title: &str) -> sqlx::Result<Option<HelpDoc>> {
    sqlx::query_as::<_, HelpDoc>(
        "SELECT what, detail, example FROM help_docs
         WHERE ($1 = 'any' OR section = $1) AND lower(what) = lower($2)
         ORDER BY id
         LIMIT 1",
    )
    .bind(section)
    .bind(title.trim())
    .fetch_optional(db.pool())
    .await
}

/// Substring search over titles and bodies, titles first.
pub async fn search_help_docs(db: &Database, text: &str, limit: i64) -> sqlx::Result<Vec<HelpDoc>> {
    sqlx::query_as::<_, HelpDoc>(
        "SELECT what, detail, example FROM help_docs
         WHERE what ILIKE $1 ESCAPE '\\' OR detail ILIKE $1 ESCAPE '\\'
         ORDER BY (what ILIKE $1 ESCAPE '\\') DESC, id
         LIMIT $2",
    )
    .bind(like_pattern(text))
    .bind(limit)
    .fetch_all(db.pool())
    .await
}

/// `%text%` with LIKE wildcards in `text` escaped.
pub fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
