use twilight_model::id::{Id, marker::UserMarker};

/// Parse a target user from a raw argument (`<@id>`, `<@!id>`, or raw ID).
pub fn parse_target_user_id(raw: &str) -> Option<Id<UserMarker>> {
    let trimmed = raw.trim();

    let numeric = match trimmed.strip_prefix("<@").and_then(|rest| rest.strip_suffix('>')) {
        Some(inner) => inner.strip_prefix('!').unwrap_or(inner),
        None => trimmed,
    };

    Id::new_checked(numeric.parse::<u64>().ok()?)
}

/// Split a command body into its first word and the trimmed remainder.
pub fn split_first_word(body: &str) -> (Option<&str>, &str) {
    let body = body.trim_start();
    if body.is_empty() {
        return (None, "");
    }

    match body.split_once(char::is_whitespace) {
        Some((word, rest)) => (Some(word), rest.trim()),
        None => (Some(body), ""),
    }
}
