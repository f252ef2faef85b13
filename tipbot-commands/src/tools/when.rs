use chrono::{DateTime, Utc};

use tipbot_utils::{
    duration::parse_duration_at,
    reactions::{EMOJI_ALARMCLOCK, EMOJI_ERROR},
};

use super::Outcome;

pub(super) fn when(mention: &str, input: &str) -> Outcome {
    when_at(mention, input, Utc::now())
}

fn when_at(mention: &str, input: &str, now: DateTime<Utc>) -> Outcome {
    match parse_duration_at(input, now) {
        Ok(at) => {
            let ts = at.timestamp();
            Outcome::reply(
                EMOJI_ALARMCLOCK,
                format!("{mention} **{input}** from now is <t:{ts}:F> (<t:{ts}:R>)"),
            )
        }
        Err(source) => Outcome::reply(EMOJI_ERROR, format!("{mention} {source}")),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn formats_discord_timestamps() {
        let now = Utc
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("valid timestamp");

        let outcome = when_at("<@1>", "1d 2h", now);
        assert_eq!(
            outcome.reply.as_deref(),
            Some("<@1> **1d 2h** from now is <t:1700093600:F> (<t:1700093600:R>)")
        );
    }

    #[test]
    fn reports_parse_errors() {
        let outcome = when("<@1>", "soon");
        assert_eq!(outcome.reaction, Some(EMOJI_ERROR));
        assert_eq!(
            outcome.reply.as_deref(),
            Some("<@1> `soon` is not a valid duration string.")
        );
    }
}
