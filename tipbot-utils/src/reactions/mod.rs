//! Reaction emoji, gateway reaction events and helpers for acknowledging
//! commands with reactions.

mod emoji;
mod events;

use tracing::warn;
use twilight_http::{Client, request::channel::reaction::RequestReactionType};
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker},
};

pub use emoji::{ReactionEmoji, emoji_eq};
pub use events::{ReactionAction, ReactionEvent, ReactionEvents, StandbyReactions};

pub const EMOJI_OK_BOX: &str = "🆗";
pub const EMOJI_OK_HAND: &str = "👌";
pub const EMOJI_CHECKMARK: &str = "✅";
pub const EMOJI_ERROR: &str = "❌";
pub const EMOJI_RED_NO: &str = "⛔";
pub const EMOJI_ZIPPED_MOUTH: &str = "🤐";
pub const EMOJI_INFORMATION: &str = "ℹ️";
pub const EMOJI_LOCKED: &str = "🔒";
pub const EMOJI_ALARMCLOCK: &str = "⏰";

/// Number emoji used to pick one of several results, in display order.
pub const NUMBER_EMOJIS: [&str; 10] = [
    "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🆗",
];

/// Add a unicode reaction to a message.
///
/// Acknowledgement reactions are cosmetic, so failures are logged and dropped.
pub async fn add_reaction(
    http: &Client,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    emoji: &str,
) {
    let request = RequestReactionType::Unicode { name: emoji };

    if let Err(source) = http.create_reaction(channel_id, message_id, &request).await {
        warn!(
            ?source,
            channel_id = channel_id.get(),
            message_id = message_id.get(),
            emoji,
            "failed to add reaction"
        );
    }
}
