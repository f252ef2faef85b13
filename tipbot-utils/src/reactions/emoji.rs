use std::fmt;

use twilight_http::request::channel::reaction::RequestReactionType;
use twilight_model::{
    channel::message::EmojiReactionType,
    id::{Id, marker::EmojiMarker},
};

const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Owned form of a reaction emoji as delivered by the gateway.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReactionEmoji {
    Unicode(String),
    Custom {
        id: Id<EmojiMarker>,
        name: Option<String>,
        animated: bool,
    },
}

impl ReactionEmoji {
    pub fn unicode(name: impl Into<String>) -> Self {
        Self::Unicode(name.into())
    }

    pub fn from_model(emoji: &EmojiReactionType) -> Self {
        match emoji {
            EmojiReactionType::Unicode { name } => Self::Unicode(name.clone()),
            EmojiReactionType::Custom { animated, id, name } => Self::Custom {
                id: *id,
                name: name.clone(),
                animated: *animated,
            },
        }
    }

    /// Whether this emoji is the given unicode emoji, ignoring variation selectors.
    pub fn is(&self, unicode: &str) -> bool {
        match self {
            Self::Unicode(name) => emoji_eq(name, unicode),
            Self::Custom { .. } => false,
        }
    }

    /// Index of this emoji inside a list of unicode emoji.
    pub fn position_in(&self, choices: &[&str]) -> Option<usize> {
        choices.iter().position(|choice| self.is(choice))
    }

    pub fn request(&self) -> RequestReactionType<'_> {
        match self {
            Self::Unicode(name) => RequestReactionType::Unicode { name },
            Self::Custom { id, name, .. } => RequestReactionType::Custom {
                id: *id,
                name: name.as_deref(),
            },
        }
    }

    /// Raw value shown by the emoji inspector: the custom emoji markup, or the
    /// unicode code points (`U+1F44D`).
    pub fn describe(&self) -> String {
        match self {
            Self::Unicode(name) => name
                .chars()
                .map(|ch| format!("U+{:X}", u32::from(ch)))
                .collect::<Vec<_>>()
                .join(" "),
            Self::Custom { .. } => self.to_string(),
        }
    }
}

impl fmt::Display for ReactionEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unicode(name) => f.write_str(name),
            Self::Custom { id, name, animated } => {
                let prefix = if *animated { "a" } else { "" };
                write!(f, "<{prefix}:{}:{}>", name.as_deref().unwrap_or("_"), id.get())
            }
        }
    }
}

/// Compare two unicode emoji, ignoring U+FE0F variation selectors.
pub fn emoji_eq(left: &str, right: &str) -> bool {
    left.chars()
        .filter(|ch| *ch != VARIATION_SELECTOR)
        .eq(right.chars().filter(|ch| *ch != VARIATION_SELECTOR))
}
