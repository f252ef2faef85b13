//! Reaction controls understood by a pagination session.

use crate::reactions::ReactionEmoji;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Control {
    First,
    Previous,
    Stop,
    Next,
    Last,
}

impl Control {
    /// All controls, in the order they are attached to a message.
    pub const ALL: [Control; 5] = [
        Control::First,
        Control::Previous,
        Control::Stop,
        Control::Next,
        Control::Last,
    ];

    pub const fn emoji(self) -> &'static str {
        match self {
            Control::First => "⏮️",
            Control::Previous => "⬅️",
            Control::Stop => "⏹️",
            Control::Next => "➡️",
            Control::Last => "⏭️",
        }
    }

    pub fn from_emoji(emoji: &ReactionEmoji) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|control| emoji.is(control.emoji()))
    }
}
