use async_trait::async_trait;
use futures_util::StreamExt as _;
use tokio::sync::mpsc;
use twilight_model::{
    gateway::{GatewayReaction, event::Event},
    id::{
        Id,
        marker::{MessageMarker, UserMarker},
    },
};
use twilight_standby::{Standby, future::WaitForEventStream};

use super::ReactionEmoji;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReactionAction {
    Added,
    Removed,
}

/// One reaction activation: who reacted, on which message, with what.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReactionEvent {
    pub action: ReactionAction,
    pub user_id: Id<UserMarker>,
    pub user_is_bot: bool,
    pub message_id: Id<MessageMarker>,
    pub emoji: ReactionEmoji,
}

impl ReactionEvent {
    pub fn from_gateway(event: &Event) -> Option<Self> {
        match event {
            Event::ReactionAdd(reaction) => Some(Self::from_reaction(reaction, ReactionAction::Added)),
            Event::ReactionRemove(reaction) => {
                Some(Self::from_reaction(reaction, ReactionAction::Removed))
            }
            _ => None,
        }
    }

    fn from_reaction(reaction: &GatewayReaction, action: ReactionAction) -> Self {
        Self {
            action,
            user_id: reaction.user_id,
            user_is_bot: reaction
                .member
                .as_ref()
                .is_some_and(|member| member.user.bot),
            message_id: reaction.message_id,
            emoji: ReactionEmoji::from_model(&reaction.emoji),
        }
    }
}

/// A queue of reaction events scoped to one message.
///
/// `None` means the source is closed and no further events will arrive.
#[async_trait]
pub trait ReactionEvents: Send {
    async fn next_event(&mut self) -> Option<ReactionEvent>;
}

#[async_trait]
impl ReactionEvents for mpsc::Receiver<ReactionEvent> {
    async fn next_event(&mut self) -> Option<ReactionEvent> {
        self.recv().await
    }
}

/// Reaction events for one message, fed by the gateway through [`Standby`].
pub struct StandbyReactions {
    stream: WaitForEventStream,
}

impl StandbyReactions {
    /// Subscribe to reactions added to `message_id`.
    pub fn added(standby: &Standby, message_id: Id<MessageMarker>) -> Self {
        Self::subscribe(standby, message_id, false)
    }

    /// Subscribe to reactions added to or removed from `message_id`.
    pub fn added_or_removed(standby: &Standby, message_id: Id<MessageMarker>) -> Self {
        Self::subscribe(standby, message_id, true)
    }

    fn subscribe(standby: &Standby, message_id: Id<MessageMarker>, include_removed: bool) -> Self {
        let stream = standby.wait_for_event_stream(move |event: &Event| match event {
            Event::ReactionAdd(reaction) => reaction.message_id == message_id,
            Event::ReactionRemove(reaction) => include_removed && reaction.message_id == message_id,
            _ => false,
        });

        Self { stream }
    }
}

#[async_trait]
impl ReactionEvents for StandbyReactions {
    async fn next_event(&mut self) -> Option<ReactionEvent> {
        while let Some(event) = self.stream.next().await {
            if let Some(reaction) = ReactionEvent::from_gateway(&event) {
                return Some(reaction);
            }
        }

        None
    }
}
