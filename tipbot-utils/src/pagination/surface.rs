//! Discord message implementation of [`PageSurface`].

use std::sync::Arc;

use async_trait::async_trait;
use twilight_http::{Client, request::channel::reaction::RequestReactionType};
use twilight_model::{
    channel::message::embed::Embed,
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker},
    },
};

use crate::reactions::ReactionEvent;

use super::control::Control;
use super::runner::{PageSurface, PaginationError};

/// A posted message edited in place by a pagination session.
pub struct MessageSurface {
    http: Arc<Client>,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    private: bool,
}

impl MessageSurface {
    pub fn new(
        http: Arc<Client>,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        private: bool,
    ) -> Self {
        Self {
            http,
            channel_id,
            message_id,
            private,
        }
    }
}

#[async_trait]
impl PageSurface for MessageSurface {
    async fn show(&mut self, page: &Embed) -> Result<(), PaginationError> {
        self.http
            .update_message(self.channel_id, self.message_id)
            .embeds(Some(std::slice::from_ref(page)))
            .await?;

        Ok(())
    }

    async fn attach_controls(&mut self, controls: &[Control]) -> Result<(), PaginationError> {
        for control in controls {
            let emoji = RequestReactionType::Unicode {
                name: control.emoji(),
            };
            self.http
                .create_reaction(self.channel_id, self.message_id, &emoji)
                .await?;
        }

        Ok(())
    }

    async fn release_control(&mut self, event: &ReactionEvent) -> Result<(), PaginationError> {
        self.http
            .delete_reaction(
                self.channel_id,
                self.message_id,
                &event.emoji.request(),
                event.user_id,
            )
            .await?;

        Ok(())
    }

    async fn clear_controls(&mut self) -> Result<(), PaginationError> {
        self.http
            .delete_all_reactions(self.channel_id, self.message_id)
            .await?;

        Ok(())
    }

    fn is_private(&self) -> bool {
        self.private
    }
}
