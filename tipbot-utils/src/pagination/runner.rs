//! Async driver feeding reaction events into a [`PaginationSession`].

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::{Instant, timeout_at};
use tracing::warn;
use twilight_http::error::ErrorType;
use twilight_model::channel::message::embed::Embed;

use crate::reactions::{ReactionEvent, ReactionEvents};

use super::control::Control;
use super::session::{PaginationSession, Transition};

#[derive(Debug, Error)]
pub enum PaginationError {
    /// The message was deleted or the bot lost access to it.
    #[error("paginated message is no longer available")]
    MessageGone,
    #[error(transparent)]
    Http(twilight_http::Error),
}

impl From<twilight_http::Error> for PaginationError {
    fn from(source: twilight_http::Error) -> Self {
        let gone = matches!(
            source.kind(),
            ErrorType::Response { status, .. } if matches!(status.get(), 403 | 404)
        );

        if gone {
            Self::MessageGone
        } else {
            Self::Http(source)
        }
    }
}

/// The single message a session renders into.
#[async_trait]
pub trait PageSurface: Send {
    /// Replace the displayed page in place.
    async fn show(&mut self, page: &Embed) -> Result<(), PaginationError>;

    /// Attach the reaction controls, in order.
    async fn attach_controls(&mut self, controls: &[Control]) -> Result<(), PaginationError>;

    /// Remove the user's reaction that triggered an event so it can be pressed again.
    async fn release_control(&mut self, event: &ReactionEvent) -> Result<(), PaginationError>;

    /// Remove every reaction from the message.
    async fn clear_controls(&mut self) -> Result<(), PaginationError>;

    /// Private contexts (DMs) do not support removing other users' reactions.
    fn is_private(&self) -> bool;
}

/// Why a session ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionEnd {
    Stopped,
    TimedOut,
    /// The event source closed before the budget ran out.
    SourceClosed,
    MessageGone,
    /// A display update failed for a reason other than the message being gone.
    Failed,
}

/// Drive `session` until it ends.
///
/// `pages[0]` is expected to be on display already. The budget is measured
/// from the moment the controls are attached and is not extended by activity.
pub async fn run_session<S, E>(
    session: &mut PaginationSession,
    pages: &[Embed],
    surface: &mut S,
    events: &mut E,
    budget: Duration,
) -> SessionEnd
where
    S: PageSurface,
    E: ReactionEvents,
{
    if pages.is_empty() {
        session.end();
        return SessionEnd::Stopped;
    }

    match surface.attach_controls(&Control::ALL).await {
        Ok(()) => {}
        Err(PaginationError::MessageGone) => {
            session.end();
            return SessionEnd::MessageGone;
        }
        Err(source) => {
            warn!(?source, "failed to attach pagination controls");
            teardown(session, pages, surface).await;
            return SessionEnd::Failed;
        }
    }

    let deadline = Instant::now() + budget;

    loop {
        let event = match timeout_at(deadline, events.next_event()).await {
            Ok(Some(event)) => event,
            Ok(None) => {
                teardown(session, pages, surface).await;
                return SessionEnd::SourceClosed;
            }
            Err(_elapsed) => {
                teardown(session, pages, surface).await;
                return SessionEnd::TimedOut;
            }
        };

        let index = match session.handle(&event) {
            Transition::Ignore => continue,
            Transition::End => {
                teardown(session, pages, surface).await;
                return SessionEnd::Stopped;
            }
            Transition::Show(index) => index,
        };

        if !surface.is_private() {
            match surface.release_control(&event).await {
                Ok(()) => {}
                Err(PaginationError::MessageGone) => {
                    session.end();
                    return SessionEnd::MessageGone;
                }
                Err(source) => warn!(?source, "failed to remove pagination reaction"),
            }
        }

        let Some(page) = pages.get(index) else {
            teardown(session, pages, surface).await;
            return SessionEnd::Failed;
        };

        match surface.show(page).await {
            Ok(()) => {}
            Err(PaginationError::MessageGone) => {
                session.end();
                return SessionEnd::MessageGone;
            }
            Err(source) => {
                warn!(?source, page = index, "failed to update paginated message");
                teardown(session, pages, surface).await;
                return SessionEnd::Failed;
            }
        }
    }
}

/// Reset the display to the first page and drop the controls.
///
/// A message that is already gone makes this a silent no-op.
async fn teardown<S>(session: &mut PaginationSession, pages: &[Embed], surface: &mut S)
where
    S: PageSurface,
{
    session.end();

    let result = async {
        if let Some(first) = pages.first() {
            surface.show(first).await?;
        }
        if !surface.is_private() {
            surface.clear_controls().await?;
        }
        Ok::<(), PaginationError>(())
    }
    .await;

    match result {
        Ok(()) | Err(PaginationError::MessageGone) => {}
        Err(source) => warn!(?source, "pagination teardown failed"),
    }
}
