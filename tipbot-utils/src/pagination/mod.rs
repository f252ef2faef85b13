//! Stable facade for reaction-driven embed pagination.
//!
//! A session shows one page of a pre-built sequence in a single message and
//! lets the invoking user step through it with reaction controls until they
//! press stop or the session budget runs out.

use std::{sync::Arc, time::Duration};

use tracing::debug;
use twilight_http::Client;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, UserMarker},
};
use twilight_standby::Standby;

use crate::embed::render_pages;
use crate::reactions::StandbyReactions;

/// Total lifetime of a pagination session, measured from its start.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(300);

mod control;
mod page;
mod runner;
mod session;
mod surface;

pub use control::Control;
pub use page::{Page, PageField, indicator_title, page_indicator};
pub use runner::{PageSurface, PaginationError, SessionEnd, run_session};
pub use session::{PaginationSession, SessionState, Transition};
pub use surface::MessageSurface;

/// Where a paginated message is posted and who may drive it.
#[derive(Clone, Copy, Debug)]
pub struct PaginationTarget {
    pub channel_id: Id<ChannelMarker>,
    pub owner_id: Id<UserMarker>,
    /// Direct-message channels cannot have other users' reactions removed.
    pub private: bool,
}

/// Post `pages` as one message and run a pagination session on it.
///
/// Returns once the session ended. An empty page sequence is a no-op.
pub async fn paginate(
    http: Arc<Client>,
    standby: &Standby,
    target: PaginationTarget,
    pages: &[Page],
) -> anyhow::Result<Option<SessionEnd>> {
    if pages.is_empty() {
        return Ok(None);
    }

    let embeds = render_pages(pages)?;

    let message = http
        .create_message(target.channel_id)
        .embeds(&embeds[..1])
        .await?
        .model()
        .await?;

    // Subscribe before the controls exist so no early activation is missed.
    let mut events = StandbyReactions::added(standby, message.id);
    let mut surface = MessageSurface::new(http, target.channel_id, message.id, target.private);
    let mut session = PaginationSession::new(target.owner_id, message.id, embeds.len());

    let end = run_session(
        &mut session,
        &embeds,
        &mut surface,
        &mut events,
        SESSION_TIMEOUT,
    )
    .await;

    debug!(
        ?end,
        message_id = message.id.get(),
        pages = embeds.len(),
        "pagination session finished"
    );

    Ok(Some(end))
}
