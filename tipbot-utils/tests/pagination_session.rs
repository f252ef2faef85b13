use std::time::Duration;

use async_trait::async_trait;
use tipbot_utils::{
    embed::render_pages,
    pagination::{
        Control, Page, PageSurface, PaginationError, PaginationSession, SESSION_TIMEOUT,
        SessionEnd, run_session,
    },
    reactions::{ReactionAction, ReactionEmoji, ReactionEvent},
};
use tokio::{sync::mpsc, time::Instant};
use twilight_model::{channel::message::embed::Embed, id::Id};

const OWNER: u64 = 10;
const MESSAGE: u64 = 500;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Show(String),
    Attach(Vec<&'static str>),
    Release(u64),
    Clear,
}

#[derive(Default)]
struct FakeSurface {
    calls: Vec<Call>,
    private: bool,
    gone: bool,
}

#[async_trait]
impl PageSurface for FakeSurface {
    async fn show(&mut self, page: &Embed) -> Result<(), PaginationError> {
        if self.gone {
            return Err(PaginationError::MessageGone);
        }
        self.calls
            .push(Call::Show(page.title.clone().unwrap_or_default()));
        Ok(())
    }

    async fn attach_controls(&mut self, controls: &[Control]) -> Result<(), PaginationError> {
        self.calls
            .push(Call::Attach(controls.iter().map(|control| control.emoji()).collect()));
        Ok(())
    }

    async fn release_control(&mut self, event: &ReactionEvent) -> Result<(), PaginationError> {
        self.calls.push(Call::Release(event.user_id.get()));
        Ok(())
    }

    async fn clear_controls(&mut self) -> Result<(), PaginationError> {
        if self.gone {
            return Err(PaginationError::MessageGone);
        }
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn is_private(&self) -> bool {
        self.private
    }
}

fn pages(count: usize) -> Vec<Embed> {
    let pages: Vec<Page> = (1..=count)
        .map(|n| Page::new(format!("P{n}")).description("body"))
        .collect();
    render_pages(&pages).expect("pages render")
}

fn press(user: u64, control: Control) -> ReactionEvent {
    ReactionEvent {
        action: ReactionAction::Added,
        user_id: Id::new(user),
        user_is_bot: false,
        message_id: Id::new(MESSAGE),
        emoji: ReactionEmoji::unicode(control.emoji()),
    }
}

fn session(total: usize) -> PaginationSession {
    PaginationSession::new(Id::new(OWNER), Id::new(MESSAGE), total)
}

#[tokio::test(start_paused = true)]
async fn controls_attached_in_order_and_stop_tears_down() {
    let embeds = pages(3);
    let mut surface = FakeSurface::default();
    let (tx, mut rx) = mpsc::channel(8);

    tx.send(press(OWNER, Control::Next)).await.expect("queue open");
    tx.send(press(OWNER, Control::Stop)).await.expect("queue open");

    let mut session = session(embeds.len());
    let end = run_session(&mut session, &embeds, &mut surface, &mut rx, SESSION_TIMEOUT).await;

    assert_eq!(end, SessionEnd::Stopped);
    assert!(session.is_ended());
    assert_eq!(
        surface.calls,
        vec![
            Call::Attach(vec!["⏮️", "⬅️", "⏹️", "➡️", "⏭️"]),
            Call::Release(OWNER),
            Call::Show("P2 (Page 2/3)".to_owned()),
            Call::Show("P1 (Page 1/3)".to_owned()),
            Call::Clear,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn previous_from_first_page_wraps_to_last() {
    let embeds = pages(4);
    let mut surface = FakeSurface::default();
    let (tx, mut rx) = mpsc::channel(8);

    tx.send(press(OWNER, Control::Previous)).await.expect("queue open");
    drop(tx);

    let mut session = session(embeds.len());
    let end = run_session(&mut session, &embeds, &mut surface, &mut rx, SESSION_TIMEOUT).await;

    assert_eq!(end, SessionEnd::SourceClosed);
    assert!(surface.calls.contains(&Call::Show("P4 (Page 4/4)".to_owned())));
}

#[tokio::test(start_paused = true)]
async fn budget_is_not_extended_by_activity() {
    let embeds = pages(5);
    let mut surface = FakeSurface::default();
    let (tx, mut rx) = mpsc::channel(8);

    let feeder = tokio::spawn(async move {
        for _ in 0..10 {
            tokio::time::sleep(Duration::from_secs(60)).await;
            if tx.send(press(OWNER, Control::Next)).await.is_err() {
                break;
            }
        }
    });

    let started = Instant::now();
    let mut session = session(embeds.len());
    let end = run_session(&mut session, &embeds, &mut surface, &mut rx, SESSION_TIMEOUT).await;
    let elapsed = started.elapsed();

    assert_eq!(end, SessionEnd::TimedOut);
    assert!(elapsed >= SESSION_TIMEOUT);
    assert!(elapsed < SESSION_TIMEOUT + Duration::from_secs(60));

    let releases = surface
        .calls
        .iter()
        .filter(|call| matches!(call, Call::Release(_)))
        .count();
    assert!((4..=5).contains(&releases), "releases: {releases}");
    assert_eq!(
        surface.calls[surface.calls.len() - 2..],
        [Call::Show("P1 (Page 1/5)".to_owned()), Call::Clear]
    );

    feeder.abort();
}

#[tokio::test(start_paused = true)]
async fn other_users_are_ignored_silently() {
    let embeds = pages(2);
    let mut surface = FakeSurface::default();
    let (tx, mut rx) = mpsc::channel(8);

    tx.send(press(99, Control::Next)).await.expect("queue open");
    tx.send(press(99, Control::Stop)).await.expect("queue open");

    let mut session = session(embeds.len());
    let end = run_session(
        &mut session,
        &embeds,
        &mut surface,
        &mut rx,
        Duration::from_secs(5),
    )
    .await;

    assert_eq!(end, SessionEnd::TimedOut);
    assert!(!surface.calls.iter().any(|call| matches!(call, Call::Release(_))));
    assert_eq!(surface.calls.len(), 3);

    drop(tx);
}

#[tokio::test(start_paused = true)]
async fn private_sessions_never_remove_reactions() {
    let embeds = pages(2);
    let mut surface = FakeSurface {
        private: true,
        ..FakeSurface::default()
    };
    let (tx, mut rx) = mpsc::channel(8);

    tx.send(press(OWNER, Control::Last)).await.expect("queue open");
    tx.send(press(OWNER, Control::Stop)).await.expect("queue open");

    let mut session = session(embeds.len());
    let end = run_session(&mut session, &embeds, &mut surface, &mut rx, SESSION_TIMEOUT).await;

    assert_eq!(end, SessionEnd::Stopped);
    assert_eq!(
        surface.calls[1..],
        [
            Call::Show("P2 (Page 2/2)".to_owned()),
            Call::Show("P1 (Page 1/2)".to_owned()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn deleted_message_ends_session_quietly() {
    let embeds = pages(3);
    let mut surface = FakeSurface {
        gone: true,
        ..FakeSurface::default()
    };
    let (tx, mut rx) = mpsc::channel(8);

    tx.send(press(OWNER, Control::Next)).await.expect("queue open");

    let mut session = session(embeds.len());
    let end = run_session(&mut session, &embeds, &mut surface, &mut rx, SESSION_TIMEOUT).await;

    assert_eq!(end, SessionEnd::MessageGone);
    assert!(session.is_ended());
    assert!(!surface.calls.contains(&Call::Clear));

    drop(tx);
}
