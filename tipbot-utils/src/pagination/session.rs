//! Pure pagination state machine.

use twilight_model::id::{
    Id,
    marker::{MessageMarker, UserMarker},
};

use crate::reactions::{ReactionAction, ReactionEvent};

use super::control::Control;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    Displaying(usize),
    Ended,
}

/// What the runner should do after feeding an event to the session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    /// Render the page at this index in place.
    Show(usize),
    /// Nothing changed.
    Ignore,
    /// The session ended through the stop control.
    End,
}

/// Session state bound to one message and one authorized user.
#[derive(Clone, Debug)]
pub struct PaginationSession {
    owner_id: Id<UserMarker>,
    message_id: Id<MessageMarker>,
    total_pages: usize,
    state: SessionState,
}

impl PaginationSession {
    pub fn new(owner_id: Id<UserMarker>, message_id: Id<MessageMarker>, total_pages: usize) -> Self {
        Self {
            owner_id,
            message_id,
            total_pages: total_pages.max(1),
            state: SessionState::Displaying(0),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current page index, or `None` once the session ended.
    pub fn index(&self) -> Option<usize> {
        match self.state {
            SessionState::Displaying(index) => Some(index),
            SessionState::Ended => None,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn is_ended(&self) -> bool {
        self.state == SessionState::Ended
    }

    /// Whether an event may drive this session at all.
    pub fn accepts(&self, event: &ReactionEvent) -> bool {
        event.action == ReactionAction::Added
            && !event.user_is_bot
            && event.user_id == self.owner_id
            && event.message_id == self.message_id
    }

    /// Feed one reaction event. Events from anyone but the owner are ignored.
    pub fn handle(&mut self, event: &ReactionEvent) -> Transition {
        if self.is_ended() || !self.accepts(event) {
            return Transition::Ignore;
        }

        match Control::from_emoji(&event.emoji) {
            Some(control) => self.apply(control),
            None => Transition::Ignore,
        }
    }

    /// Apply a control as if the owner activated it.
    pub fn apply(&mut self, control: Control) -> Transition {
        let SessionState::Displaying(index) = self.state else {
            return Transition::Ignore;
        };
        let last = self.total_pages - 1;

        let next = match control {
            Control::First => 0,
            Control::Previous => {
                if index == 0 {
                    last
                } else {
                    index - 1
                }
            }
            Control::Next => {
                if index == last {
                    0
                } else {
                    index + 1
                }
            }
            Control::Last => last,
            Control::Stop => {
                self.end();
                return Transition::End;
            }
        };

        self.state = SessionState::Displaying(next);
        Transition::Show(next)
    }

    pub fn end(&mut self) {
        self.state = SessionState::Ended;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactions::ReactionEmoji;

    const OWNER: u64 = 100;
    const MESSAGE: u64 = 900;

    fn session(total: usize) -> PaginationSession {
        PaginationSession::new(Id::new(OWNER), Id::new(MESSAGE), total)
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

    #[test]
    fn starts_on_first_page() {
        let session = session(4);
        assert_eq!(session.state(), SessionState::Displaying(0));
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut session = session(3);
        assert_eq!(session.apply(Control::Next), Transition::Show(1));
        assert_eq!(session.apply(Control::Next), Transition::Show(2));
        assert_eq!(session.apply(Control::Next), Transition::Show(0));
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut session = session(3);
        assert_eq!(session.apply(Control::Previous), Transition::Show(2));
        assert_eq!(session.apply(Control::Previous), Transition::Show(1));
    }

    #[test]
    fn single_page_wraps_to_itself() {
        let mut session = session(1);
        assert_eq!(session.apply(Control::Next), Transition::Show(0));
        assert_eq!(session.apply(Control::Previous), Transition::Show(0));
        assert_eq!(session.apply(Control::Last), Transition::Show(0));
    }

    #[test]
    fn first_and_last_are_idempotent() {
        let mut session = session(5);
        assert_eq!(session.apply(Control::Last), Transition::Show(4));
        assert_eq!(session.apply(Control::Last), Transition::Show(4));
        assert_eq!(session.apply(Control::First), Transition::Show(0));
        assert_eq!(session.apply(Control::First), Transition::Show(0));
    }

    #[test]
    fn stop_is_terminal() {
        let mut session = session(3);
        assert_eq!(session.handle(&press(OWNER, Control::Stop)), Transition::End);
        assert!(session.is_ended());
        assert_eq!(session.handle(&press(OWNER, Control::Next)), Transition::Ignore);
        assert_eq!(session.index(), None);
    }

    #[test]
    fn other_users_do_not_move_the_session() {
        let mut session = session(3);
        assert_eq!(session.handle(&press(7, Control::Next)), Transition::Ignore);
        assert_eq!(session.handle(&press(7, Control::Stop)), Transition::Ignore);
        assert_eq!(session.index(), Some(0));

        assert_eq!(session.handle(&press(OWNER, Control::Next)), Transition::Show(1));
    }

    #[test]
    fn ignores_bots_other_messages_and_removals() {
        let mut session = session(3);

        let mut bot = press(OWNER, Control::Next);
        bot.user_is_bot = true;
        assert_eq!(session.handle(&bot), Transition::Ignore);

        let mut elsewhere = press(OWNER, Control::Next);
        elsewhere.message_id = Id::new(MESSAGE + 1);
        assert_eq!(session.handle(&elsewhere), Transition::Ignore);

        let mut removed = press(OWNER, Control::Next);
        removed.action = ReactionAction::Removed;
        assert_eq!(session.handle(&removed), Transition::Ignore);

        assert_eq!(session.index(), Some(0));
    }

    #[test]
    fn unknown_emoji_is_ignored() {
        let mut session = session(3);
        let mut event = press(OWNER, Control::Next);
        event.emoji = ReactionEmoji::unicode("🎉");
        assert_eq!(session.handle(&event), Transition::Ignore);
        assert_eq!(session.state(), SessionState::Displaying(0));
    }
}
