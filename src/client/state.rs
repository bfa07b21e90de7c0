//! Client screen state.

use crate::error::Error;
use crate::session::{Review, SubmitTrigger, TakeSession};

/// Confirmation asked before an irreversible action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Submit,
    Leave,
}

/// A quiz being taken, plus what only the screen cares about.
pub struct TakeScreen {
    pub session: TakeSession,
    /// Option under the highlight bar (not necessarily the selected one).
    pub highlighted: usize,
    pub prompt: Option<Prompt>,
}

impl TakeScreen {
    pub fn new(session: TakeSession) -> Self {
        let mut screen = Self {
            session,
            highlighted: 0,
            prompt: None,
        };
        screen.sync_highlight();
        screen
    }

    /// Put the highlight on the stored answer of the displayed question.
    pub fn sync_highlight(&mut self) {
        let question = self.session.current_question();
        self.highlighted = self
            .session
            .answers()
            .get(&question.id)
            .and_then(|text| question.options.iter().position(|o| o.text == text))
            .unwrap_or(0);
    }

    pub fn highlight_next(&mut self) {
        let count = self.session.current_question().options.len();
        if count > 0 {
            self.highlighted = (self.highlighted + 1) % count;
        }
    }

    pub fn highlight_previous(&mut self) {
        let count = self.session.current_question().options.len();
        if count > 0 {
            self.highlighted = (self.highlighted + count - 1) % count;
        }
    }

    pub fn next_question(&mut self) {
        self.session.next();
        self.sync_highlight();
    }

    pub fn previous_question(&mut self) {
        self.session.prev();
        self.sync_highlight();
    }

    pub fn jump_to(&mut self, index: usize) {
        if self.session.jump_to(index) {
            self.sync_highlight();
        }
    }
}

/// Current screen of the client.
pub enum ClientState {
    Loading { message: &'static str },
    Taking(TakeScreen),
    /// The take screen was left after a successful submit.
    Submitted {
        title: String,
        trigger: SubmitTrigger,
        answered: usize,
        total: usize,
    },
    Reviewing(Review),
    /// Nothing to show: no quiz, no submission, or a setup failure.
    Empty { message: &'static str },
}

/// Client application state.
pub struct ClientApp {
    pub state: ClientState,
    pub should_quit: bool,
}

impl ClientApp {
    pub fn loading(message: &'static str) -> Self {
        Self {
            state: ClientState::Loading { message },
            should_quit: false,
        }
    }

    pub fn enter_take(&mut self, session: TakeSession) {
        self.state = ClientState::Taking(TakeScreen::new(session));
    }

    pub fn enter_review(&mut self, review: Review) {
        self.state = ClientState::Reviewing(review);
    }

    pub fn enter_empty(&mut self, error: &Error) {
        self.state = ClientState::Empty {
            message: error.user_message(),
        };
    }

    /// Leave the take screen after the backend accepted the submission.
    /// Dropping the session here releases its cadence.
    pub fn enter_submitted(&mut self, trigger: SubmitTrigger) {
        if let ClientState::Taking(screen) = &self.state {
            let (answered, total) = screen.session.progress();
            self.state = ClientState::Submitted {
                title: screen.session.quiz().title.clone(),
                trigger,
                answered,
                total,
            };
        }
    }

    pub fn take_screen_mut(&mut self) -> Option<&mut TakeScreen> {
        match &mut self.state {
            ClientState::Taking(screen) => Some(screen),
            _ => None,
        }
    }

    /// Quit, abandoning an unfinished quiz. Refused while a submit is in
    /// flight so its result is not lost.
    pub fn quit(&mut self) -> bool {
        if let Some(screen) = self.take_screen_mut() {
            if !screen.session.abandon() {
                return false;
            }
        }
        self.should_quit = true;
        true
    }
}
