//! Terminal client event loop.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::api::QuizBackend;
use crate::error::Result;
use crate::models::{QuizKey, ReviewKey, Viewer};
use crate::session::{
    PendingSubmit, Phase, Review, SubmitOutcome, SubmitTrigger, TakeSession, bootstrap_review,
    bootstrap_take,
};
use crate::terminal::TerminalGuard;

use super::state::{ClientApp, ClientState, Prompt, TakeScreen};
use super::ui;

/// Which session the client opens.
#[derive(Debug, Clone)]
pub enum Mode {
    Take(QuizKey),
    Review { viewer: Viewer, key: ReviewKey },
}

/// Everything that reaches the loop besides key presses.
pub enum AppEvent {
    Tick,
    TakeLoaded(Result<TakeSession>),
    ReviewLoaded(Result<Review>),
    SubmitFinished(Result<()>),
}

type Events = mpsc::UnboundedSender<AppEvent>;

/// Run the quiz client until the user quits.
pub async fn run(backend: Arc<dyn QuizBackend>, mode: Mode) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut app = ClientApp::loading(match mode {
        Mode::Take(_) => "Loading quiz...",
        Mode::Review { .. } => "Loading submission...",
    });

    spawn_bootstrap(Arc::clone(&backend), mode, tx.clone());

    let mut terminal = TerminalGuard::enter()?;
    let mut input = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;
        if app.should_quit {
            break;
        }

        tokio::select! {
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_input(&mut app, key.code, &backend, &tx);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                // Input is gone for good; nothing can be answered anymore.
                None => app.should_quit = true,
            },
            Some(event) = rx.recv() => handle_event(&mut app, event, &backend, &tx),
        }
    }

    // Dropping the app drops any live session, which stops its cadence.
    drop(app);
    Ok(())
}

fn spawn_bootstrap(backend: Arc<dyn QuizBackend>, mode: Mode, tx: Events) {
    tokio::spawn(async move {
        let event = match mode {
            Mode::Take(key) => AppEvent::TakeLoaded(bootstrap_take(backend.as_ref(), key).await),
            Mode::Review { viewer, key } => {
                AppEvent::ReviewLoaded(bootstrap_review(backend.as_ref(), viewer, key).await)
            }
        };
        let _ = tx.send(event);
    });
}

fn spawn_submit(backend: &Arc<dyn QuizBackend>, pending: PendingSubmit, tx: &Events) {
    let backend = Arc::clone(backend);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = pending.send(backend.as_ref()).await;
        let _ = tx.send(AppEvent::SubmitFinished(result));
    });
}

/// Handle a non-input event.
fn handle_event(app: &mut ClientApp, event: AppEvent, backend: &Arc<dyn QuizBackend>, tx: &Events) {
    match event {
        AppEvent::TakeLoaded(Ok(mut session)) => {
            let ticks = tx.clone();
            session.start_cadence(ticks, || AppEvent::Tick);
            app.enter_take(session);
        }
        AppEvent::ReviewLoaded(Ok(review)) => app.enter_review(review),
        AppEvent::TakeLoaded(Err(err)) | AppEvent::ReviewLoaded(Err(err)) => {
            app.enter_empty(&err);
        }
        AppEvent::Tick => {
            if let Some(screen) = app.take_screen_mut() {
                if let Some(pending) = screen.session.on_tick() {
                    screen.prompt = None;
                    spawn_submit(backend, pending, tx);
                }
            }
        }
        AppEvent::SubmitFinished(result) => {
            let Some(screen) = app.take_screen_mut() else {
                return;
            };
            match screen.session.finish_submit(result) {
                SubmitOutcome::Submitted(trigger) => app.enter_submitted(trigger),
                SubmitOutcome::Failed(_) | SubmitOutcome::Skipped => {}
            }
        }
    }
}

/// Handle keyboard input.
fn handle_input(app: &mut ClientApp, key: KeyCode, backend: &Arc<dyn QuizBackend>, tx: &Events) {
    match &mut app.state {
        ClientState::Loading { .. } => {
            if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                app.quit();
            }
        }
        ClientState::Taking(screen) => {
            if handle_take_input(screen, key, backend, tx) {
                app.quit();
            }
        }
        ClientState::Reviewing(review) => match key {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => review.next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => review.prev(),
            KeyCode::Char(c @ '1'..='9') => {
                review.jump_to(digit_index(c));
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                app.quit();
            }
            _ => {}
        },
        ClientState::Submitted { .. } | ClientState::Empty { .. } => {
            if matches!(
                key,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter
            ) {
                app.quit();
            }
        }
    }
}

/// Returns true if the user confirmed leaving the quiz.
fn handle_take_input(
    screen: &mut TakeScreen,
    key: KeyCode,
    backend: &Arc<dyn QuizBackend>,
    tx: &Events,
) -> bool {
    if let Some(prompt) = screen.prompt {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                screen.prompt = None;
                match prompt {
                    Prompt::Submit => {
                        if let Some(pending) = screen.session.begin_submit(SubmitTrigger::Manual) {
                            spawn_submit(backend, pending, tx);
                        }
                    }
                    Prompt::Leave => return true,
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => screen.prompt = None,
            _ => {}
        }
        return false;
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => screen.highlight_previous(),
        KeyCode::Down | KeyCode::Char('j') => screen.highlight_next(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let index = screen.highlighted;
            screen.session.select_current(index);
        }
        KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('x') => {
            screen.session.clear_current();
        }
        KeyCode::Right | KeyCode::Char('l') => screen.next_question(),
        KeyCode::Left | KeyCode::Char('h') => screen.previous_question(),
        KeyCode::Char(c @ '1'..='9') => screen.jump_to(digit_index(c)),
        KeyCode::Char('s') | KeyCode::Char('S') => {
            if screen.session.phase() == Phase::Active {
                screen.prompt = Some(Prompt::Submit);
            }
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            if screen.session.phase() == Phase::Active {
                screen.prompt = Some(Prompt::Leave);
            }
        }
        _ => {}
    }
    false
}

fn digit_index(c: char) -> usize {
    c.to_digit(10).map(|d| d as usize).unwrap_or(1).saturating_sub(1)
}
