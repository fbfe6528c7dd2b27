//! Line-oriented input loop.
//!
//! One task multiplexes two sources with `tokio::select!`: lines from the
//! player and a periodic tick that refreshes the displayed timer. The tick
//! never touches the engine's state.

use std::io::Write;
use std::time::Duration;

use cluequest_core::clock::Clock;
use cluequest_quiz::application::command_handlers::{
    handle_restart_session, handle_start_session, handle_submit_answer,
};
use cluequest_quiz::application::query_handlers::get_session_view;
use cluequest_quiz::domain::aggregates::QuizEngine;
use cluequest_quiz::domain::commands::{RestartSession, StartSession, SubmitAnswer};
use cluequest_quiz::domain::state::SessionStatus;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::error::AppError;
use crate::presenter::TerminalPresenter;

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Begin the session.
    Start,
    /// Answer the current question.
    Answer(String),
    /// Print the scoreboard.
    Status,
    /// Reset to the intro screen.
    Restart,
    /// Leave the program.
    Quit,
}

impl Input {
    /// Classifies a raw line given the session status.
    ///
    /// Slash commands work in every state. Otherwise a line starts the
    /// session, answers the current question, or shows the final scoreboard.
    #[must_use]
    pub fn interpret(line: &str, status: SessionStatus) -> Self {
        match line.trim() {
            "/quit" | "/exit" => Self::Quit,
            "/restart" => Self::Restart,
            "/status" => Self::Status,
            _ => match status {
                SessionStatus::NotStarted => Self::Start,
                SessionStatus::InProgress => Self::Answer(line.to_owned()),
                SessionStatus::Complete => Self::Status,
            },
        }
    }
}

/// Runs the quiz until `/quit` or end of input.
///
/// # Errors
///
/// Returns `AppError::Io` if reading input fails and `AppError::Domain` if
/// the presenter cannot write.
pub async fn run<R, W>(
    input: R,
    presenter: &TerminalPresenter<W>,
    engine: &mut QuizEngine,
    clock: &dyn Clock,
    tick: Duration,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send,
{
    let mut lines = input.lines();
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    presenter.render_intro(engine.questions().len())?;
    presenter.render_prompt(engine.state().status)?;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if engine.state().status == SessionStatus::InProgress {
                    let elapsed = engine.elapsed_time(clock);
                    trace!(elapsed_ms = elapsed.num_milliseconds(), "timer tick");
                    presenter.refresh_timer(elapsed);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("input closed");
                    break;
                };
                let input = Input::interpret(&line, engine.state().status);
                if input == Input::Quit {
                    break;
                }
                dispatch(input, presenter, engine, clock)?;
                presenter.refresh_timer(engine.elapsed_time(clock));
                presenter.render_prompt(engine.state().status)?;
            }
        }
    }

    let view = get_session_view(engine, clock);
    info!(
        status = ?view.status,
        score = view.score,
        elapsed_ms = view.elapsed_ms,
        "leaving quiz"
    );
    Ok(())
}

fn dispatch<W: Write + Send>(
    input: Input,
    presenter: &TerminalPresenter<W>,
    engine: &mut QuizEngine,
    clock: &dyn Clock,
) -> Result<(), AppError> {
    let correlation_id = Uuid::new_v4();
    match input {
        Input::Start => {
            handle_start_session(&StartSession { correlation_id }, engine, clock, presenter)?;
        }
        Input::Answer(answer) => {
            let command = SubmitAnswer {
                correlation_id,
                answer,
            };
            handle_submit_answer(&command, engine, clock, presenter)?;
        }
        Input::Restart => {
            handle_restart_session(&RestartSession { correlation_id }, engine, clock, presenter)?;
        }
        Input::Status => presenter.render_status(&get_session_view(engine, clock))?,
        Input::Quit => {}
    }
    Ok(())
}
