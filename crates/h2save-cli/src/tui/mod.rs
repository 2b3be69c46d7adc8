mod app;
mod components;
mod tui_event;
mod ui;

use crate::commands::build_runtime;
use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use h2save_runtime::read_save;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::PathBuf;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::LocalSet;

pub(crate) use app::{AppState, TuiPipeline};
use app::Command;
use tui_event::TuiEvent;

/// Restores the terminal when dropped, including while unwinding.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Run the interactive view until the user quits.
pub(crate) fn run(app: AppState, initial: Option<PathBuf>) -> Result<()> {
    let runtime = build_runtime()?;

    // Decoder panics are caught by the gateway; keep the default hook from
    // writing over the screen and send them to the log instead.
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(%info, "panic");
    }));

    let local = LocalSet::new();
    let result = local.block_on(&runtime, event_loop(app, initial));

    std::panic::set_hook(previous_hook);
    result
}

async fn event_loop(mut app: AppState, initial: Option<PathBuf>) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;

    // SIGINT from outside the terminal; Ctrl+C typed in raw mode arrives as a key.
    ctrlc::set_handler(move || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        std::process::exit(130);
    })?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    if let Some(path) = initial {
        app.input = path.display().to_string();
        dispatch(&mut app, Command::Select(path), &tx);
    }

    let mut events = EventStream::new();

    while !app.should_quit {
        guard.terminal.draw(|f| ui::draw(f, &mut app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if let Some(command) = app.handle_key(key) {
                        dispatch(&mut app, command, &tx);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            Some(event) = rx.recv() => app.apply(event),
        }
    }

    Ok(())
}

/// Start the work behind `command` as a local task.
fn dispatch(app: &mut AppState, command: Command, tx: &UnboundedSender<TuiEvent>) {
    match command {
        Command::Select(path) => {
            let attempt = app.pipeline.begin_selection();
            app.mark_busy(attempt, format!("Reading {}", path.display()));

            let tx = tx.clone();
            tokio::task::spawn_local(async move {
                let result = read_save(&path).await;
                let _ = tx.send(TuiEvent::Selected { attempt, result });
            });
        }
        Command::ClearSelection => {
            app.pipeline.clear_selection();
            app.busy = None;
            app.note = None;
        }
        Command::Run(action) => {
            let Some(pending) = app.pipeline.begin(action) else {
                return;
            };
            app.mark_busy(pending.attempt, format!("{}...", action.label()));

            let gateway = app.pipeline.gateway();
            let tx = tx.clone();
            tokio::task::spawn_local(async move {
                let result = gateway.expand(&pending.buffer, pending.format).await;
                let _ = tx.send(TuiEvent::Expanded { pending, result });
            });
        }
    }
}
