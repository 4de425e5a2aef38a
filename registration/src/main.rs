//! A TUI for registering new users with the company's API

/// Tab-order for form fields
mod form_fields;

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

use app::{effect::EffectContext, App};
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use std::{fs, io, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
    time,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let config = config::Config::parse();

    // The terminal belongs to the UI, so logs go to a file. Hold on to the
    // guard so buffered lines get flushed when we exit.
    let _guard = init_logging(&config)?;
    tracing::info!(api = %config.api_uri, "starting");

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, &config).await;
    ratatui::restore();
    res
}

/// Set up `tracing` to write to a daily log file in the configured directory.
fn init_logging(config: &config::Config) -> io::Result<WorkerGuard> {
    let dir = config.log_dir();
    fs::create_dir_all(&dir)?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "registration.log"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

/// Manage the lifecycle of the app
async fn run(mut terminal: DefaultTerminal, config: &config::Config) -> io::Result<ExitCode> {
    let mut app = App::new(config);
    let context = Arc::new(EffectContext::new());

    // Side effects (here, mostly the network) run as async tasks. Once those
    // tasks are done, we read their results off of a channel. We keep track
    // of outstanding effects so we can exit cleanly.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects: Vec<JoinHandle<()>> = Vec::with_capacity(1);

    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    // Ticks only drive toast expiry, so they don't need to be precise.
    let mut ticks = time::interval(time::Duration::from_secs(1));

    loop {
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => {
                        Some(app::Action::Key(key_event))
                    }
                    Some(Err(err)) => {
                        Some(app::Action::Problem(err.to_string()))
                    }
                    _ => None,
                }
            },

            _ = ticks.tick() => {
                Some(app::Action::TimePassed)
            },

            effect_opt = effect_rx.recv() => {
                effect_opt
            }
        };

        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&context),
                    effect,
                ));
            }
        }

        terminal.draw(|frame| app.render(frame))?;

        outstanding_effects.retain(|handle| !handle.is_finished());

        // If the app wants to exit, let any in-flight registration finish so
        // it gets logged, then leave with the app's exit code.
        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                if let Err(err) = effect.await {
                    tracing::error!(?err, "effect task failed while exiting");
                }
            }

            tracing::info!("exiting");
            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    context: Arc<EffectContext>,
    effect: app::Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(next_action) = effect.run(&context).await {
            // A closed channel means the loop has already returned, so
            // there's nobody left to tell.
            if effect_tx.send(next_action).is_err() {
                tracing::debug!("dropped effect result after shutdown");
            }
        }
    })
}
