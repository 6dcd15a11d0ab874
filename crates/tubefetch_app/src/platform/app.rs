use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use tubefetch_core::{update, AppState, DownloadForm, Msg, Phase};
use tubefetch_logging::{engine_info, engine_warn};

use super::cli::Args;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::render::Renderer;
use super::ui::terminal::Terminal;

pub fn run_app() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logging::initialize(if args.verbose {
        LogDestination::Both
    } else {
        LogDestination::File
    });

    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_args(&args);
    engine_info!("Using download server {}", config.server);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(config.client_settings(), msg_tx.clone())
        .context("cannot set up the download client")?;
    let mut app = App::new(runner, config.server.clone());

    let url = match &args.url {
        Some(url) => {
            app.dispatch(Msg::UrlChanged(url.clone()))?;
            url.clone()
        }
        None => app.prompt_url()?,
    };

    let mut form = DownloadForm::new(url).with_option("format", config.format.as_field());
    for (name, value) in &args.options {
        form = form.with_option(name.clone(), value.clone());
    }

    spawn_cancel_listener(msg_tx);
    app.dispatch(Msg::Submitted(form))?;

    while app.phase() == Phase::Downloading {
        match msg_rx.recv() {
            Ok(msg) => app.dispatch(msg)?,
            Err(_) => break,
        }
    }
    app.dispatch(Msg::TornDown)?;

    Ok(match app.phase() {
        Phase::Done if app.succeeded() => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

struct App {
    state: AppState,
    renderer: Renderer,
    terminal: Terminal,
    runner: EffectRunner,
    server: String,
}

impl App {
    fn new(runner: EffectRunner, server: String) -> Self {
        Self {
            state: AppState::new(),
            renderer: Renderer::new(),
            terminal: Terminal::stdout(),
            runner,
            server,
        }
    }

    fn phase(&self) -> Phase {
        self.state.phase()
    }

    fn succeeded(&self) -> bool {
        self.state.view().outcome.is_some_and(|outcome| outcome.success)
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.consume_dirty().then(|| state.view());
        self.state = state;

        if let Some(view) = view {
            self.terminal
                .execute(self.renderer.render(&view))
                .context("cannot write to terminal")?;
        }
        if let Some(location) = self.runner.enqueue(effects) {
            self.terminal
                .show_navigation(&self.resolve(&location))
                .context("cannot write to terminal")?;
        }
        Ok(())
    }

    /// Asks until a non-empty line is entered, showing validity for each one.
    fn prompt_url(&mut self) -> anyhow::Result<String> {
        loop {
            let line = self.terminal.prompt_url().context("cannot read URL")?;
            self.dispatch(Msg::UrlChanged(line.clone()))?;
            if !line.is_empty() {
                return Ok(line);
            }
        }
    }

    fn resolve(&self, location: &str) -> String {
        format!("{}{}", self.server.trim_end_matches('/'), location)
    }
}

/// Ctrl-C cancels the download in flight instead of killing the process.
fn spawn_cancel_listener(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                engine_warn!("Ctrl-C cancel unavailable: {}", err);
                return;
            }
        };
        if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
            engine_info!("Ctrl-C received, cancelling download");
            let _ = msg_tx.send(Msg::CancelRequested);
        }
    });
}
