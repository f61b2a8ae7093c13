use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use kartei_core::HttpStore;
use kartei_render_mupdf::MupdfRenderer;

mod action;
mod app;
mod backend;
mod config_file;
mod input;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// kartei — terminal PDF study tool: annotate, translate, and build
/// flashcards from text selections.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the study backend
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,
}

/// Write logs to a file; stdout belongs to the TUI.
fn init_logging() {
    let log_dir = dirs::cache_dir()
        .map(|d| d.join("kartei"))
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let appender = tracing_appender::rolling::daily(log_dir, "kartei.log");
    tracing_subscriber::fmt()
        .with_writer(appender)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("KARTEI_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logging();

    // Resolve settings: CLI flags > env vars > config file > defaults
    let file_config = config_file::load_config();
    let api_url = args
        .api_url
        .or_else(|| std::env::var("KARTEI_API_URL").ok())
        .or_else(|| file_config.api.as_ref().and_then(|a| a.url.clone()))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let timeout_secs: u64 = args
        .timeout
        .or_else(|| {
            std::env::var("KARTEI_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .unwrap_or(60);
    let theme_name = args
        .theme
        .or_else(|| {
            file_config
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
        })
        .unwrap_or_else(|| "hacker".to_string());
    let theme = match theme_name.as_str() {
        "modern" => theme::Theme::modern(),
        _ => theme::Theme::hacker(),
    };

    info!(api_url, timeout_secs, "starting kartei");

    let store: Arc<dyn kartei_core::StudyStore> = Arc::new(
        HttpStore::new(&api_url).with_timeout(Duration::from_secs(timeout_secs)),
    );
    let renderer: Arc<dyn kartei_core::PageRenderer> = Arc::new(MupdfRenderer::new());

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<tui_event::BackendCommand>();
    let cancel = CancellationToken::new();

    let mut app = App::new(theme);
    app.backend_cmd_tx = Some(cmd_tx.clone());

    // Spawn backend command listener
    let backend_cancel = cancel.clone();
    tokio::spawn(async move {
        backend::run(store, renderer, cmd_rx, event_tx, backend_cancel).await;
    });

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    // Kick off the initial document fetch
    let _ = cmd_tx.send(tui_event::BackendCommand::LoadDocuments);
    app.status = "Loading documents…".to_string();

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            // Backend events (non-blocking drain)
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let action = input::map_event(&evt, &app.input_mode);
                        app.update(action);
                    }
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit || cancel.is_cancelled() {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    Ok(())
}
