//! Bugport demo binary.
//!
//! Runs the report screen standalone against a configured repository. Real
//! hosts embed [`bugport::ReporterApp`] inside their own event loop; this
//! binary is that loop in its simplest form, plus keyring commands for
//! managing the guest token.

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use bugport::api::auth;
use bugport::config::{default_config_path, FileConfig};
use bugport::error::AppError;
use bugport::events::EventHandler;
use bugport::logging;
use bugport::{
    create_task_channel, ExtraInfo, GithubClient, GithubTarget, ReportHost, ReportMessage,
    ReporterApp, ReporterConfig, SubmissionResult, LOG_EXTRA_KEY,
};

/// Lines of log context attached to outgoing reports.
const LOG_EXCERPT_LINES: usize = 40;

/// File a bug report from the terminal
#[derive(Parser, Debug)]
#[command(name = "bugport", version)]
#[command(about = "File a bug report as a GitHub issue", long_about = None)]
struct Args {
    /// Target repository in owner/repo form (overrides the config file)
    #[arg(long, value_name = "OWNER/REPO")]
    repo: Option<String>,

    /// Config file path (defaults to {config_dir}/bugport/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Require a reporter email for guest submissions
    #[arg(long)]
    email_required: bool,

    /// Store a guest token in the OS keyring and exit
    #[arg(long, value_name = "TOKEN")]
    store_token: Option<String>,

    /// Remove the stored guest token and exit
    #[arg(long)]
    forget_token: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let config = resolve_config(&args)?;

    // Keyring commands run without the TUI
    if let Some(token) = args.store_token.as_deref() {
        auth::store_guest_token(&config.app_name, token)?;
        println!("Guest token stored for '{}'.", config.app_name);
        return Ok(());
    }
    if args.forget_token {
        auth::delete_guest_token(&config.app_name)?;
        println!("Guest token removed for '{}'.", config.app_name);
        return Ok(());
    }

    let guest_token = match auth::load_guest_token(&config.app_name) {
        Ok(token) => Some(token),
        Err(error) => {
            info!(%error, "no guest token available, submissions use the browser flow");
            None
        }
    };

    let mut app = ReporterApp::new(config).with_host(Box::new(LogExcerptHost));
    app.set_guest_token(guest_token);

    // Setup terminal
    enable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| AppError::terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| AppError::terminal(e.to_string()))?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    logging::shutdown();

    if let Err(err) = result {
        match err.downcast_ref::<AppError>() {
            Some(app_error) => eprintln!("Error: {}", app_error.user_message()),
            None => eprintln!("Error: {err:?}"),
        }
        std::process::exit(1);
    }

    Ok(())
}

/// The demo event loop: draw, poll, pump task results, hand off parked
/// submissions, exit when the screen closes.
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut ReporterApp,
) -> anyhow::Result<()> {
    let events = EventHandler::new();
    let (mut rx, spawner) = create_task_channel();

    loop {
        terminal.draw(|frame| app.view(frame))?;

        let event = events.next()?;
        app.update(event);

        // Results from the submission task
        while let Ok(message) = rx.try_recv() {
            app.handle_message(message);
        }

        // Hand a parked submission to the background task
        if let Some(pending) = app.take_pending_submission() {
            match GithubClient::new(pending.login) {
                Ok(client) => spawner.spawn_submit(&client, pending.target, pending.report),
                Err(error) => {
                    warn!(%error, "could not build the GitHub client");
                    app.handle_message(ReportMessage::SubmissionFinished(
                        SubmissionResult::Unknown,
                    ));
                }
            }
        }

        if app.should_close() {
            return Ok(());
        }
    }
}

/// Merge the config file and command-line flags into a screen config.
fn resolve_config(args: &Args) -> anyhow::Result<ReporterConfig> {
    let file = match &args.config {
        Some(path) => Some(
            FileConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
        ),
        None => FileConfig::load_default().context("loading default config file")?,
    };

    let repo_override = args
        .repo
        .as_deref()
        .map(GithubTarget::parse)
        .transpose()
        .context("parsing --repo")?;

    let mut config = match (file, repo_override) {
        (Some(file), target) => {
            let mut config = file.into_reporter_config()?;
            if let Some(target) = target {
                config.target = target;
            }
            config
        }
        (None, Some(target)) => ReporterConfig::new(target)
            .with_app_name(env!("CARGO_PKG_NAME"))
            .with_app_version(env!("CARGO_PKG_VERSION"), -1),
        (None, None) => bail!(
            "no target repository configured; pass --repo OWNER/REPO or create {}",
            default_config_path()?.display()
        ),
    };

    if args.email_required {
        config.email_required = true;
    }
    config.validate()?;
    Ok(config)
}

/// Demo host hook: attaches the tail of the newest log file so reports
/// carry recent diagnostics.
struct LogExcerptHost;

impl ReportHost for LogExcerptHost {
    fn save_extra_info(&mut self, extra: &mut ExtraInfo) {
        if let Some(excerpt) = read_log_excerpt() {
            extra.put(LOG_EXTRA_KEY, excerpt);
        }
    }
}

/// Tail of the most recent log file, if one exists.
///
/// Daily-rotated file names sort lexicographically by date, so the last
/// entry is the current file.
fn read_log_excerpt() -> Option<String> {
    let dir = logging::log_directory()?;
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .collect();
    files.sort_by_key(|entry| entry.file_name());

    let newest = files.pop()?;
    let contents = std::fs::read_to_string(newest.path()).ok()?;
    let lines: Vec<&str> = contents.lines().collect();
    let start = lines.len().saturating_sub(LOG_EXCERPT_LINES);
    let excerpt = lines[start..].join("\n");
    if excerpt.is_empty() {
        None
    } else {
        Some(excerpt)
    }
}
