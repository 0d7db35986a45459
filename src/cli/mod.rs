//! CLI mode - interactive preview and download of a share link.

mod progress;

use std::path::PathBuf;

use console::Term;

use crate::config::AppConfig;
use crate::client::GofileClient;
use crate::download::{Downloader, HttpFetcher};
use crate::error::Error;
use crate::session::{DownloadScope, PreviewSession, SessionPhase};

pub use progress::CliProgress;

/// Parsed CLI-mode arguments.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Share URL (or bare content identifier).
    pub url: String,
    /// Download directory override.
    pub output: Option<PathBuf>,
    /// Password supplied up front, skipping the first prompt.
    pub password: Option<String>,
    /// File identifiers scoping the download to a selection.
    pub select: Vec<String>,
    /// Print the listing and exit without downloading.
    pub list_only: bool,
    /// Overwrite existing files.
    pub force: bool,
}

/// Parses CLI-mode arguments from the raw argument list.
///
/// # Errors
///
/// Returns a usage message when an option is unknown, a value is missing,
/// or no share URL is given.
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut url: Option<String> = None;
    let mut output = None;
    let mut password = None;
    let mut select = Vec::new();
    let mut list_only = false;
    let mut force = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                let value = args.get(i).ok_or("--output requires a value")?;
                output = Some(PathBuf::from(value));
            }
            "-p" | "--password" => {
                i += 1;
                let value = args.get(i).ok_or("--password requires a value")?;
                password = Some(value.clone());
            }
            "-s" | "--select" => {
                i += 1;
                let value = args.get(i).ok_or("--select requires a value")?;
                select.extend(
                    value
                        .split(',')
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
            }
            "-l" | "--list" => list_only = true,
            "-f" | "--force" => force = true,
            s if s.starts_with('-') => return Err(format!("unknown option: {s}")),
            s => {
                if url.is_some() {
                    return Err("only one share URL may be given".to_string());
                }
                url = Some(s.to_string());
            }
        }
        i += 1;
    }

    Ok(CliArgs {
        url: url.ok_or("no share URL given")?,
        output,
        password,
        select,
        list_only,
        force,
    })
}

fn prompt_password(term: &Term, previous_error: Option<&str>) -> crate::Result<String> {
    if !term.is_term() {
        return Err(Error::Download(
            "password required but no terminal is available for the prompt".to_string(),
        ));
    }
    if let Some(message) = previous_error {
        term.write_line(message)?;
    }
    term.write_str("Password: ")?;
    Ok(term.read_secure_line()?)
}

/// Runs the CLI flow: fetch, password loop, listing, sequential download.
///
/// # Errors
///
/// Returns an error when the fetch fails terminally or a download aborts
/// the sequence.
pub async fn run(config: AppConfig, args: CliArgs) -> crate::Result<()> {
    let client = GofileClient::new()?;
    let term = Term::stderr();
    let mut session = PreviewSession::new();
    let mut password = args.password.clone();

    session.begin_fetch();
    let mut outcome = client.fetch_contents(&args.url, password.as_deref()).await;

    loop {
        session.resolve(outcome);
        match session.phase().clone() {
            SessionPhase::Ready => break,
            SessionPhase::AwaitingPassword { error } => {
                let pw = prompt_password(&term, error.as_deref())?;
                password = Some(pw);
                session.begin_password_fetch();
                outcome = client.fetch_contents(&args.url, password.as_deref()).await;
            }
            SessionPhase::Error(message) => {
                return Err(Error::Download(format!(
                    "failed to fetch listing: {message}"
                )));
            }
            SessionPhase::Idle | SessionPhase::Loading => {
                unreachable!("resolve always leaves the loading phase")
            }
        }
    }

    for id in &args.select {
        if !session.toggle_select(id) {
            log::warn!("unknown file id in --select: {id}");
        }
    }
    if !args.select.is_empty() && session.selected_count() == 0 {
        return Err(Error::Download(
            "none of the --select ids matched a listed file".to_string(),
        ));
    }

    progress::print_file_list(session.files());

    if args.list_only {
        return Ok(());
    }

    let items = session.download_items();
    if items.is_empty() {
        println!("Nothing to download.");
        return Ok(());
    }

    let mut download_config = config.download.clone();
    if args.force {
        download_config.force_overwrite = true;
    }

    let mut fetcher = HttpFetcher::new(client.http());
    if let Some(endpoint) = &download_config.token_endpoint {
        match client.fetch_token(endpoint).await {
            Ok(token) => fetcher = fetcher.with_bearer(token),
            Err(e) => log::warn!("token fetch from {endpoint} failed: {e}"),
        }
    }

    let scope_label = match session.scope() {
        DownloadScope::Selected => "selected",
        DownloadScope::All => "all",
    };
    println!("Downloading {} file(s) ({scope_label})...", items.len());

    let dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.paths.download_dir.clone());
    let downloader = Downloader::new(fetcher, download_config, dir);

    let cli_progress = CliProgress::new(items.len() as u64);
    let result = downloader.download_all(&items, &cli_progress).await;
    cli_progress.finish();
    let stats = result?;

    progress::print_summary(&stats);
    Ok(())
}
