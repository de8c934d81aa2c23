use clap::Parser;
use post_history_config::{HostGlobals, default_path, load};
use post_history_core::{History, Page};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Replay a post history session against a saved page.
///
/// Reads the page, picks up the host globals from its inline scripts (and
/// from a globals file or `POST_HISTORY_*` environment variables), clicks
/// "load more" the requested number of times, optionally switches to a
/// revision, and prints the resulting markup.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// HTML of the page to run against.
    #[arg(long, value_name = "FILE")]
    page: PathBuf,
    /// Globals file (JSON, TOML or YAML). Defaults to the user config file, if present.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Number of times to click the load-more button.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pages: u32,
    /// Revision to show a diff for, once loading has finished.
    #[arg(long, value_name = "ID")]
    select: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let html = match std::fs::read_to_string(&cli.page) {
        Ok(html) => html,
        Err(err) => {
            tracing::error!(path = %cli.page.display(), error = %err, "Unable to read page");
            return ExitCode::FAILURE;
        },
    };
    let page = Page::parse(&html);

    let file = cli.config.clone().or_else(|| default_path().filter(|path| path.is_file()));
    let scripts = page.inline_scripts();
    let globals = match load(file.as_deref(), HostGlobals::from_scripts(scripts.iter().map(String::as_str))) {
        Ok(globals) => globals,
        Err(err) => {
            tracing::error!(error = ?err, "Unable to load host globals");
            return ExitCode::FAILURE;
        },
    };

    let Some(history) = History::init(&globals, &page) else {
        tracing::info!("Post history is not enabled for this page");
        return ExitCode::SUCCESS;
    };

    if let Some(load_more) = history.load_more() {
        for _ in 0..cli.pages {
            if load_more.click().await.is_none() {
                break;
            }
        }
    }
    if let Some(id) = cli.select {
        let id = id.into();
        let switched = match history.picker() {
            Some(picker) => picker.select(id),
            None => history.switch_to(id),
        };
        if !switched {
            tracing::warn!(%id, "Revision not loaded; nothing to show");
        }
    }

    if let Some(container) = history.container() {
        println!("{}", container.to_html());
    }
    if let Some(picker) = history.picker() {
        println!("{}", picker.to_html());
    }
    if let Some(load_more) = history.load_more() {
        println!("{}", load_more.button().to_html());
    }
    ExitCode::SUCCESS
}
