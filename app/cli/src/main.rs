//! Command-line shell: load a saved bucket listing and print one folder page.

mod render;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, anyhow};
use bucket_core::log::{LogConfig, LogLevel};
use bucket_core::source::{FileKeySource, ReferenceBuilder};
use bucket_core::{Browser, BrowserConfig, BrowserView, NavigationPath, TreeBuilder};
use clap::{ArgAction, Parser};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "bucket-browser",
    version,
    about = "Browse an object-storage listing as folders"
)]
struct Args {
    /// Folder to open, e.g. `docs/2023`. Defaults to the root.
    #[arg(default_value = "")]
    route: String,

    /// Listing document: ListBucketResult XML, a JSON array or one key per line.
    #[arg(long)]
    listing: Option<PathBuf>,

    /// Config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL prepended to keys for download links.
    #[arg(long)]
    bucket_url: Option<String>,

    #[arg(long)]
    page_size: Option<NonZeroUsize>,

    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Only list files whose name contains this text.
    #[arg(long)]
    filter: Option<String>,

    /// Also write a rolling log file under the platform data directory.
    #[arg(long)]
    log_file: bool,

    /// Increase console log verbosity (-v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let console_level = match args.verbose {
        0 => LogLevel::WARN,
        1 => LogLevel::INFO,
        2 => LogLevel::DEBUG,
        _ => LogLevel::TRACE,
    };
    let log_config = if args.log_file {
        LogConfig { console_level, ..LogConfig::default() }
    } else {
        LogConfig::console_only(console_level)
    };
    if let Err(err) = bucket_core::log::init(log_config) {
        eprintln!("failed to initialise logging: {err:#}");
    }

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let mut config = BrowserConfig::load(args.config.as_deref()).context("loading config")?;
    if let Some(url) = args.bucket_url.clone() {
        config.bucket_url = Some(url);
    }
    if let Some(size) = args.page_size {
        config.page_size = size;
    }
    if let Some(path) = args.listing.clone() {
        config.listing = Some(path);
    }
    debug!(?config, "effective config");

    let source = config
        .listing_source()
        .ok_or_else(|| anyhow!("no listing given; pass --listing or set `listing` in the config"))?;

    let output = match config.bucket() {
        Some(bucket) => {
            browse(TreeBuilder::new().with_references(bucket), &config, &source, &args)
        }
        None => browse(TreeBuilder::new(), &config, &source, &args),
    };
    print!("{}", output.text);
    Ok(if output.ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

struct Output {
    text: String,
    ok: bool,
}

fn browse<R: ReferenceBuilder>(
    builder: TreeBuilder<R>,
    config: &BrowserConfig,
    source: &FileKeySource,
    args: &Args,
) -> Output {
    let mut browser = Browser::with_builder(builder, config.page_size);
    browser.refresh(source);
    browser.navigate(NavigationPath::parse_route(&args.route));
    if let Some(filter) = &args.filter {
        browser.set_filter(filter);
    }
    browser.set_page(args.page);

    let view = browser.view();
    let ok = matches!(view, BrowserView::Folder(_));
    Output { text: render::render(&view), ok }
}
