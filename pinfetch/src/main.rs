use clap::ArgMatches;
use colored::Colorize;
use commands::command_argument_builder;
use indicatif::{ProgressBar, ProgressStyle};
use pinfetch_core::download::DownloadProgressCallback;
use pinfetch_core::report::generate_run_report;
use pinfetch_core::{DiscoveredImage, Downloader, RunConfig, validate_board_url};
use pinfetch_scraper::{ContentLoader, ScrapeError, UrlResolver, WebDriverRenderer};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::Url;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    match chosen_command.subcommand() {
        Some(("run", primary_command)) => handle_run(primary_command, quiet).await,
        None => {} // No subcommand provided, just show the banner
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

fn print_banner() {
    println!(
        "{}",
        r#"
        _       ____     __       __
  ___  (_)___  / __/__  / /______/ /_
 / _ \/ / __ \/ /_/ _ \/ __/ ___/ __ \
/ .__/_/_/ /_/_/  \___/\__/\___/_/ /_/
/_/        board images, straight to disk
"#
        .bright_cyan()
    );
}

async fn handle_run(sub_matches: &ArgMatches, quiet: bool) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let board_url = sub_matches.get_one::<Url>("URL").unwrap();
    let output_arg = sub_matches.get_one::<String>("OUTPUT_DIR").unwrap();

    let config = match build_config(sub_matches) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{} {}", "✗".red().bold(), message);
            process::exit(1);
        }
    };

    // Reject a bad board URL before any browser work.
    if let Err(e) = validate_board_url(board_url.as_str(), &config.allowed_url_prefixes) {
        eprintln!("{} {}", "✗".red().bold(), e);
        process::exit(1);
    }

    let expanded_output = shellexpand::tilde(output_arg);
    let output_dir = PathBuf::from(expanded_output.as_ref());

    if !quiet {
        println!("Board: {}", board_url);
        println!("Output: {}", output_dir.display());
        println!("WebDriver: {}\n", config.webdriver_url);
    }

    let renderer = match WebDriverRenderer::connect(&config.webdriver_url, &config.image_host).await
    {
        Ok(renderer) => {
            renderer.with_settle_delay(Duration::from_millis(config.settle_delay_ms))
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            eprintln!("  Is chromedriver running at {}?", config.webdriver_url);
            process::exit(1);
        }
    };

    // Loading phase (may pause for a manual login and retry)
    let loader = ContentLoader::new()
        .with_max_scrolls(config.max_scrolls)
        .with_stable_rounds(config.stable_rounds)
        .with_settle_delay(Duration::from_millis(config.settle_delay_ms));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Loading board content...");

    let raw_urls = loop {
        match loader
            .load_all_image_urls(&renderer, board_url.as_str())
            .await
        {
            Ok(urls) => break urls,
            Err(ScrapeError::AuthenticationRequired) => {
                // Human-in-the-loop suspension point: the browser window is
                // open, the user logs in there, then resumes us.
                spinner.suspend(|| {
                    print!(
                        "\n{} Not logged in. Log in using the browser window, \
                         then press Enter to continue... ",
                        "[!]".yellow().bold()
                    );
                    io::stdout().flush().unwrap();
                    let mut response = String::new();
                    io::stdin().read_line(&mut response).unwrap();
                });
                spinner.set_message("Re-checking login and reloading board...");
            }
            Err(e) => {
                spinner.finish_and_clear();
                eprintln!("{} Failed to load board: {}", "✗".red().bold(), e);
                quit_renderer(renderer).await;
                process::exit(1);
            }
        }
    };
    spinner.finish_with_message(format!("Found {} image URLs", raw_urls.len()));

    // Resolving phase: pure string rewrites, never fails.
    let resolver = UrlResolver::new(config.low_res_tokens.clone(), config.high_res_token.clone());
    let images: Vec<DiscoveredImage> = raw_urls
        .iter()
        .map(|raw| DiscoveredImage {
            source_url: raw.clone(),
            resolved_url: resolver.resolve_high_res(raw),
        })
        .collect();

    if images.is_empty() {
        println!("{} No images found on this board.", "[!]".yellow().bold());
        quit_renderer(renderer).await;
        return;
    }

    // Downloading phase
    let bar = ProgressBar::new(images.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap(),
    );
    let bar_clone = bar.clone();
    let progress_callback: DownloadProgressCallback = Arc::new(move |done, _total, url| {
        bar_clone.set_position(done as u64 - 1);
        bar_clone.set_message(extract_url_path(&url));
    });

    let mut downloader = Downloader::new(&config).with_progress_callback(progress_callback);
    let summary = match downloader.download_all(&images, &output_dir).await {
        Ok(summary) => summary,
        Err(e) => {
            bar.finish_and_clear();
            eprintln!("{} Download failed: {}", "✗".red().bold(), e);
            quit_renderer(renderer).await;
            process::exit(1);
        }
    };
    bar.finish_and_clear();

    quit_renderer(renderer).await;

    println!("\n{}\n", "✓ Run complete!".green().bold());
    print!("{}", generate_run_report(&summary, &output_dir));
}

/// Apply flag overrides on top of the config file (or defaults).
fn build_config(sub_matches: &ArgMatches) -> Result<RunConfig, String> {
    let mut config = match sub_matches.get_one::<PathBuf>("config") {
        Some(path) => RunConfig::load(path).map_err(|e| e.to_string())?,
        None => RunConfig::default(),
    };

    if let Some(webdriver_url) = sub_matches.get_one::<String>("webdriver") {
        config.webdriver_url = webdriver_url.clone();
    }
    if let Some(max_scrolls) = sub_matches.get_one::<usize>("max-scrolls") {
        config.max_scrolls = *max_scrolls;
    }
    if let Some(delay_ms) = sub_matches.get_one::<u64>("delay-ms") {
        config.request_delay_ms = *delay_ms;
    }

    Ok(config)
}

/// Extract the path component from a URL for compact progress messages.
fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| u.path().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| url.to_string())
}

async fn quit_renderer(renderer: WebDriverRenderer) {
    if let Err(e) = renderer.quit().await {
        warn!("Failed to close browser session: {}", e);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
