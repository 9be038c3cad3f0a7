use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("pinfetch")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("pinfetch")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("run")
                .about(
                    "Scrape a board page in a browser session and download every \
                discovered image, deduplicated, to a local folder.",
                )
                .arg(
                    arg!(<URL>)
                        .help("The board URL to scrape")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(arg!(<OUTPUT_DIR>).help("Directory to write downloaded images into"))
                .arg(
                    arg!(-w --"webdriver" <URL>)
                        .required(false)
                        .help("WebDriver endpoint of a running chromedriver (default: http://localhost:9515)"),
                )
                .arg(
                    arg!(-c --"config" <PATH>)
                        .required(false)
                        .help("Path to a TOML config file overriding the built-in defaults")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"max-scrolls" <N>)
                        .required(false)
                        .help("Upper bound on scroll iterations while loading the board")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"delay-ms" <MS>)
                        .required(false)
                        .help("Delay between image requests in milliseconds")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
}
