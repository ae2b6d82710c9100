use clap::{Arg, ArgAction, Command};
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing::{debug, info, warn, Level};

use notifyi::alerting::Alerter;
use notifyi::bot::{Bot, ChatWriter};
use notifyi::config::Config;
use notifyi::parsing;
use notifyi::transcript;
use notifyi::watch;

mod output;
mod problem;

use output::Style;

const DEFAULT_CONFIG: &str = "config.json";

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("notifyi")
        .version(VERSION)
        .propagate_version(true)
        .about("Watch an ssh-chat room, raise alerts on keywords, and answer private messages.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print debug messages as lines are scanned and classified."),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify each line of a saved transcript")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit one JSON object per classified line."),
                )
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for highlighting even if output is redirected to a pipe or file."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The transcript to read, or '-' for standard input."),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Follow a chat session, alerting on keywords and answering private messages")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Location of the configuration file [default: config.json]"),
                )
                .arg(
                    Arg::new("filename")
                        .default_value("-")
                        .help("The session output to read. Replies are written to standard output."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match matches.subcommand() {
        Some(("classify", submatches)) => {
            let style = if submatches.get_flag("json") {
                Style::Json
            } else if submatches.get_flag("raw-control-chars") || io::stdout().is_terminal() {
                Style::Colour
            } else {
                Style::Plain
            };

            // required argument, so clap has already insisted it be present
            let filename = submatches
                .get_one::<String>("filename")
                .map(String::as_str)
                .unwrap_or("-");

            classify(Path::new(filename), style);
        }
        Some(("watch", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .map(String::as_str)
                .unwrap_or("-");

            let config = submatches
                .get_one::<String>("config")
                .map(String::as_str);

            watch(Path::new(filename), config);
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: notifyi [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn classify(filename: &Path, style: Style) {
    let mut transcript = match transcript::open(filename) {
        Ok(transcript) => transcript,
        Err(error) => {
            eprintln!("{}", problem::full_loading_error(&error));
            std::process::exit(1);
        }
    };

    let mut unrecognized = 0;

    loop {
        let line = match transcript.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                eprintln!(
                    "{}: {}: {}",
                    "error".bright_red(),
                    filename.display(),
                    error
                );
                std::process::exit(1);
            }
        };
        let number = transcript::Transcript::count(&transcript);

        if line
            .trim()
            .is_empty()
        {
            continue;
        }

        match parsing::classify(&line) {
            Ok(message) => println!("{}", output::render(number, &message, style)),
            Err(failure) => {
                unrecognized += 1;
                match parsing::diagnose(failure.line) {
                    Some((rule, error)) => eprintln!(
                        "{}",
                        problem::full_unrecognized(filename, number, failure.line, rule, &error)
                    ),
                    None => eprintln!(
                        "{}",
                        problem::concise_unrecognized(filename, number, failure.line)
                    ),
                }
            }
        }
    }

    debug!(
        "Read {} line{}, {} unrecognized",
        transcript::Transcript::count(&transcript),
        if transcript::Transcript::count(&transcript) == 1 { "" } else { "s" },
        unrecognized
    );
}

fn watch(filename: &Path, config: Option<&str>) {
    let config = match config {
        Some(location) => load_config(Path::new(location)),
        None => {
            let location = Path::new(DEFAULT_CONFIG);
            if location.exists() {
                load_config(location)
            } else {
                info!("No {} found, running without mentions", DEFAULT_CONFIG);
                Config::default()
            }
        }
    };

    let alerter = match Alerter::new(&config) {
        Ok(alerter) => alerter,
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            std::process::exit(1);
        }
    };

    let mut transcript = match transcript::open(filename) {
        Ok(transcript) => transcript,
        Err(error) => {
            eprintln!("{}", problem::full_loading_error(&error));
            std::process::exit(1);
        }
    };

    let mut bot = Bot::new(&config.name, ChatWriter::new(io::stdout()));

    info!("Watching as {}", config.name);

    match watch::run(&mut transcript, &alerter, &mut bot) {
        Ok(summary) => {
            info!(
                lines = summary.lines,
                unrecognized = summary.unrecognized,
                alerts = summary.alerts,
                "End of transcript"
            );
        }
        Err(error) => {
            warn!("Read failed: {}", error);
            std::process::exit(1);
        }
    }
}

fn load_config(location: &Path) -> Config {
    match Config::load(location) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", problem::full_loading_error(&error));
            std::process::exit(1);
        }
    }
}
