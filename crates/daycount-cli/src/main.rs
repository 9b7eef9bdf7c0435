mod render;

use std::fs;
use std::io::{self, IsTerminal, Read};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{ArgAction, Parser, Subcommand};
use daycount_engine::{parse_instant, Pivot, TimerSpec, TimerSummary};
use tracing::Level;

#[derive(Parser)]
#[command(name = "daycount", version, about = "Inspect countdown and count-up timers")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the breakdown and active message for one timer
    Show {
        /// Timer JSON file (reads stdin if `-`)
        input: String,

        /// Local instant to evaluate at, e.g. 2024-03-01T09:30 (defaults to now)
        #[arg(long, value_parser = parse_instant)]
        now: Option<NaiveDateTime>,

        /// Largest unit shown: 0 years, 1 months, 2 weeks, 3 days
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..4))]
        pivot: u8,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize a list of timers in whole days
    List {
        /// JSON array of timers (reads stdin if `-`)
        input: String,

        /// Local instant to evaluate at (defaults to now)
        #[arg(long, value_parser = parse_instant)]
        now: Option<NaiveDateTime>,

        /// Print the summaries as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Show {
            input,
            now,
            pivot,
            json,
        } => {
            let timer: TimerSpec =
                serde_json::from_str(&read_input(&input)?).context("invalid timer record")?;
            check_record(&timer);
            let pivot = Pivot::try_from(pivot)?;
            let view = timer.refresh(resolve_now(now), pivot);

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render::view(&view));
            }
        }
        Commands::List { input, now, json } => {
            let timers: Vec<TimerSpec> =
                serde_json::from_str(&read_input(&input)?).context("invalid timer list")?;
            let now = resolve_now(now);
            let summaries: Vec<TimerSummary> = timers
                .iter()
                .inspect(|timer| check_record(timer))
                .map(|timer| timer.summary(now))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for summary in &summaries {
                    println!("{}", render::summary_line(summary));
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

/// The core tolerates malformed records, so validation only warns.
fn check_record(timer: &TimerSpec) {
    if let Err(err) = timer.validate() {
        tracing::warn!(timer = %timer.name, %err, "timer record failed validation");
    }
}

fn resolve_now(now: Option<NaiveDateTime>) -> NaiveDateTime {
    now.unwrap_or_else(|| {
        let now = Local::now().naive_local();
        tracing::info!(%now, "using local clock");
        now
    })
}
