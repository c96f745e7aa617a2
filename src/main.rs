//! Command line front end of the Binet Fibonacci calculator.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::{Builder, Target};
use log::LevelFilter;

use fibonacci_binet::binet::{Rounding, MAX_EXACT_RANK};
use fibonacci_binet::fibonacci::exact_rank_limit;
use fibonacci_binet::menu::{nearest_lookup, rank_lookup, Console, Menu, Settings};

/// Rounding modes accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RoundingArg {
    /// Round to the nearest integer, halfway cases away from zero
    Nearest,
    /// Truncate toward zero, as the legacy calculator did
    Truncate,
}

impl From<RoundingArg> for Rounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::Nearest => Rounding::Nearest,
            RoundingArg::Truncate => Rounding::Truncate,
        }
    }
}

#[derive(Parser)]
#[command(name = "fibonacci-binet", author, version, about, long_about = None)]
struct Cli {
    /// Set log filter value [ off, error, warn, info, debug, trace ]
    #[arg(long)]
    #[arg(default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    /// Number of timed repetitions of each lookup, 0 disables timing
    #[arg(long, default_value_t = 10_000)]
    iterations: usize,

    /// Milliseconds an error message stays on screen in the interactive menu
    #[arg(long, default_value_t = 3000)]
    pause_ms: u64,

    /// How the closed form result is turned into an integer
    #[arg(long, value_enum, default_value_t = RoundingArg::Nearest)]
    rounding: RoundingArg,

    /// Never clear the screen
    #[arg(long)]
    no_clear: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Computes the Fibonacci numbers at the given comma separated ranks
    Rank {
        #[arg(allow_hyphen_values = true)]
        ranks: String,
    },
    /// Finds the Fibonacci number closest to a value and its neighbors
    Nearest {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Reports up to which rank the closed form matches the iterative sequence
    Verify {
        /// Highest rank to examine
        #[arg(long, default_value_t = 100)]
        max_rank: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .target(Target::Stderr)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let settings = Settings {
        iterations: args.iterations,
        pause: Duration::from_millis(args.pause_ms),
        rounding: args.rounding.into(),
    };
    log::debug!("running with {settings:?}");

    let stdout = io::stdout();
    match args.command {
        None => {
            let console = Console {
                clear_screen: !args.no_clear,
            };
            Menu::new(io::stdin().lock(), stdout.lock(), console, settings)
                .run()
                .context("interactive session failed")?;
        }
        Some(Commands::Rank { ranks }) => rank_lookup(&mut stdout.lock(), &ranks, &settings)?,
        Some(Commands::Nearest { value }) => {
            nearest_lookup(&mut stdout.lock(), &value, &settings)?
        }
        Some(Commands::Verify { max_rank }) => {
            let mut out = stdout.lock();
            writeln!(out, "Ranks are accepted up to {MAX_EXACT_RANK}.")?;
            for rounding in [Rounding::Nearest, Rounding::Truncate] {
                match exact_rank_limit(rounding, max_rank) {
                    Some(limit) => writeln!(
                        out,
                        "Rounding mode '{rounding}' is exact up to rank {limit}."
                    )?,
                    None => writeln!(out, "Rounding mode '{rounding}' is never exact.")?,
                }
            }
        }
    }

    Ok(())
}
