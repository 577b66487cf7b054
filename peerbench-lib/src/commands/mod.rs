//! Command-line parsing and dispatch.

mod categories;
mod common;
mod compare;
mod init;
mod modes;
mod rank;

use categories::{CategoriesArgs, list_categories};
use clap::{ArgAction, Parser, Subcommand};
use compare::{CompareArgs, compare_agencies};
use init::{InitArgs, init_config};
use log::LevelFilter;
use modes::{ModesArgs, break_down_modes};
use rank::{RankArgs, rank_agencies};
use std::ffi::OsString;
use std::io::Write;

/// The environment commands run in: where output goes and how the process ends.
pub trait Host {
    fn output(&mut self) -> impl Write;
    fn error(&mut self) -> impl Write;
    fn exit(&mut self, code: i32);
}

/// Find transit agencies similar to a home agency and compare their performance over time.
#[derive(Parser, Debug)]
#[command(name = "peerbench", version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank candidate peers by similarity to a home agency
    Rank(RankArgs),

    /// Compare a home agency with its peers year by year
    Compare(CompareArgs),

    /// Break a home agency and its peers down by mode, with national context
    Modes(ModesArgs),

    /// List the choices available to each filter
    Categories(CategoriesArgs),

    /// Write a default configuration file
    Init(InitArgs),
}

/// Parse `args` and run the selected command against `host`.
///
/// Usage errors exit with code 2 and command failures with code 1.
pub fn run<H, I, T>(host: &mut H, args: I)
where
    H: Host,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let rendered = e.render().to_string();
            let _ = if e.use_stderr() {
                write!(host.error(), "{rendered}")
            } else {
                write!(host.output(), "{rendered}")
            };
            host.exit(e.exit_code());
            return;
        }
    };

    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Rank(args) => rank_agencies(host, args),
        Command::Compare(args) => compare_agencies(host, args),
        Command::Modes(args) => break_down_modes(host, args),
        Command::Categories(args) => list_categories(host, args),
        Command::Init(args) => init_config(host, args),
    };

    if let Err(e) = result {
        let _ = writeln!(host.error(), "Error: {e:#}");
        host.exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // a logger may already be installed when run() is called more than once in a process
    let _ = env_logger::Builder::new().filter_level(level).parse_env("RUST_LOG").try_init();
}
