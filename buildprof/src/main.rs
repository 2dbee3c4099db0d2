mod commands;
mod formatting;

use std::path::PathBuf;

use anyhow::Result;
use buildprof_core::config::CONFIG_FILE_NAME;
use buildprof_core::{ProfilerConfig, SortKey, Timestamp};
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "buildprof")]
#[command(about = "Per-target build timing analysis: total, self and waiting time")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, action)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Record the start of a target
    Start {
        target: String,
        #[arg(long)]
        times: PathBuf,
        #[arg(long)]
        tech: Option<String>,
        /// Timestamp in milliseconds; defaults to the configured clock
        #[arg(long)]
        at: Option<Timestamp>,
    },
    /// Record the end of a started target
    End {
        target: String,
        #[arg(long)]
        times: PathBuf,
        #[arg(long)]
        at: Option<Timestamp>,
    },
    /// Derive and show per-target build times
    Analyze {
        #[arg(long)]
        times: PathBuf,
        #[arg(long)]
        graph: Option<PathBuf>,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        #[arg(long)]
        top: Option<usize>,
        #[arg(long, action)]
        json: bool,
        /// Write the derived fields back into the timing file
        #[arg(long, action)]
        write: bool,
    },
    /// Show build times aggregated by technology
    Techs {
        #[arg(long)]
        times: PathBuf,
        #[arg(long)]
        graph: Option<PathBuf>,
        #[arg(long, action)]
        json: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum SortArg {
    #[value(name = "self")]
    SelfTime,
    #[value(name = "total")]
    TotalTime,
    #[value(name = "waiting")]
    WaitingTime,
    Name,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::SelfTime => SortKey::SelfTime,
            SortArg::TotalTime => SortKey::TotalTime,
            SortArg::WaitingTime => SortKey::WaitingTime,
            SortArg::Name => SortKey::Name,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = ProfilerConfig::load(&cli.config)?;

    match cli.command {
        Commands::Start {
            target,
            times,
            tech,
            at,
        } => commands::cmd_start(times, target, tech, at, config.clock)?,
        Commands::End { target, times, at } => commands::cmd_end(times, target, at, config.clock)?,
        Commands::Analyze {
            times,
            graph,
            sort,
            top,
            json,
            write,
        } => {
            let sort = sort.map(SortKey::from).unwrap_or(config.report.sort);
            let top = top.or(config.report.top);
            commands::cmd_analyze(times, graph, sort, top, json, write)?
        }
        Commands::Techs { times, graph, json } => commands::cmd_techs(times, graph, json)?,
    }

    Ok(())
}
