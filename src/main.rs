use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use steiner_apx::pace::{self, ParseError};
use steiner_apx::{Graph, Mehlhorn, MehlhornParams, SteinerError, TieBreak};
use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Approximates a minimum Steiner tree of a PACE 2018 graph and prints it as a PACE solution.
#[derive(Debug, Parser)]
#[command(name = "steiner-apx", version, about)]
struct Cli {
    /// Graph file in PACE format, read from stdin when omitted
    file: Option<PathBuf>,

    /// Order in which equally weighted edges are considered by the spanning tree passes
    #[arg(long, value_enum, default_value_t = TieBreakArg::Input)]
    tie_break: TieBreakArg,

    /// Keep non-terminal leaves in the output tree
    #[arg(long)]
    no_prune: bool,

    /// File with one 0 or 1 per line, marking the graph edges predicted to be in the tree
    #[arg(long, value_name = "FILE")]
    predictions: Option<PathBuf>,

    /// Trust in the predictions, greater than 1; predictions are trusted fully when omitted
    #[arg(long, requires = "predictions")]
    alpha: Option<f64>,

    /// Multiplier applied to edge weights when solving with predictions
    #[arg(long, value_name = "S", default_value_t = MehlhornParams::default().prediction_scale())]
    prediction_scale: u32,

    /// Log more to stderr (-v for debug, -vv for trace); overrides RUST_LOG when given
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TieBreakArg {
    Input,
    Endpoint,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Input => TieBreak::InputOrder,
            TieBreakArg::Endpoint => TieBreak::EndpointOrder,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("could not write solution: {0}")]
    Write(#[from] io::Error),
    #[error("invalid graph: {0}")]
    Graph(#[from] ParseError),
    #[error("invalid predictions in {path}: {source}")]
    Predictions { path: String, source: ParseError },
    #[error(transparent)]
    Steiner(#[from] SteinerError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Warning: Failed to initialize logging: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn log_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn init_tracing(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let filter = log_filter(verbose);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr)
                .with_ansi(false),
        )
        .try_init()?;
    Ok(())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let text = read_input(cli.file.as_deref())?;
    let graph: Graph<u64> = pace::parse_graph(&text)?;

    let params = MehlhornParams::builder()
        .tie_break(cli.tie_break.into())
        .prune(!cli.no_prune)
        .prediction_scale(cli.prediction_scale)
        .build();
    let solver = Mehlhorn::new(&graph, params);
    let tree = match &cli.predictions {
        Some(path) => {
            let predictions = read_predictions(path)?;
            solver.steiner_tree_with_predictions(&predictions, cli.alpha)?
        }
        None => solver.steiner_tree()?,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    pace::write_solution(&mut out, &tree)?;
    out.flush()?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| CliError::Read {
                    path: String::from("stdin"),
                    source,
                })?;
            Ok(text)
        }
    }
}

fn read_predictions(path: &Path) -> Result<Vec<bool>, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_predictions(&text).map_err(|source| CliError::Predictions {
        path: path.display().to_string(),
        source,
    })
}

/// One flag per non-blank line, `1` for a predicted edge and `0` otherwise.
fn parse_predictions(text: &str) -> Result<Vec<bool>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| match line.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(ParseError::new(
                n + 1,
                format!("expected '0' or '1' but got '{other}'"),
            )),
        })
        .collect()
}
