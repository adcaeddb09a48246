use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, ArgAction, Parser};
use topo_graph::{build_graph, render_to, topo_order, BranchMap};
use topo_repo::Repository;

/// Print every commit reachable from a local branch, children before
/// parents, with sticky ends where adjacent lines are not parent-linked.
#[derive(Parser)]
#[command(name = "topo-order-commits", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Run as if started in <path>
    #[arg(short = 'C', value_name = "path")]
    change_dir: Option<PathBuf>,

    /// Use this git directory instead of searching for one
    #[arg(long = "git-dir", value_name = "path")]
    git_dir: Option<PathBuf>,

    /// Re-hash every object read and fail on a mismatch
    #[arg(long)]
    verify: bool,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn open_repo(cli: &Cli) -> Result<Repository> {
    if let Some(git_dir) = &cli.git_dir {
        return Ok(Repository::open(git_dir)?);
    }
    let start = match &cli.change_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };
    Ok(Repository::discover(&start)?)
}

fn run(cli: Cli) -> Result<i32> {
    let repo = open_repo(&cli)?;
    log::info!("using git dir {}", repo.git_dir().display());

    let branches: BranchMap = repo
        .branches()?
        .into_iter()
        .map(|b| (b.name, b.target))
        .collect();

    let mut store = repo.loose_store();
    store.set_verify(cli.verify);

    let (graph, roots) = build_graph(&store, &branches)?;
    let order = topo_order(&graph, &roots);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(&mut out, &order, &graph, &branches)?;
    out.flush()?;
    Ok(0)
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(128),
            }
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("fatal: {e}");
            process::exit(128);
        }
    }
}
