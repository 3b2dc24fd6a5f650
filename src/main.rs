//! # two-sat-solver
//!
//! Command-line front end for the 2-SAT solver. It solves:
//!
//! -   single DIMACS files (`file --path <P>`), restricted to clauses of one or two literals,
//! -   DIMACS text given on the command line (`text --input "1 -2 0 2 3 0"`),
//! -   multi-instance batch files (`batch --path <P>`), writing a CSV or table report with
//!     per-instance timing and a closing summary row,
//! -   every `.cnf` file in a directory (`two-sat-solver <DIR>`).
//!
//! `generate` writes random instances in the batch format and `completions` prints a shell
//! completion script.
//!
//! ## Usage
//!
//! ```sh
//! two-sat-solver file --path problems/simple.cnf --print-solution
//! two-sat-solver batch --path 2SAT.cnf --output 2SAT_results.csv
//! two-sat-solver generate --vars 100 --clauses 180 --count 20 --seed 7 --label
//! ```
//!
//! Logging goes through `env_logger`: warnings by default, debug output with `--debug`, and
//! `RUST_LOG` overrides both.

mod command_line;

use crate::command_line::cli::{
    Cli, Commands, generate_instances, print_completions, solve_batch, solve_file, solve_path,
    solve_text,
};
use clap::{CommandFactory, Parser};
use env_logger::Builder;
use log::{LevelFilter, error};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Batch {
            path,
            output,
            format,
            common,
        }) => solve_batch(&path, output.as_deref(), format, &common),
        Some(Commands::Generate {
            vars,
            clauses,
            count,
            seed,
            planted,
            label,
            output,
            ..
        }) => generate_instances(vars, clauses, count, seed, planted, label, output.as_deref()),
        Some(Commands::Completions { shell }) => {
            print_completions(shell);
            Ok(())
        }
        None => match cli.input {
            Some(path) => solve_path(&path, &cli.common),
            None => {
                Cli::command().print_help()?;
                std::process::exit(2);
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.common().debug);

    if let Err(err) = run(cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}
