#![allow(clippy::cast_precision_loss)]

use anyhow::{Context, bail};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use two_sat_solver::batch::run_batch;
use two_sat_solver::report::table::format_stat_line;
use two_sat_solver::report::{BatchSummary, ReportFormat};
use two_sat_solver::sat::batch_format::{looks_like_batch, parse_batch_file, write_batch};
use two_sat_solver::sat::dimacs::{parse_dimacs_str, parse_file};
use two_sat_solver::sat::generator::{GeneratorConfig, generate_batch};
use two_sat_solver::sat::instance::{ExpectedAnswer, Instance};
use two_sat_solver::sat::solver::{Solution, SolveStats, TwoSat};

/// Command-line interface for the 2-SAT solver.
#[derive(Parser, Debug)]
#[command(
    name = "two-sat-solver",
    version,
    about = "A 2-SAT solver based on strongly connected components",
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// A file or directory to solve without a subcommand. A directory solves every DIMACS
    /// `.cnf` file inside it; a file is read as a batch file if its first data line holds a
    /// comma, and as DIMACS otherwise.
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub common: CommonOptions,
}

impl Cli {
    /// The options that apply to the requested command.
    pub(crate) fn common(&self) -> &CommonOptions {
        match &self.command {
            Some(
                Commands::File { common, .. }
                | Commands::Text { common, .. }
                | Commands::Batch { common, .. }
                | Commands::Generate { common, .. },
            ) => common,
            Some(Commands::Completions { .. }) | None => &self.common,
        }
    }
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a 2-CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a 2-CNF formula given as DIMACS text.
    Text {
        /// Clauses as literals terminated by 0, e.g. "1 -2 0 2 3 0". A literal `\n` is read as
        /// a line break.
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every instance of a multi-instance batch file.
    Batch {
        /// Path to the batch file.
        #[arg(long)]
        path: PathBuf,

        /// Write the report here instead of standard output.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Write random 2-SAT instances in the batch format.
    Generate {
        /// Variables per instance.
        #[arg(long)]
        vars: usize,

        /// Clauses per instance.
        #[arg(long)]
        clauses: usize,

        /// Number of instances.
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Seed for reproducible output. A random seed is used if omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// Only emit clauses satisfied by a hidden assignment.
        #[arg(long, default_value_t = false)]
        planted: bool,

        /// Solve each instance and record its answer in the `c` line.
        #[arg(long, default_value_t = false)]
        label: bool,

        /// Write the instances here instead of standard output.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Log at debug level (`RUST_LOG` still takes precedence).
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check every model against the clauses it claims to satisfy.
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and graph statistics after solving a single instance.
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print the satisfying assignment.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,
}

/// Solves a file or directory given without a subcommand.
///
/// # Errors
///
/// If the path cannot be read, does not parse, or yields a model that fails verification.
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    if path.is_dir() {
        return solve_dir(path, common);
    }

    let time = Instant::now();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if looks_like_batch(&text) {
        debug!("{} looks like a batch file", path.display());
        return solve_batch(path, None, ReportFormat::default(), common);
    }

    let instance = parse_dimacs_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    solve_and_report(&instance, common, Some(path), time.elapsed())
}

/// Solves every DIMACS `.cnf` file under `path`, recursively.
///
/// # Errors
///
/// If `path` is not a directory, or on the first file that fails to parse or verify.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    if !path.is_dir() {
        bail!("provided path is not a directory: {}", path.display());
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            debug!("skipping non-CNF file: {}", file_path.display());
            continue;
        }

        solve_file(file_path, common)?;
    }

    Ok(())
}

/// Parses and solves one DIMACS file.
///
/// # Errors
///
/// If the file cannot be parsed or its model fails verification.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    let time = Instant::now();
    let instance =
        parse_file(path).with_context(|| format!("failed to parse {}", path.display()))?;
    let elapsed = time.elapsed();

    solve_and_report(&instance, common, Some(path), elapsed)
}

/// Solves a DIMACS formula given on the command line.
///
/// # Errors
///
/// If the text does not parse or its model fails verification.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> anyhow::Result<()> {
    let time = Instant::now();
    let instance = parse_dimacs_str(&input.replace("\\n", "\n")).context("failed to parse input")?;
    let elapsed = time.elapsed();

    solve_and_report(&instance, common, None, elapsed)
}

/// Checks a model against the instance.
///
/// # Errors
///
/// If the model falsifies a clause.
pub(crate) fn verify_solution(instance: &Instance, solution: &Solution) -> anyhow::Result<()> {
    if let Some(model) = solution.model() {
        let violated = instance.first_violated(model);
        println!("Verified: {:?}", violated.is_none());
        if let Some(clause) = violated {
            bail!("solution failed verification: clause {clause} is falsified");
        }
    }
    Ok(())
}

/// Solves one instance and prints the outcome, plus statistics and the model as configured.
///
/// # Errors
///
/// If the instance mentions variables beyond its header, or its model fails verification.
pub(crate) fn solve_and_report(
    instance: &Instance,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> anyhow::Result<()> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }
    debug!(
        "Variables: {}, Clauses: {}",
        instance.num_vars,
        instance.num_clauses()
    );

    let solver = TwoSat::from_instance(instance).context("invalid instance")?;

    let time = Instant::now();
    let (solution, solve_stats) = solver.solve_with_stats();
    let elapsed = time.elapsed();
    let memory = memory_usage();

    debug!("Solution: {solution:?}");
    debug!("Time: {elapsed:?}");

    if common.verify {
        verify_solution(instance, &solution)?;
    }

    if common.stats {
        print_stats(parse_time, elapsed, &solve_stats, memory);
    }

    if let Some(model) = solution.model() {
        if common.print_solution {
            println!("Solution: {model}");
        }
    }
    println!("\n{}", solution.status());

    Ok(())
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
pub(crate) fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("{}", format_stat_line(label, value));
}

pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    s: &SolveStats,
    memory: Option<(f64, f64)>,
) {
    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", s.variables);
    stat_line("Clauses", s.clauses);
    stat_line("Literals", 2 * s.variables);

    println!("=========================[ Graph Statistics ]========================");
    stat_line("Implications", s.implications);
    stat_line("Components", s.components);
    stat_line("Largest component", s.largest_component);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("Solve time (s)", format!("{:.6}", elapsed.as_secs_f64()));
    println!("=====================================================================");
}

fn write_report<W: Write>(
    out: W,
    label: &str,
    instances: &[Instance],
    format: ReportFormat,
    verify: bool,
) -> anyhow::Result<BatchSummary> {
    let mut writer = format.to_impl(out);
    Ok(run_batch(label, instances, &mut writer, verify)?)
}

/// Solves every instance in a batch file and writes the report.
///
/// # Errors
///
/// If the batch file does not parse or the report cannot be written. Instances that cannot
/// be built or whose model fails verification are reported, not returned as errors.
pub(crate) fn solve_batch(
    path: &Path,
    output: Option<&Path>,
    format: ReportFormat,
    common: &CommonOptions,
) -> anyhow::Result<()> {
    let instances =
        parse_batch_file(path).with_context(|| format!("failed to parse {}", path.display()))?;
    let label = path
        .file_stem()
        .map_or_else(|| "batch".to_string(), |stem| stem.to_string_lossy().into_owned());
    info!("{}: {} instances", path.display(), instances.len());

    let summary = match output {
        Some(out_path) => {
            let file = File::create(out_path)
                .with_context(|| format!("failed to create {}", out_path.display()))?;
            write_report(BufWriter::new(file), &label, &instances, format, common.verify)?
        }
        None => write_report(io::stdout().lock(), &label, &instances, format, common.verify)?,
    };

    if summary.rejected > 0 {
        warn!("{} of {} instances rejected", summary.rejected, summary.total);
    }
    if summary.incorrect() > 0 {
        warn!(
            "{} of {} provided answers contradicted",
            summary.incorrect(),
            summary.answers_provided
        );
    }
    Ok(())
}

/// Writes random instances in the batch format.
///
/// # Errors
///
/// If the output cannot be written.
pub(crate) fn generate_instances(
    vars: usize,
    clauses: usize,
    count: usize,
    seed: Option<u64>,
    planted: bool,
    label: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let config = GeneratorConfig::new(vars, clauses).planted(planted);
    let mut instances = generate_batch(&config, &mut rng, count);

    if label {
        for instance in &mut instances {
            let solution = TwoSat::from_instance(instance)
                .context("generated an invalid instance")?
                .solve();
            instance.expected = ExpectedAnswer::from(solution.status());
        }
    }
    info!("generated {count} instances of {vars} variables and {clauses} clauses");

    match output {
        Some(out_path) => {
            let file = File::create(out_path)
                .with_context(|| format!("failed to create {}", out_path.display()))?;
            write_batch(BufWriter::new(file), &instances)?;
        }
        None => write_batch(io::stdout().lock(), &instances)?,
    }
    Ok(())
}

pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_path() {
        let cli = Cli::try_parse_from(["two-sat-solver", "problems/"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("problems/")));
        assert!(cli.command.is_none());
        assert!(cli.common().verify);
        assert!(cli.common().stats);
    }

    #[test]
    fn test_batch_options() {
        let cli = Cli::try_parse_from([
            "two-sat-solver",
            "batch",
            "--path",
            "2SAT.cnf",
            "--format",
            "table",
            "--verify",
            "false",
            "-d",
        ])
        .unwrap();

        match &cli.command {
            Some(Commands::Batch {
                path,
                output,
                format,
                ..
            }) => {
                assert_eq!(path, &PathBuf::from("2SAT.cnf"));
                assert!(output.is_none());
                assert_eq!(*format, ReportFormat::Table);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(!cli.common().verify);
        assert!(cli.common().debug);
    }

    #[test]
    fn test_generate_options() {
        let cli = Cli::try_parse_from([
            "two-sat-solver",
            "generate",
            "--vars",
            "10",
            "--clauses",
            "20",
            "--seed",
            "3",
            "--planted",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Some(Commands::Generate {
                vars: 10,
                clauses: 20,
                count: 1,
                seed: Some(3),
                planted: true,
                label: false,
                ..
            })
        ));
    }

    #[test]
    fn test_solve_files() {
        let dir = tempfile::tempdir().unwrap();
        let common = CommonOptions {
            debug: false,
            verify: true,
            stats: false,
            print_solution: true,
        };

        std::fs::write(dir.path().join("a.cnf"), "p cnf 2 2\n1 2 0\n-1 -2 0\n").unwrap();
        std::fs::write(dir.path().join("b.cnf"), "p cnf 1 2\n1 0\n-1 0\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a formula").unwrap();
        assert!(solve_dir(dir.path(), &common).is_ok());
        assert!(solve_path(dir.path(), &common).is_ok());

        let batch = dir.path().join("set.txt");
        std::fs::write(&batch, "c,1,1,S\np,cnf,1,1\n1,1,0\n").unwrap();
        let report = dir.path().join("set.csv");
        solve_batch(&batch, Some(&report), ReportFormat::Csv, &common).unwrap();
        let text = std::fs::read_to_string(&report).unwrap();
        assert!(text.lines().last().is_some_and(|l| l == "set,1,1,0,1,1,0"));

        assert!(solve_dir(&batch, &common).is_err());
        assert!(solve_text("1 2 0\\n-1 0", &common).is_ok());
        assert!(solve_text("1 2 3 0", &common).is_err());
    }

    #[test]
    fn test_generate_then_solve() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("gen.cnf");
        generate_instances(8, 12, 3, Some(11), false, true, Some(&out)).unwrap();

        let instances = parse_batch_file(&out).unwrap();
        assert_eq!(instances.len(), 3);
        assert!(instances.iter().all(|i| i.expected.is_provided()));
    }
}
