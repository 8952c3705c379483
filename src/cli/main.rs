/*!
A simple CLI interface to the library.

# Use

```sh
otter_prep [OPTIONS] file.cnf
```

Reads the formula, applies the full pipeline of procedures, and writes the simplified formula.

## Options

- `-v/--verbose <0..4>` sets the log level, from silent to debug; warnings are the default.
- `-o/--output <PATH>` names the output file, or a directory to place `<input stem>out.cnf` in.
- `-f/--force` overwrites an existing output file.
- `-i/--iterations <N>` bounds the iterative procedures.
- `--solver <CMD>` names the external solver command, and `--timeout <SECS>` bounds each call to it.

Procedures which need a solver verdict treat an unavailable or timed-out solver as answering *unknown*, so a run without a solver installed still shortens the formula --- it simply proves less.
*/

use std::{path::PathBuf, process::exit, rc::Rc, time::Duration};

use clap::Parser;

use otter_prep::{
    config::Config,
    formula::Formula,
    procedures::{
        BackboneSimplification, BipartitionAndElimination, OccurrenceSimplification, ProcedureManager,
        SelfSubsumingResolution, Vivification,
    },
    solvers::external::ExternalSolver,
};

#[derive(Parser)]
#[command(name = "otter_prep", version, about = "A preprocessor for CNF formulas, ahead of model counting.")]
struct Args {
    /// The DIMACS file to preprocess.
    input: PathBuf,

    /// Log level: 0 silent, 1 errors, 2 warnings, 3 info, 4 debug.
    #[arg(short = 'v', long = "verbose", default_value_t = 2)]
    verbose: u8,

    /// Output file, or directory to write <input stem>out.cnf into.
    #[arg(short = 'o', long = "output", default_value = "out.cnf")]
    output: PathBuf,

    /// Overwrite an existing output file.
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Bound on iterations of the iterative procedures.
    #[arg(short = 'i', long = "iterations", default_value_t = 10)]
    iterations: u32,

    /// The external solver command.
    #[arg(long = "solver", default_value = "clasp")]
    solver: String,

    /// Timeout, in seconds, of each solver call.
    #[arg(long = "timeout", default_value_t = 5)]
    timeout: u64,
}

fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

/// Entrypoint to the CLI.
fn main() {
    let args = Args::parse();

    env_logger::Builder::new().filter_level(log_level(args.verbose)).init();

    // In-flight work is discarded on an interrupt; output is only ever written whole, after
    // processing completes, so no partial file can appear.
    if let Err(e) = ctrlc::set_handler(|| {
        eprintln!("c Interrupted, discarding in-flight results");
        exit(130);
    }) {
        log::warn!("Couldn't install the interrupt handler: {e}");
    }

    let config = Config {
        iterations: args.iterations,
        solver_command: args.solver,
        solver_timeout: Duration::from_secs(args.timeout),
        ..Config::default()
    };

    println!("c Reading file \"{}\"", args.input.display());
    let mut formula = match Formula::from_dimacs_path(&args.input) {
        Ok(formula) => formula,
        Err(e) => {
            eprintln!("c {e}");
            exit(1);
        }
    };

    println!(
        "c CNF has {} variables ({} max), {} clauses and {} literals",
        formula.variables(),
        formula.max_variable(),
        formula.clause_count(),
        formula.literal_count()
    );

    if !formula.is_compressed() {
        println!("c Formula isn't compressed, compressing...");
        formula.compress();
    }

    let clauses_before = formula.clause_count();
    let literals_before = formula.literal_count();

    let solver = Rc::new(ExternalSolver::new(config.solver_command.clone()));

    let mut manager = ProcedureManager::new(
        config.iterations,
        config.min_literal_reduction,
        config.min_clause_reduction,
    );
    manager.add_one_time_procedure(Box::new(BackboneSimplification::new(
        solver.clone(),
        config.solver_timeout,
    )));
    manager.add_one_time_procedure(Box::new(BipartitionAndElimination::new(
        solver.clone(),
        config.solver_timeout,
        config.max_resolution_count,
    )));
    manager.add_iterative_procedure(Box::new(Vivification::new()));
    manager.add_iterative_procedure(Box::new(OccurrenceSimplification::new()));
    manager.add_iterative_procedure(Box::new(SelfSubsumingResolution::new()));

    manager.apply(&mut formula);

    println!(
        "c CNF has {} variables ({} max), {} clauses and {} literals",
        formula.variables(),
        formula.max_variable(),
        formula.clause_count(),
        formula.literal_count()
    );
    println!(
        "c Removed {} clauses and {} literals",
        clauses_before.saturating_sub(formula.clause_count()),
        literals_before.saturating_sub(formula.literal_count())
    );
    println!("c The formula is at least {} to the input", formula.equivalence());

    match formula.write_dimacs_path(&args.output, args.force) {
        Ok(path) => println!("c Wrote \"{}\"", path.display()),
        Err(e) => {
            eprintln!("c {e}");
            exit(2);
        }
    }
}
