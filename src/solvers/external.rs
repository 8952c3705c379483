/*!
A solver invoked as an external process.

The formula is written to a scratch DIMACS file in the system temporary directory, the configured command is run against it, and the combined output is parsed for the conventional markers:

- `s SATISFIABLE`, with the model on `v ` lines.
- `s UNSATISFIABLE`.
- `INTERRUPTED`, on a timeout or signal.

A run without a parseable verdict --- including a launch failure or a non-zero exit --- is treated the same as a timeout.

The command is invoked in the style of clasp: `<command> 1 [-q] --time-limit=<seconds> <file>`, requesting a single model and bounding the search by the caller's timeout.
The scratch file is removed on every path out of a call.
*/

use std::{io::Write, process::Command, time::Duration};

use crate::{
    formula::Formula,
    misc::log::targets,
    solvers::{ModelResult, Solver, Verdict},
    structures::model::Model,
};

/// A solver which marshals formulas to an external command.
pub struct ExternalSolver {
    command: String,
}

impl ExternalSolver {
    /// A solver invoking the given command.
    pub fn new(command: impl Into<String>) -> Self {
        let solver = ExternalSolver { command: command.into() };
        log::debug!(target: targets::SOLVER, "Solver \"{}\" has been initialized", solver.command);
        solver
    }

    /// Writes the formula to a scratch file and runs the command against it, returning the combined output.
    ///
    /// The `quiet` switch suppresses the model, for calls which need only a verdict.
    fn execute(&self, formula: &mut Formula, timeout: Duration, quiet: bool) -> Option<String> {
        let mut scratch = match tempfile::Builder::new().prefix("otter_prep_").suffix(".cnf").tempfile() {
            Ok(file) => file,
            Err(_) => {
                log::error!(target: targets::SOLVER, "Couldn't create a scratch file for the solver");
                return None;
            }
        };

        if scratch.write_all(formula.as_dimacs().as_bytes()).is_err() {
            log::error!(target: targets::SOLVER, "Couldn't write the formula to {}", scratch.path().display());
            return None;
        }

        let mut command = Command::new(&self.command);
        command.arg("1");
        if quiet {
            command.arg("-q");
        }
        command.arg(format!("--time-limit={}", timeout.as_secs().max(1)));
        command.arg(scratch.path());

        log::debug!(target: targets::SOLVER, "Executing {command:?}");

        // The scratch file is removed when `scratch` drops, on every path out.
        match command.output() {
            Ok(output) => {
                let mut solution = String::from_utf8_lossy(&output.stdout).into_owned();
                solution.push_str(&String::from_utf8_lossy(&output.stderr));
                Some(solution)
            }
            Err(_) => {
                log::error!(target: targets::SOLVER, "Couldn't execute solver \"{}\"", self.command);
                None
            }
        }
    }
}

impl Solver for ExternalSolver {
    fn name(&self) -> &str {
        &self.command
    }

    fn is_satisfiable(&self, formula: &mut Formula, timeout: Duration) -> Verdict {
        log::debug!(target: targets::SOLVER, "Satisfiability check using solver {}", self.command);

        let Some(solution) = self.execute(formula, timeout, true) else {
            return Verdict::Unknown;
        };

        if solution.contains("s SATISFIABLE") {
            Verdict::Satisfiable
        } else if solution.contains("s UNSATISFIABLE") {
            Verdict::Unsatisfiable
        } else if solution.contains("INTERRUPTED") {
            log::debug!(target: targets::SOLVER, "Solver timed out or was otherwise interrupted");
            Verdict::Unknown
        } else {
            log::warn!(target: targets::SOLVER, "Unexpected solution from solver");
            Verdict::Unknown
        }
    }

    fn model_of(&self, formula: &mut Formula, timeout: Duration) -> ModelResult {
        log::debug!(target: targets::SOLVER, "Getting model using solver {}", self.command);

        let Some(solution) = self.execute(formula, timeout, false) else {
            return ModelResult::Unknown;
        };

        if solution.contains("s UNSATISFIABLE") {
            ModelResult::Unsatisfiable
        } else if solution.contains("INTERRUPTED") {
            log::debug!(target: targets::SOLVER, "Solver timed out or was otherwise interrupted");
            ModelResult::Unknown
        } else if solution.contains("s SATISFIABLE") {
            ModelResult::Model(Model::from_solver_output(solution.as_bytes()))
        } else {
            log::warn!(target: targets::SOLVER, "Unexpected solution from solver");
            ModelResult::Unknown
        }
    }
}
