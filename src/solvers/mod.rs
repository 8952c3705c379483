/*!
The solver boundary --- an opaque capability for satisfiability queries.

Procedures which require knowledge of satisfiability take a [Solver] and ask two questions: whether a formula is satisfiable, and for a model of the formula.
Both questions carry a per-call timeout, and both admit the answer *unknown*, returned on a timeout, an interrupt, or a solver failure without a parseable verdict.
Callers interpret unknown conservatively --- a backbone candidate whose refutation timed out is simply not a proven backbone literal.

The default implementation, [ExternalSolver](external::ExternalSolver), marshals the formula to a scratch DIMACS file and invokes an external command.
An in-process backend, [DpllSolver](dpll::DpllSolver), is included for tests and for running without an external solver installed.
*/

pub mod dpll;
pub mod external;

use std::time::Duration;

use crate::{formula::Formula, structures::model::Model};

/// The answer to a satisfiability question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The formula has a model.
    Satisfiable,

    /// The formula has no model.
    Unsatisfiable,

    /// No verdict within the timeout.
    Unknown,
}

/// The answer to a model question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelResult {
    /// A model of the formula.
    Model(Model),

    /// The formula has no model.
    Unsatisfiable,

    /// No verdict within the timeout.
    Unknown,
}

/// Something which answers satisfiability questions about formulas.
pub trait Solver {
    /// The name of the solver.
    fn name(&self) -> &str;

    /// Whether the formula is satisfiable.
    fn is_satisfiable(&self, formula: &mut Formula, timeout: Duration) -> Verdict;

    /// A model of the formula, if one exists.
    fn model_of(&self, formula: &mut Formula, timeout: Duration) -> ModelResult;
}
