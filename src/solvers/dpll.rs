/*!
An in-process solver, implementing plain DPLL over clause vectors.

Used by the test suites, and available as a backend when no external solver is installed.
The implementation favours clarity over speed --- unit propagation by scanning, splitting on the first literal of the first clause --- and is intended for the small formulas a preprocessor hands to it during testing, not for competition benchmarks.

The per-call timeout is honoured by checking a deadline on entry to each branch.
*/

use std::time::{Duration, Instant};

use crate::{
    formula::Formula,
    misc::log::targets,
    solvers::{ModelResult, Solver, Verdict},
    structures::{
        clause::{Clause, ClauseOps},
        literal::{Literal, LiteralOps, Variable},
        model::Model,
    },
};

/// The outcome of a branch of the search.
enum Search {
    Satisfiable,
    Unsatisfiable,
    TimedOut,
}

/// A solver which decides satisfiability in process, by depth-first search with unit propagation.
pub struct DpllSolver;

impl DpllSolver {
    pub fn new() -> Self {
        DpllSolver
    }

    /// Searches for a satisfying assignment, extending `assignment` with every literal assumed.
    ///
    /// On a satisfiable return `assignment` holds the assumed literals; on any other return its contents are unspecified.
    fn search(clauses: &[Clause], assignment: &mut Vec<Literal>, deadline: Instant) -> Search {
        if Instant::now() > deadline {
            return Search::TimedOut;
        }

        // Unit propagation by scanning, then simplification under each unit found.
        let mut clauses: Vec<Clause> = clauses.to_vec();

        loop {
            if clauses.is_empty() {
                return Search::Satisfiable;
            }
            if clauses.iter().any(|clause| clause.is_unsatisfiable()) {
                return Search::Unsatisfiable;
            }

            match clauses.iter().find(|clause| clause.len() == 1).map(|unit| unit[0]) {
                Some(literal) => {
                    assignment.push(literal);
                    Self::reduce(&mut clauses, literal);
                }
                None => break,
            }
        }

        // Split on the first literal of the first clause.
        let choice = clauses[0][0];

        for literal in [choice, choice.negated()] {
            let assumed = assignment.len();
            assignment.push(literal);

            let mut branch = clauses.clone();
            Self::reduce(&mut branch, literal);

            match Self::search(&branch, assignment, deadline) {
                Search::Satisfiable => return Search::Satisfiable,
                Search::TimedOut => return Search::TimedOut,
                Search::Unsatisfiable => assignment.truncate(assumed),
            }
        }

        Search::Unsatisfiable
    }

    /// Simplifies the clauses under an assumed literal.
    fn reduce(clauses: &mut Vec<Clause>, literal: Literal) {
        clauses.retain_mut(|clause| !clause.set_literal(literal));
    }

    fn solve(&self, formula: &mut Formula, timeout: Duration) -> (Search, Vec<Literal>, Variable) {
        // Vacated clauses carry no constraint.
        let clauses: Vec<Clause> = formula.clauses().filter(|clause| !clause.is_empty()).cloned().collect();
        let max_variable = formula.max_variable();

        let mut assignment = Vec::default();
        let deadline = Instant::now() + timeout.min(Duration::from_secs(86_400));
        let outcome = Self::search(&clauses, &mut assignment, deadline);
        (outcome, assignment, max_variable)
    }
}

impl Default for DpllSolver {
    fn default() -> Self {
        DpllSolver::new()
    }
}

impl Solver for DpllSolver {
    fn name(&self) -> &str {
        "dpll"
    }

    fn is_satisfiable(&self, formula: &mut Formula, timeout: Duration) -> Verdict {
        match self.solve(formula, timeout).0 {
            Search::Satisfiable => Verdict::Satisfiable,
            Search::Unsatisfiable => Verdict::Unsatisfiable,
            Search::TimedOut => {
                log::debug!(target: targets::SOLVER, "In-process solve timed out");
                Verdict::Unknown
            }
        }
    }

    fn model_of(&self, formula: &mut Formula, timeout: Duration) -> ModelResult {
        let (outcome, assignment, max_variable) = self.solve(formula, timeout);

        match outcome {
            Search::Unsatisfiable => ModelResult::Unsatisfiable,
            Search::TimedOut => {
                log::debug!(target: targets::SOLVER, "In-process solve timed out");
                ModelResult::Unknown
            }
            Search::Satisfiable => {
                // Unassigned variables are unconstrained, and take an arbitrary value.
                let mut model = Model::new();
                for variable in 1..=max_variable {
                    model.push(assignment.contains(&(variable as Literal)));
                }
                ModelResult::Model(model)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict_on(clauses: impl IntoIterator<Item = Clause>) -> Verdict {
        let mut formula = Formula::from_clauses(clauses);
        DpllSolver::new().is_satisfiable(&mut formula, Duration::from_secs(10))
    }

    #[test]
    fn simple_verdicts() {
        assert_eq!(verdict_on([vec![1, 2], vec![-1, 3]]), Verdict::Satisfiable);
        assert_eq!(
            verdict_on([vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]]),
            Verdict::Unsatisfiable
        );
        assert_eq!(verdict_on([vec![0]]), Verdict::Unsatisfiable);
        assert_eq!(verdict_on([]), Verdict::Satisfiable);
    }

    #[test]
    fn models_satisfy() {
        let mut formula = Formula::from_clauses([vec![1, 2], vec![-1], vec![-2, 3]]);

        let ModelResult::Model(model) = DpllSolver::new().model_of(&mut formula, Duration::from_secs(10)) else {
            panic!("Expected a model");
        };

        assert_eq!(model.value_of(1), Some(false));
        assert_eq!(model.value_of(2), Some(true));
        assert_eq!(model.value_of(3), Some(true));
    }
}
