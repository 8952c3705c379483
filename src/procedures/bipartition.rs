/*!
Bipartition and elimination.

The variables of a formula are split into an *input* set and an *output* set such that every output variable is functionally defined by the inputs: each assignment of the inputs extends to at most one satisfying assignment of the outputs.
Output variables carry no counting information of their own, so existentially eliminating them preserves the number of models --- though not the models themselves, which is why the procedure degrades a formula to number-equivalence.

# Bipartition

Backbone variables are constants, and seed the output set.
The remaining variables are considered in ascending order of appearance, and each is tested for definability with respect to the inputs so far together with the variables not yet considered.

The definability test for `x` under a set `S` builds a formula from two copies of the input which agree on `S` but rename every other variable apart, adds the unit clauses `{x}` and `{¬x'}` for the two copies of `x`, and asks the solver for a verdict: the construction is unsatisfiable exactly when `S` determines `x`.
A solver timeout counts against definability, keeping the variable as an input.

# Elimination

Output variables are eliminated by resolution, in rounds:

1. The formula is vivified.
2. Candidates are taken in ascending order of the product of their positive and negative occurrence counts, after a per-variable occurrence simplification of both polarities.
3. A candidate whose product exceeds the resolution budget is postponed to the next round, bounding clause growth.
4. Otherwise, the clauses containing the variable are replaced by their non-tautological resolvents on it.

A round which eliminates nothing ends the loop; postponed variables simply remain in the formula, which is sound --- the bipartition licenses elimination, it never requires it.
*/

use std::{collections::HashMap, rc::Rc, time::Duration};

use crate::{
    formula::{Equivalence, Formula},
    misc::log::targets,
    procedures::{
        backbone::BackboneSimplification, bcp::BooleanConstraintPropagation,
        occurrence::OccurrenceSimplification, vivification::Vivification, Procedure,
    },
    solvers::{Solver, Verdict},
    structures::{
        clause::{Clause, ClauseOps},
        literal::{Literal, LiteralOps, Variable},
    },
};

/// Splits variables into defined outputs and defining inputs, and eliminates the outputs.
pub struct BipartitionAndElimination {
    solver: Rc<dyn Solver>,
    timeout: Duration,
    max_resolution_count: u32,
}

impl BipartitionAndElimination {
    pub fn new(solver: Rc<dyn Solver>, timeout: Duration, max_resolution_count: u32) -> Self {
        BipartitionAndElimination { solver, timeout, max_resolution_count }
    }

    /// The output variables of the formula: those functionally defined by the rest.
    pub fn bipartition(&self, formula: &Formula) -> Vec<Variable> {
        let mut working = formula.clone();

        let backbone = BackboneSimplification::new(self.solver.clone(), self.timeout).backbone(&working);
        BooleanConstraintPropagation::new().apply_literals_eq(&mut working, &backbone);

        let backbone_variables: Vec<Variable> = backbone.iter().map(|l| l.variable()).collect();
        let mut outputs = backbone_variables.clone();
        let mut inputs: Vec<Variable> = Vec::default();

        let appearances = working.count_variables();
        let mut candidates: Vec<(Variable, u32)> = appearances
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(variable, count)| {
                **count > 0 && !backbone_variables.contains(&(*variable as Variable))
            })
            .map(|(variable, count)| (variable as Variable, *count))
            .collect();
        candidates.sort_by_key(|(_, count)| *count);

        for position in 0..candidates.len() {
            let (candidate, _) = candidates[position];

            // Defined with respect to the inputs so far and everything still undecided.
            let mut definition_set = inputs.clone();
            definition_set.extend(candidates[position + 1..].iter().map(|(variable, _)| *variable));

            match self.is_defined(candidate, &working, &definition_set) {
                true => outputs.push(candidate),
                false => inputs.push(candidate),
            }
        }

        log::info!(target: targets::BIPARTITION,
            "Bipartition: {} input and {} output variables",
            inputs.len(),
            outputs.len()
        );

        outputs
    }

    /// Whether the variable `x` is functionally defined by the variables of `set` in the formula.
    pub fn is_defined(&self, x: Variable, formula: &Formula, set: &[Variable]) -> bool {
        if set.contains(&x) {
            return true;
        }
        log::debug!(target: targets::BIPARTITION, "Checking definedness of {x}");

        let mut working = formula.clone();
        let mut copy = formula.clone();

        // Rename every variable outside the shared set apart in the copy.
        let mut fresh = copy.max_variable() + 1;
        let mut x_prime = 0;

        for variable in 1..=working.max_variable() {
            if set.contains(&variable) {
                continue;
            }
            if variable == x {
                x_prime = fresh;
            }
            copy.rename_variable(variable, fresh);
            fresh += 1;
        }

        working.join(&copy);
        working.push(vec![Literal::of(x, true)]);
        working.push(vec![Literal::of(x_prime, false)]);

        // Satisfiable --- including unknown --- means the copies can disagree on x.
        matches!(self.solver.is_satisfiable(&mut working, self.timeout), Verdict::Unsatisfiable)
    }

    /// Eliminates the given variables from the formula by resolution, so far as the budget allows.
    pub fn eliminate(&self, formula: &mut Formula, variables: Vec<Variable>) {
        let mut vivification = Vivification::new();
        let occurrence = OccurrenceSimplification::new();

        let mut remaining = variables;

        while !remaining.is_empty() {
            vivification.apply(formula);

            let mut postponed: Vec<Variable> = Vec::default();
            let mut eliminated = 0;

            while !remaining.is_empty() {
                Self::sort_by_resolvent_count(formula, &mut remaining);
                let x = remaining.remove(0);

                occurrence.simplify_literal(formula, Literal::of(x, true));
                occurrence.simplify_literal(formula, Literal::of(x, false));

                let (positive, negative) = Self::occurrences(formula, x);

                if positive * negative > self.max_resolution_count {
                    // Resolving now would grow the formula past the budget; retry next round.
                    postponed.push(x);
                } else {
                    self.resolve_out(formula, x);
                    eliminated += 1;
                }
            }

            if postponed.is_empty() || eliminated == 0 {
                if !postponed.is_empty() {
                    log::info!(target: targets::BIPARTITION,
                        "{} output variables retained over the resolution budget",
                        postponed.len()
                    );
                }
                break;
            }
            remaining = postponed;
        }
    }

    /// Replaces every clause containing the variable by the non-tautological resolvents on it.
    fn resolve_out(&self, formula: &mut Formula, x: Variable) {
        let mut positive: Vec<Clause> = Vec::default();
        let mut negative: Vec<Clause> = Vec::default();

        let keys: Vec<_> = formula.keys().collect();
        for key in keys {
            let Some(clause) = formula.clause(key) else {
                continue;
            };
            let has_positive = clause.contains_literal(Literal::of(x, true));
            let has_negative = clause.contains_literal(Literal::of(x, false));

            match (has_positive, has_negative) {
                (false, false) => continue,
                // A clause tautological in x is satisfied however x is valued.
                (true, true) => {
                    formula.remove_key(key);
                }
                (true, false) => {
                    positive.push(formula.remove_key(key).unwrap_or_default());
                }
                (false, true) => {
                    negative.push(formula.remove_key(key).unwrap_or_default());
                }
            }
        }

        let mut resolvents = 0;
        for p in &positive {
            for n in &negative {
                let resolvent = p.resolve(n, x);
                if resolvent.is_empty() || resolvent.is_unsatisfiable() {
                    continue;
                }
                formula.push(resolvent);
                resolvents += 1;
            }
        }

        log::debug!(target: targets::BIPARTITION,
            "Eliminated {x}: {} clauses replaced by {resolvents} resolvents",
            positive.len() + negative.len()
        );
    }

    /// Sorts candidates by the product of their positive and negative occurrence counts, ascending.
    fn sort_by_resolvent_count(formula: &Formula, variables: &mut [Variable]) {
        let mut positive: HashMap<Variable, u32> = HashMap::default();
        let mut negative: HashMap<Variable, u32> = HashMap::default();

        for clause in formula.clauses() {
            for literal in clause {
                if *literal == 0 || !variables.contains(&literal.variable()) {
                    continue;
                }
                let counts = match literal.polarity() {
                    true => &mut positive,
                    false => &mut negative,
                };
                *counts.entry(literal.variable()).or_default() += 1;
            }
        }

        variables.sort_by_key(|v| {
            positive.get(v).copied().unwrap_or(0) * negative.get(v).copied().unwrap_or(0)
        });
    }

    /// The positive and negative occurrence counts of a variable.
    fn occurrences(formula: &Formula, x: Variable) -> (u32, u32) {
        let mut positive = 0;
        let mut negative = 0;
        for clause in formula.clauses() {
            if clause.contains_literal(Literal::of(x, true)) {
                positive += 1;
            }
            if clause.contains_literal(Literal::of(x, false)) {
                negative += 1;
            }
        }
        (positive, negative)
    }
}

impl Procedure for BipartitionAndElimination {
    fn name(&self) -> &'static str {
        "Bipartition and Elimination"
    }

    fn equivalence(&self) -> Equivalence {
        Equivalence::NumberEquivalent
    }

    fn execute(&mut self, formula: &mut Formula) -> bool {
        let outputs = self.bipartition(formula);
        self.eliminate(formula, outputs);
        formula.compress();
        true
    }
}
