/*!
Vivification --- clause shortening by propagation-based entailment checks.

Each clause is taken out of the formula and rebuilt literal by literal against the rest of the formula together with the clauses already rebuilt:

- A literal is moved to the rebuilt clause only if propagation has not already falsified it --- a falsified literal contributes nothing to the clause, and is left behind.
- After each move the *negation* of the rebuilt clause is assumed.  If propagation now derives a contradiction the rebuilt clause is entailed by the other clauses, and the original is discarded wholesale.
- If no literal can be moved, the rebuilt clause replaces the original.

The result is a formula with the same models in which clauses are no longer than before --- shorter wherever propagation could prove a literal or a tail redundant.
*/

use crate::{
    formula::{Equivalence, Formula},
    misc::log::targets,
    procedures::{bcp::BooleanConstraintPropagation, Procedure},
    structures::{
        clause::{Clause, ClauseOps},
        literal::LiteralOps,
    },
};

/// Shortens clauses which propagation proves longer than they need to be.
pub struct Vivification;

impl Vivification {
    pub fn new() -> Self {
        Vivification
    }
}

impl Default for Vivification {
    fn default() -> Self {
        Vivification::new()
    }
}

impl Procedure for Vivification {
    fn name(&self) -> &'static str {
        "Vivification"
    }

    fn equivalence(&self) -> Equivalence {
        Equivalence::Equivalent
    }

    fn execute(&mut self, formula: &mut Formula) -> bool {
        let mut rebuilt = formula.metadata_copy();
        let bcp = BooleanConstraintPropagation::new();

        let mut closure_calls = 0;

        while !formula.is_empty() {
            let mut current = formula.remove_at(0);

            // The sentinels pass through: a vacated clause is dropped, the unsatisfiable
            // marker is kept as it stands.
            if current.is_empty() {
                continue;
            }
            if current.is_unsatisfiable() {
                rebuilt.push(current);
                continue;
            }

            // The clause is judged against the rest of the formula and everything rebuilt so far.
            let mut context = formula.clone();
            context.join(&rebuilt);

            let mut closure = bcp.closure(&context);
            closure_calls += 1;

            let mut replacement = Clause::default();
            let mut entailed = false;

            while !current.is_empty() {
                // A literal already falsified by the closure is redundant in the clause.
                let position = current.iter().position(|l| !closure.contains(&l.negated()));
                let Some(position) = position else {
                    break;
                };
                replacement.push(current.remove(position));

                // Assume the negation of the partial clause, one unit for each literal.
                let assumptions = replacement.complement();
                for assumption in &assumptions {
                    context.push(vec![*assumption]);
                }
                closure = bcp.closure(&context);
                closure_calls += 1;
                for _ in 0..assumptions.len() {
                    context.pop();
                }

                if closure.first() == Some(&0) {
                    // Assuming the negation of the partial clause is already contradictory,
                    // so the partial clause is entailed and the original adds nothing.
                    entailed = true;
                    break;
                }
            }

            if !entailed {
                match replacement.is_empty() {
                    // Every literal was falsified by the closure alone.
                    true => rebuilt.push(vec![0]),
                    false => rebuilt.push(replacement),
                };
            }
        }

        for clause in rebuilt.take_clauses() {
            formula.push(clause);
        }

        log::info!(target: targets::VIVIFICATION, "Total closure calls: {closure_calls}");

        true
    }
}
