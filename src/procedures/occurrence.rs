/*!
Occurrence simplification --- removal of literals their clauses do not need.

A literal `l` is redundant in a clause `c` when the rest of the formula already forces `c` without it: assuming the negation of every other literal of `c` together with `l` itself yields a contradiction by propagation.
Deleting such a literal strictly shortens the clause without losing models.

Literals are processed in descending order of appearance, so the literals with the most opportunities to be redundant are tried first.
The per-literal step is exposed on its own, as [elimination](crate::procedures::bipartition) applies it variable by variable.

Clauses left empty by the pass, and tautological clauses --- satisfied however their variables are valued --- are removed at the end.
*/

use std::collections::HashMap;

use crate::{
    formula::{Equivalence, Formula},
    misc::log::targets,
    procedures::{bcp::BooleanConstraintPropagation, Procedure},
    structures::{
        clause::ClauseOps,
        literal::{Literal, LiteralOps},
    },
};

/// Removes literals whose negation is propagation-entailed by the rest of the formula.
pub struct OccurrenceSimplification;

impl OccurrenceSimplification {
    pub fn new() -> Self {
        OccurrenceSimplification
    }

    /// Every literal of the formula, ordered by descending number of appearances.
    fn incidence_sorted_literals(&self, formula: &Formula) -> Vec<Literal> {
        let mut appearances: HashMap<Literal, u32> = HashMap::default();

        for clause in formula.clauses() {
            for literal in clause {
                if *literal != 0 {
                    *appearances.entry(*literal).or_default() += 1;
                }
            }
        }

        let mut literals: Vec<Literal> = appearances.keys().copied().collect();
        literals.sort_unstable();
        literals.sort_by_key(|l| std::cmp::Reverse(appearances[l]));
        literals
    }

    /// Tries to delete one literal from every clause of two or more literals containing it.
    pub fn simplify_literal(&self, formula: &mut Formula, literal: Literal) {
        let bcp = BooleanConstraintPropagation::new();

        let keys: Vec<_> = formula.keys().collect();
        for key in keys {
            let Some(clause) = formula.clause(key) else {
                continue;
            };
            if clause.len() <= 1 || !clause.contains_literal(literal) {
                continue;
            }

            let mut candidate = clause.clone();
            candidate.retain(|l| *l != literal);

            // The literal is redundant if the formula, the negation of each remaining literal,
            // and the literal itself are contradictory under propagation.
            let assumptions = candidate.complement();
            for assumption in &assumptions {
                formula.push(vec![*assumption]);
            }
            formula.push(vec![literal]);

            let closure = bcp.closure(formula);

            for _ in 0..=assumptions.len() {
                formula.pop();
            }

            if closure.first() == Some(&0) {
                log::trace!(target: targets::OCCURRENCE, "Deleting {literal} from a clause of {} literals", candidate.len() + 1);
                formula.update_clause(key, |clause| {
                    clause.retain(|l| *l != literal);
                });
            }
        }
    }
}

impl Default for OccurrenceSimplification {
    fn default() -> Self {
        OccurrenceSimplification::new()
    }
}

impl Procedure for OccurrenceSimplification {
    fn name(&self) -> &'static str {
        "Occurrence Simplification"
    }

    fn equivalence(&self) -> Equivalence {
        Equivalence::Equivalent
    }

    fn execute(&mut self, formula: &mut Formula) -> bool {
        let literals = self.incidence_sorted_literals(formula);

        for literal in literals {
            self.simplify_literal(formula, literal);
        }

        // Vacated and tautological clauses constrain nothing.
        formula.retain_clauses(|clause| !clause.is_empty() && !clause.is_tautological());

        true
    }
}
