/*!
Boolean constraint propagation --- the unit-propagation kernel.

# Overview

Given a formula, [closure](BooleanConstraintPropagation::closure) computes the set of literals which must hold by unit propagation alone: the literal of every unit clause, and every literal forced in turn by those.

Propagation is driven by the formula's [watched-literal index](crate::formula::watches).
When a literal `u` enters the closure only the clauses watching `¬u` are inspected:

- A clause already satisfied by the closure is skipped.
- A clause whose every literal has been falsified makes the formula unsatisfiable under the closure, reported by returning the single-element closure `[0]`.
- A clause reduced to a single literal forces that literal, which joins the closure.
- Otherwise a surviving literal of the clause takes over the falsified watch.

The inspected lists are cloned from the store, so watches attached during propagation are transient and never flow back to the index.

# Application forms

Three forms apply a set of determined literals to a formula:

- [apply_single_literal](BooleanConstraintPropagation::apply_single_literal) removes every clause satisfied by the literal and strips the negated literal from the rest.
- [apply_literals](BooleanConstraintPropagation::apply_literals) composes the above over a set.
- [apply_literals_eq](BooleanConstraintPropagation::apply_literals_eq) does the same, and then records each literal as a unit clause, so the model set keeps the information that the literal holds.

Propagation itself never errors --- unsatisfiability is reported through the `[0]` closure.
*/

use crate::{
    formula::{Equivalence, Formula},
    misc::log::targets,
    procedures::Procedure,
    structures::{
        clause::ClauseOps,
        literal::{Literal, LiteralOps},
    },
};

/// The unit-propagation kernel, and a procedure applying its consequences.
pub struct BooleanConstraintPropagation;

impl BooleanConstraintPropagation {
    pub fn new() -> Self {
        BooleanConstraintPropagation
    }

    /// The closure of the formula's unit clauses under unit propagation.
    ///
    /// Returns `[0]` if the formula is unsatisfiable by unit propagation alone.
    pub fn closure(&self, formula: &Formula) -> Vec<Literal> {
        let mut units: Vec<Literal> = Vec::default();

        for clause in formula.clauses() {
            if clause.is_unsatisfiable() {
                return vec![0];
            }
            if clause.len() == 1 && !units.contains(&clause[0]) {
                units.push(clause[0]);
            }
        }

        if units.is_empty() {
            return units;
        }

        // Transient watches are attached to a clone of the index, never the store.
        let mut watches = formula.watches().clone();

        let mut index = 0;
        while index < units.len() {
            let literal = units[index];
            let watchers = watches.watchers_of(literal.negated()).to_vec();

            for key in watchers {
                let Some(clause) = formula.clause(key) else {
                    continue;
                };
                if clause.is_satisfied_by(&units) {
                    continue;
                }

                let residue = clause.partial(&units);
                match residue.len() {
                    0 => {}

                    1 => {
                        if residue.is_unsatisfiable() {
                            log::trace!(target: targets::PROPAGATION, "Propagation of {literal} falsified a clause");
                            return vec![0];
                        }
                        if !units.contains(&residue[0]) {
                            units.push(residue[0]);
                        }
                    }

                    // Two or more surviving literals: move the falsified watch to the second.
                    _ => watches.watch(residue[1], key),
                }
            }

            index += 1;
        }

        units
    }

    /// Applies a determined literal: clauses satisfied by it are removed, and its negation is stripped from the rest.
    pub fn apply_single_literal(&self, formula: &mut Formula, literal: Literal) {
        formula.assign_literal(literal);
    }

    /// Applies each determined literal in turn.
    pub fn apply_literals(&self, formula: &mut Formula, literals: &[Literal]) {
        for literal in literals {
            self.apply_single_literal(formula, *literal);
        }
    }

    /// Applies each determined literal, and records it as a unit clause.
    pub fn apply_literals_eq(&self, formula: &mut Formula, literals: &[Literal]) {
        for literal in literals {
            self.apply_single_literal(formula, *literal);
            formula.push(vec![*literal]);
        }
    }
}

impl Default for BooleanConstraintPropagation {
    fn default() -> Self {
        BooleanConstraintPropagation::new()
    }
}

impl Procedure for BooleanConstraintPropagation {
    fn name(&self) -> &'static str {
        "Boolean Constraint Propagation"
    }

    fn equivalence(&self) -> Equivalence {
        Equivalence::SatEquivalent
    }

    fn execute(&mut self, formula: &mut Formula) -> bool {
        let units = self.closure(formula);

        if units.first() == Some(&0) {
            // Unsatisfiable by propagation alone: the marker clause is all that remains to say.
            formula.clear();
            formula.push(vec![0]);
            return true;
        }

        self.apply_literals(formula, &units);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_chains_units() {
        let formula = Formula::from_clauses([vec![1], vec![-1, 2], vec![-2, 3]]);
        let bcp = BooleanConstraintPropagation::new();

        assert_eq!(bcp.closure(&formula), vec![1, 2, 3]);
    }

    #[test]
    fn closure_reports_unsatisfiability() {
        let formula = Formula::from_clauses([vec![1], vec![-1]]);
        let bcp = BooleanConstraintPropagation::new();

        assert_eq!(bcp.closure(&formula), vec![0]);
    }

    #[test]
    fn closure_moves_watches() {
        // Propagating 1 falsifies the first watched literal of the long clause; 2 and 3 are then
        // forced in turn through the moved watch.
        let formula = Formula::from_clauses([vec![-1, 2, 3], vec![1], vec![-3], vec![-2, 3]]);
        let bcp = BooleanConstraintPropagation::new();

        assert_eq!(bcp.closure(&formula), vec![0]);
    }

    #[test]
    fn applied_literals_leave_no_unit(){
        let mut formula = Formula::from_clauses([vec![1], vec![-1, 2], vec![-2, 3]]);
        let bcp = BooleanConstraintPropagation::new();

        let units = bcp.closure(&formula);
        bcp.apply_literals(&mut formula, &units);

        assert!(formula.is_empty());
        assert!(bcp.closure(&formula).is_empty());
    }
}
