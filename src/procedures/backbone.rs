/*!
Backbone simplification.

A *backbone literal* is a literal true in every model of a formula.
Backbone literals are facts: applying them shortens the formula without changing its models, provided each is also recorded as a unit clause.

# Algorithm

Iterative refinement, following the model-based approach:

1. Ask the solver for any model of the formula; its literals are the candidate set, as any backbone literal must agree with any model.
2. While candidates remain, take the head candidate `l` and ask whether the formula extended by `¬l` is satisfiable.
   - Unsatisfiable: `l` holds in every model.  It joins the backbone and is applied to the working formula at once, shrinking later queries.
   - Satisfiable: the refuting model disagrees with `l`, and with every other candidate it refutes --- all are erased.
   - Unknown (a timeout): `l` is not *proven* backbone, and is conservatively dropped.

Candidates are probed in insertion order.
*/

use std::{rc::Rc, time::Duration};

use crate::{
    formula::{Equivalence, Formula},
    misc::log::targets,
    procedures::{bcp::BooleanConstraintPropagation, Procedure},
    solvers::{ModelResult, Solver},
    structures::literal::{Literal, LiteralOps, Variable},
};

/// Computes the backbone of a formula and applies it.
pub struct BackboneSimplification {
    solver: Rc<dyn Solver>,
    timeout: Duration,
    record_units: bool,
}

impl BackboneSimplification {
    /// A backbone simplification recording each backbone literal as a unit clause, preserving the model set directly.
    pub fn new(solver: Rc<dyn Solver>, timeout: Duration) -> Self {
        BackboneSimplification { solver, timeout, record_units: true }
    }

    /// A backbone simplification removing backbone variables outright.
    ///
    /// Each determined value is recorded in the formula's compression log instead of as a unit clause, so models of the result still translate back.
    pub fn propagating(solver: Rc<dyn Solver>, timeout: Duration) -> Self {
        BackboneSimplification { solver, timeout, record_units: false }
    }

    /// The backbone literals of the formula, in the order they were proven.
    ///
    /// An unsatisfiable formula has the empty backbone, as does a formula the solver returns no model for.
    pub fn backbone(&self, formula: &Formula) -> Vec<Literal> {
        log::debug!(target: targets::BACKBONE, "Computing backbone");
        let start = std::time::Instant::now();

        let mut working = formula.clone();

        let starting_model = match self.solver.model_of(&mut working, self.timeout) {
            ModelResult::Model(model) => model,
            ModelResult::Unsatisfiable | ModelResult::Unknown => return Vec::default(),
        };

        let mut candidates: Vec<Literal> = starting_model.literals().collect();
        let mut backbone: Vec<Literal> = Vec::default();

        let bcp = BooleanConstraintPropagation::new();

        while !candidates.is_empty() {
            let literal = candidates[0];

            working.push(vec![literal.negated()]);

            match self.solver.model_of(&mut working, self.timeout) {
                ModelResult::Unsatisfiable => {
                    backbone.push(literal);
                    working.pop();

                    // The literal is known; propagating it shrinks every later query.
                    bcp.apply_single_literal(&mut working, literal);
                    candidates.remove(0);
                }

                ModelResult::Model(model) => {
                    candidates.remove(0);
                    // No literal the refuting model disagrees with can be backbone.
                    candidates.retain(|l| model.value_of(l.variable()) == Some(l.polarity()));
                    working.pop();
                }

                ModelResult::Unknown => {
                    // Not proven backbone within the timeout.
                    candidates.remove(0);
                    working.pop();
                }
            }
        }

        log::info!(target: targets::BACKBONE,
            "Backbone computation found {} literals in {:.2?}",
            backbone.len(),
            start.elapsed()
        );

        backbone
    }
}

impl Procedure for BackboneSimplification {
    fn name(&self) -> &'static str {
        "Backbone Simplification"
    }

    fn equivalence(&self) -> Equivalence {
        Equivalence::Equivalent
    }

    fn execute(&mut self, formula: &mut Formula) -> bool {
        let backbone = self.backbone(formula);

        let variables_before = formula.variables();
        let bcp = BooleanConstraintPropagation::new();

        if self.record_units {
            bcp.apply_literals_eq(formula, &backbone);
        } else {
            // Applying a backbone literal frees its variable, and the freed name is refilled
            // from the top; later backbone literals are chased through those renames.
            let mut renames: Vec<(Variable, Variable)> = Vec::default();

            for literal in &backbone {
                let mut variable = literal.variable();
                for (from, to) in &renames {
                    if variable == *from {
                        variable = *to;
                    }
                }
                let current = Literal::of(variable, literal.polarity());

                bcp.apply_single_literal(formula, current);

                let max = formula.max_variable();
                formula.set_literal_backpropagated(current);
                if max > variable {
                    renames.push((max, variable));
                }
            }
        }

        // Any variable lost beyond the backbone was a non-backbone variable whose every
        // occurrence was propagated away.
        let determined = match self.record_units {
            true => 0,
            false => backbone.len() as u32,
        };
        let freed = variables_before.saturating_sub(formula.variables() + determined);
        if freed > 0 {
            log::info!(target: targets::BACKBONE, "{freed} independent variables vanished with the backbone");
        }

        formula.compress();
        true
    }
}
