/*!
The procedure manager --- composition of procedures into a run.

The manager holds two ordered lists: procedures applied exactly once, and procedures applied repeatedly.
A run applies the one-time procedures in order, then iterates the repeated procedures up to the configured bound, stopping early at a fixed point: an iteration whose reduction in clause count and in literal count both fall within the configured minima.

The minima default to one each; zero means any reduction at all, however small, counts as progress.
The time a run takes is added to the formula's processing-time provenance.
*/

use crate::{formula::Formula, misc::log::targets, procedures::Procedure};

/// Applies an ordered collection of procedures to a formula, to a fixed point.
pub struct ProcedureManager {
    one_time: Vec<Box<dyn Procedure>>,
    iterative: Vec<Box<dyn Procedure>>,

    iterations: u32,
    min_clause_reduction: usize,
    min_literal_reduction: usize,
}

impl ProcedureManager {
    /// A manager iterating up to `iterations` times, with the given minimum literal and clause reductions.
    pub fn new(iterations: u32, min_literal_reduction: usize, min_clause_reduction: usize) -> Self {
        ProcedureManager {
            one_time: Vec::default(),
            iterative: Vec::default(),
            iterations,
            min_clause_reduction,
            min_literal_reduction,
        }
    }

    /// Appends a procedure applied once, ahead of the iterative phase.
    pub fn add_one_time_procedure(&mut self, procedure: Box<dyn Procedure>) {
        log::info!(target: targets::MANAGER,
            "Adding one-time procedure {} of type {}",
            procedure.name(),
            procedure.equivalence()
        );
        self.one_time.push(procedure);
    }

    /// Appends a procedure applied on every iteration.
    pub fn add_iterative_procedure(&mut self, procedure: Box<dyn Procedure>) {
        log::info!(target: targets::MANAGER,
            "Adding iterative procedure {} of type {}",
            procedure.name(),
            procedure.equivalence()
        );
        self.iterative.push(procedure);
    }

    /// Applies every procedure to the formula.
    pub fn apply(&mut self, formula: &mut Formula) {
        let start = std::time::Instant::now();

        log::info!(target: targets::MANAGER,
            "The formula has {} clauses and {} literals",
            formula.clause_count(),
            formula.literal_count()
        );

        for procedure in &mut self.one_time {
            log::info!(target: targets::MANAGER, "Applying one-time procedure {}…", procedure.name());
            if !procedure.apply(formula) {
                log::warn!(target: targets::MANAGER, "Procedure {} reported failure", procedure.name());
            }
        }

        log::info!(target: targets::MANAGER,
            "After one-time procedures the formula has {} clauses and {} literals",
            formula.clause_count(),
            formula.literal_count()
        );

        let mut fixed_point = false;
        let mut iteration = 0;

        while iteration < self.iterations && !fixed_point {
            iteration += 1;
            log::info!(target: targets::MANAGER, "Iteration {iteration}…");

            let clauses_before = formula.clause_count();
            let literals_before = formula.literal_count();

            for procedure in &mut self.iterative {
                log::info!(target: targets::MANAGER,
                    "Applying iterative procedure {} in iteration {iteration}…",
                    procedure.name()
                );
                if !procedure.apply(formula) {
                    log::warn!(target: targets::MANAGER, "Procedure {} reported failure", procedure.name());
                }
            }

            let clause_reduction = clauses_before.saturating_sub(formula.clause_count());
            let literal_reduction = literals_before.saturating_sub(formula.literal_count());

            fixed_point = clause_reduction <= self.min_clause_reduction
                && literal_reduction <= self.min_literal_reduction;
        }

        match fixed_point {
            true => log::info!(target: targets::MANAGER, "Fixed point reached"),
            false => log::info!(target: targets::MANAGER, "No fixed point reached"),
        }

        log::info!(target: targets::MANAGER,
            "After {iteration} iteration(s) the formula has {} clauses and {} literals",
            formula.clause_count(),
            formula.literal_count()
        );

        formula.add_processing_time(start.elapsed());
    }
}
