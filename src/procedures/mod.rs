/*!
Procedures --- the transformations a formula may be simplified by.

A procedure is a capability with a name, an [equivalence](crate::formula::Equivalence) declaring the strongest relationship its output retains to its input, and an implementation.

Every application goes through the shared [apply](Procedure::apply) wrapper, which notes the procedure on the formula's provenance, weakens the formula's recorded equivalence to the procedure's level, and times the call.
A procedure must not re-enter its own `apply` --- recursion, where required, goes through [execute](Procedure::execute) directly.

The [manager](manager) composes procedures into one-shot and fixed-point iterative phases.
*/

pub mod backbone;
pub mod bcp;
pub mod bipartition;
pub mod manager;
pub mod occurrence;
pub mod self_subsumption;
pub mod vivification;

pub use backbone::BackboneSimplification;
pub use bcp::BooleanConstraintPropagation;
pub use bipartition::BipartitionAndElimination;
pub use manager::ProcedureManager;
pub use occurrence::OccurrenceSimplification;
pub use self_subsumption::SelfSubsumingResolution;
pub use vivification::Vivification;

use crate::{
    formula::{Equivalence, Formula},
    misc::log::targets,
};

/// A simplifying transformation of a formula.
pub trait Procedure {
    /// The name of the procedure, as recorded in formula provenance.
    fn name(&self) -> &'static str;

    /// The strongest equivalence the procedure preserves.
    fn equivalence(&self) -> Equivalence;

    /// The implementation of the procedure.
    ///
    /// Returns whether the procedure completed; failure is soft, and the formula remains usable.
    fn execute(&mut self, formula: &mut Formula) -> bool;

    /// Applies the procedure to the formula, with bookkeeping.
    ///
    /// Records the procedure's name, weakens the formula's equivalence to the procedure's level, and times the call before delegating to [execute](Self::execute).
    fn apply(&mut self, formula: &mut Formula) -> bool {
        formula.add_procedure(self.name());
        formula.degrade_equivalence(self.equivalence());

        log::debug!(target: targets::MANAGER,
            "Applying procedure {} with equivalence type {}",
            self.name(),
            self.equivalence()
        );

        let start = std::time::Instant::now();
        let success = self.execute(formula);

        log::debug!(target: targets::MANAGER,
            "Procedure {} finished after {:.2?}",
            self.name(),
            start.elapsed()
        );

        success
    }
}
