/*!
Configuration of a run.

All tunables are plain fields with defaults matching the behaviour of the tool as shipped.
The resolution budget of [elimination](crate::procedures::bipartition) is a heuristic constant, exposed here rather than buried in the procedure.
*/

use std::time::Duration;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The bound on iterations of the iterative procedures.
    pub iterations: u32,

    /// An iteration reducing the literal count by no more than this --- and likewise for clauses --- is a fixed point.
    pub min_literal_reduction: usize,

    /// An iteration reducing the clause count by no more than this --- and likewise for literals --- is a fixed point.
    pub min_clause_reduction: usize,

    /// The bound on the product of positive and negative occurrence counts past which elimination of a variable is postponed.
    pub max_resolution_count: u32,

    /// The command invoked as the external solver.
    pub solver_command: String,

    /// The timeout passed to the solver on each call.
    pub solver_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            iterations: 10,
            min_literal_reduction: 1,
            min_clause_reduction: 1,
            max_resolution_count: 500,
            solver_command: "clasp".to_string(),
            solver_timeout: Duration::from_secs(5),
        }
    }
}
