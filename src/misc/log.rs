/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library, scoped to a handful of targets in order to help narrow output to relevant parts of the library.

Note, no log implementation is provided by the library.
The bundled binary uses [env_logger](https://docs.rs/env_logger/latest/env_logger/), so, for example, logs related to propagation can be filtered with `RUST_LOG=propagation …`.
*/

/// Targets to be used within a [log!](log) macro.
pub mod targets {
    /// Logs related to reading and writing formulas.
    pub const DIMACS: &str = "dimacs";

    /// Logs related to the formula store.
    pub const FORMULA: &str = "formula";

    /// Logs related to unit propagation.
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to backbone simplification.
    pub const BACKBONE: &str = "backbone";

    /// Logs related to vivification.
    pub const VIVIFICATION: &str = "vivification";

    /// Logs related to occurrence simplification.
    pub const OCCURRENCE: &str = "occurrence";

    /// Logs related to self-subsuming resolution.
    pub const SUBSUMPTION: &str = "subsumption";

    /// Logs related to bipartition and elimination.
    pub const BIPARTITION: &str = "bipartition";

    /// Logs related to the procedure manager.
    pub const MANAGER: &str = "manager";

    /// Logs related to solver calls.
    pub const SOLVER: &str = "solver";
}
