/*!
A preprocessor for boolean formulas written in conjunctive normal form, aimed at model-counting workflows.

otter_prep reads a formula, applies a configurable pipeline of simplifying procedures, and writes a reduced formula whose relationship to the input --- equivalence, equivalence of model count, equivalence of satisfiability --- is declared in the output.

# Orientation

The library is designed around the core structure of a [formula], to which procedures are applied.

- A formula owns its [clauses](structures::clause) and keeps the bookkeeping required to reason about them: variable counts, a [watched-literal index](formula::watches), and a [compression log](formula::compression) which makes every rename of a variable reversible, for literals and for models.
- [Procedures](procedures) mutate a formula through its own mutating methods, so the bookkeeping is maintained as an invariant rather than re-established.
- Procedures which require knowledge of satisfiability go through a [solver capability](solvers) --- by default an external solver invoked as a black box, though the interface admits in-process backends (one is included, and used for tests).

Each procedure declares the strongest [equivalence](formula::Equivalence) it preserves, and a formula records the weakest equivalence of any procedure applied to it.
So, after preprocessing a formula knows --- and its DIMACS header states --- whether it is equivalent to the input, has the same number of models, or merely the same satisfiability.

# Example

Shorten the clauses of a formula, in place.

```rust
# use otter_prep::formula::Formula;
# use otter_prep::procedures::{Procedure, Vivification};
let mut formula = Formula::from_clauses([vec![1, 2], vec![-1, 2], vec![-2, 2]]);

let mut vivification = Vivification::new();
vivification.apply(&mut formula);

assert!(formula.clause_count() <= 3);
```

# Logs

Calls to [log!](log) are made throughout the library, scoped by the targets listed in [misc::log].
No log implementation is provided by the library; the bundled binary uses [env_logger](https://docs.rs/env_logger/latest/env_logger/).
*/

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::single_match)]

pub mod config;
pub mod formula;
pub mod procedures;
pub mod solvers;
pub mod structures;
pub mod types;

pub mod misc;

/// The version written into output headers.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The build type written into output headers.
#[cfg(debug_assertions)]
pub const BUILD_TYPE: &str = "Debug";

/// The build type written into output headers.
#[cfg(not(debug_assertions))]
pub const BUILD_TYPE: &str = "Release";
