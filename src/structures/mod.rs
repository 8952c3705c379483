/*!
The abstract elements of a formula and their representations.

- [Literals](literal) are signed integers, as in the DIMACS format.
- [Clauses](clause) are vectors of literals, interpreted as the disjunction of those literals.
- [Models](model) are assignments of values to variables, read from the output of a solver.
*/

pub mod clause;
pub mod literal;
pub mod model;
