/*!
Clauses --- ordered collections of literals, interpreted as the disjunction of those literals.

The representation of a clause is a vector of literals, with operations given by the [ClauseOps] trait.

Two sentinel forms are distinguished, and used consistently throughout the library:

- The empty clause marks a clause which has been satisfied and vacated, e.g. by assuming some literal it contained.
- The clause `[0]` marks an unsatisfiable clause, e.g. the residue of a clause whose every literal has been falsified.

```rust
# use otter_prep::structures::clause::{Clause, ClauseOps};
let clause: Clause = vec![1, -2, 3];

assert!(clause.contains_literal(-2));
assert_eq!(clause.complement(), vec![-1, 2, -3]);

// Assuming 2 and -3 leaves the unit residue [1], and assuming -1 in addition falsifies the clause.
assert_eq!(clause.partial(&[2, -3]), vec![1]);
assert_eq!(clause.partial(&[2, -3, -1]), vec![0]);

// Assuming a contained literal satisfies the clause, marked by the empty residue.
assert!(clause.partial(&[-2]).is_empty());
```
*/

use crate::structures::literal::{Literal, LiteralOps, Variable};

/// The representation of a clause as a vector of literals.
pub type Clause = Vec<Literal>;

/// Operations on the vector representation of a clause.
pub trait ClauseOps {
    /// Whether the clause contains the given literal.
    fn contains_literal(&self, literal: Literal) -> bool;

    /// Applies the assumption that `literal` is true.
    ///
    /// Returns true if the clause is satisfied by the assumption, and otherwise removes every occurrence of the negated literal.
    /// A clause emptied by removal is replaced with the unsatisfiable marker `[0]`.
    fn set_literal(&mut self, literal: Literal) -> bool;

    /// The clause under the assumption that every given literal is true.
    ///
    /// Returns the empty clause if the assumptions satisfy the clause, and `[0]` if the assumptions falsify the clause.
    fn partial(&self, assumptions: &[Literal]) -> Clause;

    /// Whether some given literal satisfies the clause.
    fn is_satisfied_by(&self, assumptions: &[Literal]) -> bool;

    /// The complementary clause, in which every literal is negated.
    fn complement(&self) -> Clause;

    /// Renames every occurrence of a variable, preserving polarity.
    fn rename_variable(&mut self, variable: Variable, name: Variable);

    /// The resolvent of the clause with `other` on the given pivot variable.
    ///
    /// Returns `[0]` if the clauses do not contain the pivot with opposing polarity.
    /// A tautological resolvent is collapsed to the empty (satisfied) clause.
    fn resolve(&self, other: &Self, pivot: Variable) -> Clause;

    /// The maximum variable in the clause, or zero if the clause contains no variable.
    fn max_variable(&self) -> Variable;

    /// Whether the clause is the unsatisfiable marker `[0]`.
    fn is_unsatisfiable(&self) -> bool;

    /// Whether the clause contains both polarities of some variable.
    fn is_tautological(&self) -> bool;

    /// A string of the clause in DIMACS form, with the terminating `0` as optional.
    fn as_dimacs(&self, zero: bool) -> String;
}

impl ClauseOps for Clause {
    fn contains_literal(&self, literal: Literal) -> bool {
        self.iter().any(|l| *l == literal)
    }

    fn set_literal(&mut self, literal: Literal) -> bool {
        if self.contains_literal(literal) {
            return true;
        }

        let length = self.len();
        self.retain(|l| *l != literal.negated());

        if self.len() != length && self.is_empty() {
            self.push(0);
        }
        false
    }

    fn partial(&self, assumptions: &[Literal]) -> Clause {
        let mut residue = self.clone();
        for assumption in assumptions {
            if residue.set_literal(*assumption) {
                return Clause::default();
            }
        }
        residue
    }

    fn is_satisfied_by(&self, assumptions: &[Literal]) -> bool {
        self.iter().any(|l| assumptions.contains(l))
    }

    fn complement(&self) -> Clause {
        self.iter().map(|l| l.negated()).collect()
    }

    fn rename_variable(&mut self, variable: Variable, name: Variable) {
        for literal in self.iter_mut() {
            if literal.variable() == variable {
                *literal = Literal::of(name, literal.polarity());
            }
        }
    }

    fn resolve(&self, other: &Self, pivot: Variable) -> Clause {
        let this_pivot = self.iter().find(|l| l.variable() == pivot);
        let other_pivot = other.iter().find(|l| l.variable() == pivot);

        let (positive, negative) = match (this_pivot, other_pivot) {
            (Some(p), Some(q)) if p.polarity() != q.polarity() => match p.polarity() {
                true => (self, other),
                false => (other, self),
            },
            _ => return vec![0],
        };

        let mut resolvent = Clause::default();
        for literal in positive.iter().chain(negative.iter()) {
            if literal.variable() == pivot || resolvent.contains_literal(*literal) {
                continue;
            }
            if resolvent.contains_literal(literal.negated()) {
                return Clause::default();
            }
            resolvent.push(*literal);
        }
        resolvent
    }

    fn max_variable(&self) -> Variable {
        self.iter().map(|l| l.variable()).max().unwrap_or(0)
    }

    fn is_unsatisfiable(&self) -> bool {
        self.len() == 1 && self[0] == 0
    }

    fn is_tautological(&self) -> bool {
        self.iter().any(|l| self.contains_literal(l.negated()))
    }

    fn as_dimacs(&self, zero: bool) -> String {
        let mut line = String::new();
        for literal in self {
            line.push_str(&literal.to_string());
            line.push(' ');
        }
        if zero {
            line.push('0');
        } else {
            line.pop();
        }
        line
    }
}
