/*!
Self-subsuming resolution --- clause strengthening.

Where a clause `d` and a clause `c` resolve on some variable and the resolvent is `c` less one literal, the resolvent subsumes `c`: the literal can simply be deleted from `c`.

Concretely, for a literal `m` of `d`, if every other literal of `d` also appears in `c` and `c` contains `¬m`, then resolving the two on `m` yields `c \ {¬m}`, and `c` is replaced by it.
Strengthening is sound in both directions --- the resolvent is entailed by the pair, and implies the clause it replaces --- so the model set is untouched.

Each clause is tried as the strengthening clause `d` against every clause sharing a negated literal, until a full pass makes no deletion.
*/

use crate::{
    formula::{Equivalence, Formula},
    misc::log::targets,
    procedures::Procedure,
    structures::{clause::ClauseOps, literal::LiteralOps},
};

/// Deletes literals by resolutions whose resolvent subsumes one of the resolved pair.
pub struct SelfSubsumingResolution;

impl SelfSubsumingResolution {
    pub fn new() -> Self {
        SelfSubsumingResolution
    }

    /// One strengthening pass over the formula.  Returns the number of literals deleted.
    fn strengthen_pass(&self, formula: &mut Formula) -> usize {
        let mut deletions = 0;

        let keys: Vec<_> = formula.keys().collect();
        for strengthener_key in &keys {
            for candidate_key in &keys {
                if strengthener_key == candidate_key {
                    continue;
                }
                let (Some(strengthener), Some(candidate)) =
                    (formula.clause(*strengthener_key), formula.clause(*candidate_key))
                else {
                    continue;
                };
                if strengthener.len() < 2 || strengthener.len() > candidate.len() {
                    continue;
                }

                // A literal of the strengthener negated in the candidate, with every other
                // literal of the strengthener contained in the candidate.
                let pivot = strengthener.iter().copied().find(|m| {
                    candidate.contains_literal(m.negated())
                        && strengthener
                            .iter()
                            .all(|other| other == m || candidate.contains_literal(*other))
                });

                if let Some(pivot) = pivot {
                    log::trace!(target: targets::SUBSUMPTION, "Strengthening a clause on {pivot}");
                    formula.update_clause(*candidate_key, |clause| {
                        clause.retain(|l| *l != pivot.negated());
                    });
                    deletions += 1;
                }
            }
        }

        deletions
    }
}

impl Default for SelfSubsumingResolution {
    fn default() -> Self {
        SelfSubsumingResolution::new()
    }
}

impl Procedure for SelfSubsumingResolution {
    fn name(&self) -> &'static str {
        "SelfSubsumingResolution"
    }

    fn equivalence(&self) -> Equivalence {
        Equivalence::Equivalent
    }

    fn execute(&mut self, formula: &mut Formula) -> bool {
        let mut total = 0;
        loop {
            let deletions = self.strengthen_pass(formula);
            total += deletions;
            if deletions == 0 {
                break;
            }
        }

        if total > 0 {
            log::info!(target: targets::SUBSUMPTION, "Self-subsumption deleted {total} literals");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strengthens_by_one_literal() {
        // (1 2) resolved with (-1 2 3) on 1 gives (2 3), subsuming (-1 2 3) to (2 3).
        let mut formula = Formula::from_clauses([vec![1, 2], vec![-1, 2, 3]]);

        SelfSubsumingResolution::new().execute(&mut formula);

        let clauses: Vec<_> = formula.clauses().cloned().collect();
        assert_eq!(clauses, vec![vec![1, 2], vec![2, 3]]);
    }

    #[test]
    fn leaves_unrelated_clauses() {
        let mut formula = Formula::from_clauses([vec![1, 2], vec![3, 4]]);

        SelfSubsumingResolution::new().execute(&mut formula);

        assert_eq!(formula.literal_count(), 4);
    }
}
