/*!
An index from literals to the clauses watching them.

# Theory

Unit propagation repeatedly asks: given that some literal now holds, which clauses might have become unit, or unsatisfiable?
Inspecting every clause on every question is wasteful, as a clause can only answer 'this one' if *all but one* of its literals have been falsified.

This motivates watching each clause through two of its literals: so long as both watched literals are unfalsified the clause has at least two unfalsified literals and can be ignored.
Only when a watched literal is falsified is the clause inspected, and then either a replacement watch is found among the surviving literals, or the clause has become unit (or unsatisfiable).

Unit clauses and vacated clauses are not watched --- a unit clause *is* its literal, and has nothing further to propagate through this index.

# Implementation

The index maps a literal to the keys of clauses watching it, with clauses of two or more literals registered through their first two literals.

The index is owned by a [formula](crate::formula::Formula) and updated by the formula's mutating methods, so registration always reflects the stored clauses.
[Propagation](crate::procedures::bcp) clones the lists it walks and attaches transient watches to the clone, so watches attached mid-propagation never flow back to the store.

Deregistration scans every literal of the clause rather than the first two, so a clause whose literals have been reordered or rewritten since registration is still removed in full.
*/

use std::collections::HashMap;

use crate::{
    formula::ClauseKey,
    structures::{clause::Clause, literal::Literal},
};

/// The clauses watching each literal, keyed into a formula's clause store.
#[derive(Clone, Debug, Default)]
pub struct Watches {
    lists: HashMap<Literal, Vec<ClauseKey>>,
}

impl Watches {
    /// Attaches a watch for the given literal.
    pub fn watch(&mut self, literal: Literal, key: ClauseKey) {
        self.lists.entry(literal).or_default().push(key);
    }

    /// Detaches one watch of `key` for the given literal, if any is attached.
    pub fn unwatch(&mut self, literal: Literal, key: ClauseKey) {
        if let Some(list) = self.lists.get_mut(&literal) {
            if let Some(position) = list.iter().position(|k| *k == key) {
                list.swap_remove(position);
            }
        }
    }

    /// The keys of clauses watching the given literal.
    pub fn watchers_of(&self, literal: Literal) -> &[ClauseKey] {
        match self.lists.get(&literal) {
            Some(list) => list,
            None => &[],
        }
    }

    /// Registers a clause through its first two literals, if the clause has two literals to watch.
    pub fn register(&mut self, clause: &Clause, key: ClauseKey) {
        if clause.len() <= 1 {
            return;
        }

        self.watch(clause[0], key);
        self.watch(clause[1], key);
    }

    /// Deregisters a clause, scanning every literal of the clause for attached watches.
    pub fn deregister(&mut self, clause: &Clause, key: ClauseKey) {
        for literal in clause {
            self.unwatch(*literal, key);
        }
    }

    /// Drops every watch.
    pub fn clear(&mut self) {
        self.lists.clear();
    }

    /// The number of watch entries held for the given key.
    pub fn entries_for(&self, key: ClauseKey) -> usize {
        self.lists
            .values()
            .map(|list| list.iter().filter(|k| **k == key).count())
            .sum()
    }
}
