/*!
The formula store --- owned clauses together with the bookkeeping required to reason about them.

A [Formula] owns a sequence of [clauses](crate::structures::clause) and maintains, as invariants of its mutating methods:

- Variable and maximum-variable counts, recomputed lazily behind dirty bits.
- A [watched-literal index](watches) in which every clause of two or more literals is registered through exactly two of its literals.
- A [compression log](compression) recording every rename performed while closing gaps in the variable numbering, from which literals and models translate between the original and current coordinate systems in both directions.
- Provenance: a name, the source path, the set of procedures applied, the accumulated processing time, and the [Equivalence] the formula retains to the original input.

Clauses are mutated only through the formula's own methods, so the index and the dirty bits cannot fall out of step.
External code holding a [ClauseKey] may read the clause it names, and may rewrite it through [update_clause](Formula::update_clause), which re-registers the watches of the rewritten clause.
*/

pub mod compression;
pub mod dimacs;
pub mod watches;

use std::{collections::BTreeSet, path::PathBuf, time::Duration};

use slotmap::{new_key_type, SlotMap};

use crate::{
    formula::{compression::CompressionLog, watches::Watches},
    misc::log::targets,
    structures::{
        clause::{Clause, ClauseOps},
        literal::{Literal, LiteralOps, Variable},
        model::Model,
    },
};

new_key_type! {
    /// A key into the clause store of a formula.
    pub struct ClauseKey;
}

/// How strongly a formula relates to the original input formula.
///
/// The levels form a linear order from strongest to weakest, and the level recorded by a formula only ever weakens as procedures are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Equivalence {
    /// The same models.
    Equivalent,

    /// The same number of models.
    NumberEquivalent,

    /// The same satisfiability.
    SatEquivalent,

    /// No relationship is guaranteed.
    Unequivalent,
}

impl std::fmt::Display for Equivalence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equivalent => write!(f, "Equivalent"),
            Self::NumberEquivalent => write!(f, "#Equivalent"),
            Self::SatEquivalent => write!(f, "satEquivalent"),
            Self::Unequivalent => write!(f, "Not Equivalent"),
        }
    }
}

/// A CNF formula, owning its clauses.
#[derive(Clone, Debug)]
pub struct Formula {
    clauses: SlotMap<ClauseKey, Clause>,
    order: Vec<ClauseKey>,

    watches: Watches,
    compression: CompressionLog,

    name: String,
    source: Option<PathBuf>,
    procedures: BTreeSet<String>,
    processing_time: Duration,
    equivalence: Equivalence,

    variables: Variable,
    variables_dirty: bool,
    max_variable: Variable,
    max_variable_dirty: bool,
}

impl Default for Formula {
    fn default() -> Self {
        Formula {
            clauses: SlotMap::default(),
            order: Vec::default(),
            watches: Watches::default(),
            compression: CompressionLog::default(),
            name: String::default(),
            source: None,
            procedures: BTreeSet::default(),
            processing_time: Duration::default(),
            equivalence: Equivalence::Equivalent,
            variables: 0,
            variables_dirty: true,
            max_variable: 0,
            max_variable_dirty: true,
        }
    }
}

impl Formula {
    /// An empty formula.
    pub fn new() -> Self {
        Formula::default()
    }

    /// A formula holding the given clauses, in order.
    pub fn from_clauses(clauses: impl IntoIterator<Item = Clause>) -> Self {
        let mut formula = Formula::new();
        for clause in clauses {
            formula.push(clause);
        }
        formula
    }

    /// A formula with the same provenance as this formula, but no clauses and an empty compression log.
    pub fn metadata_copy(&self) -> Self {
        let mut copy = Formula::new();
        copy.name = self.name.clone();
        copy.source = self.source.clone();
        copy.procedures = self.procedures.clone();
        copy.processing_time = self.processing_time;
        copy.equivalence = self.equivalence;
        copy
    }

    // Clause access

    /// The number of clauses in the formula.
    pub fn clause_count(&self) -> usize {
        self.order.len()
    }

    /// Whether the formula holds no clause.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The number of literals in the formula, counting duplicates.
    pub fn literal_count(&self) -> usize {
        self.order.iter().map(|key| self.clauses[*key].len()).sum()
    }

    /// The keys of the stored clauses, in order.
    pub fn keys(&self) -> impl Iterator<Item = ClauseKey> + '_ {
        self.order.iter().copied()
    }

    /// The stored clauses, in order.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> + '_ {
        self.order.iter().map(|key| &self.clauses[*key])
    }

    /// The clause a key names, if the key is live.
    pub fn clause(&self, key: ClauseKey) -> Option<&Clause> {
        self.clauses.get(key)
    }

    /// The clause at the given position.
    pub fn clause_at(&self, position: usize) -> Option<&Clause> {
        self.order.get(position).map(|key| &self.clauses[*key])
    }

    // Mutation

    /// Appends a clause, registering its watches.
    pub fn push(&mut self, clause: Clause) -> ClauseKey {
        let key = self.clauses.insert(clause);
        self.order.push(key);
        self.watches.register(&self.clauses[key], key);
        self.set_dirty();
        key
    }

    /// Removes and returns the last clause, if any.
    pub fn pop(&mut self) -> Option<Clause> {
        let key = self.order.pop()?;
        let clause = self.clauses.remove(key)?;
        self.watches.deregister(&clause, key);
        self.set_dirty();
        Some(clause)
    }

    /// Removes and returns the clause at the given position.
    pub fn remove_at(&mut self, position: usize) -> Clause {
        let key = self.order.remove(position);
        let clause = self.clauses.remove(key).unwrap_or_default();
        self.watches.deregister(&clause, key);
        self.set_dirty();
        clause
    }

    /// Removes the clauses in the given range of positions.
    pub fn remove_range(&mut self, range: std::ops::Range<usize>) {
        for key in self.order.drain(range).collect::<Vec<_>>() {
            if let Some(clause) = self.clauses.remove(key) {
                self.watches.deregister(&clause, key);
            }
        }
        self.set_dirty();
    }

    /// Removes the clause a key names, if the key is live.
    pub fn remove_key(&mut self, key: ClauseKey) -> Option<Clause> {
        let clause = self.clauses.remove(key)?;
        self.order.retain(|k| *k != key);
        self.watches.deregister(&clause, key);
        self.set_dirty();
        Some(clause)
    }

    /// Rewrites the clause a key names, re-registering its watches.
    pub fn update_clause(&mut self, key: ClauseKey, update: impl FnOnce(&mut Clause)) {
        let Some(clause) = self.clauses.get_mut(key) else {
            return;
        };
        let previous = clause.clone();
        update(clause);

        self.watches.deregister(&previous, key);
        self.watches.register(&self.clauses[key], key);
        self.set_dirty();
    }

    /// Removes every clause for which the predicate returns false.
    pub fn retain_clauses(&mut self, mut predicate: impl FnMut(&Clause) -> bool) {
        let keys = self.order.clone();
        for key in keys {
            if !predicate(&self.clauses[key]) {
                self.remove_key(key);
            }
        }
    }

    /// Drops every clause and watch; provenance and the compression log are kept.
    pub fn clear(&mut self) {
        self.clauses.clear();
        self.order.clear();
        self.watches.clear();
        self.set_dirty();
    }

    /// Reserves capacity for at least `additional` further clauses.
    pub fn reserve(&mut self, additional: usize) {
        self.order.reserve(additional);
    }

    /// Removes every clause from the formula, returning them in order.
    pub fn take_clauses(&mut self) -> Vec<Clause> {
        let order = std::mem::take(&mut self.order);
        let taken = order.into_iter().filter_map(|key| self.clauses.remove(key)).collect();
        self.watches.clear();
        self.set_dirty();
        taken
    }

    /// Appends every clause of another formula, in order.
    pub fn join(&mut self, other: &Formula) {
        for clause in other.clauses() {
            self.push(clause.clone());
        }
    }

    /// Renames a variable across all clauses, preserving polarity.
    ///
    /// No check is made that the new name is unused.
    pub fn rename_variable(&mut self, variable: Variable, name: Variable) {
        for clause in self.clauses.values_mut() {
            clause.rename_variable(variable, name);
        }
        self.rebuild_watches();
        self.set_dirty();
    }

    /// Applies a determined literal to the formula.
    ///
    /// Clauses satisfied by the literal are removed, and the negated literal is removed from the remaining clauses --- a clause emptied this way becomes the unsatisfiable marker.
    pub fn assign_literal(&mut self, literal: Literal) {
        let keys = self.order.clone();
        for key in keys {
            let clause = &self.clauses[key];
            if clause.contains_literal(literal) {
                self.remove_key(key);
            } else if clause.contains_literal(literal.negated()) {
                self.update_clause(key, |clause| {
                    clause.set_literal(literal);
                });
            }
        }
    }

    // Counts

    /// Marks the variable counts as requiring recomputation.
    ///
    /// The formula's own methods maintain the counts; this is for mutation which bypasses them.
    pub fn set_dirty(&mut self) {
        self.variables_dirty = true;
        self.max_variable_dirty = true;
    }

    /// The number of distinct variables used in the formula.
    pub fn variables(&mut self) -> Variable {
        if self.variables_dirty {
            let mut used = BTreeSet::new();
            for clause in self.clauses.values() {
                for literal in clause {
                    if *literal != 0 {
                        used.insert(literal.variable());
                    }
                }
            }
            self.variables = used.len() as Variable;
            self.variables_dirty = false;
        }
        self.variables
    }

    /// The maximum variable in the formula.
    ///
    /// Usually equal to [variables](Self::variables), though the two differ while the numbering is sparse.
    pub fn max_variable(&mut self) -> Variable {
        if self.max_variable_dirty {
            self.max_variable = self.clauses.values().map(|clause| clause.max_variable()).max().unwrap_or(0);
            self.max_variable_dirty = false;
        }
        self.max_variable
    }

    /// Whether the used variables are exactly 1 up to the maximum variable.
    pub fn is_compressed(&mut self) -> bool {
        self.variables() == self.max_variable()
    }

    /// How often each variable appears in the formula, indexed by variable.
    pub fn count_variables(&mut self) -> Vec<u32> {
        let mut counts = vec![0; self.max_variable() as usize + 1];
        for clause in self.clauses.values() {
            for literal in clause {
                if *literal != 0 {
                    counts[literal.variable() as usize] += 1;
                }
            }
        }
        counts
    }

    // Compression

    /// Renumbers the variables so the set 1 up to the maximum variable is exactly the set of used variables.
    ///
    /// Every rename is appended to the compression log.
    pub fn compress(&mut self) {
        if self.is_compressed() {
            return;
        }
        log::debug!(target: targets::FORMULA, "Compressing by {} variables", self.max_variable() - self.variables());

        let mut used = BTreeSet::new();
        for clause in self.clauses.values() {
            for literal in clause {
                if *literal != 0 {
                    used.insert(literal.variable());
                }
            }
        }

        let mut gap = 1;
        while let Some(max) = used.last().copied() {
            if gap >= max {
                break;
            }
            if !used.contains(&gap) {
                used.remove(&max);
                self.rename_variable(max, gap);
                self.compression.record(max, gap, false);
            }
            gap += 1;
        }

        self.set_dirty();
    }

    /// Records that a literal has been determined and its variable removed from the formula.
    ///
    /// The current maximum variable is renamed to fill the freed name, and the rename is logged together with the determined value.
    /// When the freed variable was itself the maximum there is nothing to rename, and only the value is logged.
    pub fn set_literal_backpropagated(&mut self, literal: Literal) {
        let max = self.max_variable();
        let freed = literal.variable();
        if max > freed {
            self.rename_variable(max, freed);
            self.compression.record(max, freed, literal.polarity());
        } else {
            self.compression.record(freed, freed, literal.polarity());
        }
        self.set_dirty();
    }

    /// Translates a literal of the original formula to its current name.
    pub fn compress_literal(&self, literal: Literal) -> Literal {
        self.compression.compress_literal(literal)
    }

    /// Translates a literal of the current formula back to its original name.
    pub fn decompress_literal(&self, literal: Literal) -> Literal {
        self.compression.decompress_literal(literal)
    }

    /// Translates a model of the original formula to a model of the current formula.
    pub fn compress_model(&self, model: &mut Model) {
        self.compression.compress_model(model);
    }

    /// Translates a model of the current formula to a model of the original formula.
    pub fn decompress_model(&self, model: &mut Model) {
        self.compression.decompress_model(model);
    }

    // Watches

    /// The compression log.
    pub fn compression(&self) -> &CompressionLog {
        &self.compression
    }

    /// The watched-literal index.
    pub fn watches(&self) -> &Watches {
        &self.watches
    }

    /// The keys of clauses watching the given literal.
    pub fn watchers_of(&self, literal: Literal) -> &[ClauseKey] {
        self.watches.watchers_of(literal)
    }

    fn rebuild_watches(&mut self) {
        self.watches.clear();
        for key in &self.order {
            self.watches.register(&self.clauses[*key], *key);
        }
    }

    // Provenance

    /// The name of the formula.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the name of the formula.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The path the formula was read from, if any.
    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    /// Sets the path the formula was read from.
    pub fn set_source(&mut self, source: PathBuf) {
        self.source = Some(source);
    }

    /// Notes the name of a procedure applied to the formula.
    pub fn add_procedure(&mut self, procedure: impl Into<String>) {
        self.procedures.insert(procedure.into());
    }

    /// The names of procedures applied to the formula, in lexicographic order.
    pub fn procedures(&self) -> impl Iterator<Item = &str> {
        self.procedures.iter().map(|name| name.as_str())
    }

    /// The equivalence the formula retains to the original input.
    pub fn equivalence(&self) -> Equivalence {
        self.equivalence
    }

    /// Weakens the recorded equivalence to the given level.
    ///
    /// A level stronger than the recorded level is ignored.
    pub fn degrade_equivalence(&mut self, equivalence: Equivalence) {
        if equivalence > self.equivalence {
            self.equivalence = equivalence;
        }
    }

    /// Adds a duration to the formula's accumulated processing time.
    pub fn add_processing_time(&mut self, duration: Duration) {
        self.processing_time += duration;
    }

    /// The formula's accumulated processing time.
    pub fn processing_time(&self) -> Duration {
        self.processing_time
    }
}
