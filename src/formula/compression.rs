/*!
The compression log --- a reversible stream of variable renames.

Whenever a formula renames a variable to close a gap in its numbering --- during [compression](crate::formula::Formula::compress) or after a literal has been [determined and removed](crate::formula::Formula::set_literal_backpropagated) --- the rename is appended to the log as a step `(original, renamed, value)`:

- `original` is the name the variable held before the step, always the maximum variable at the time.
- `renamed` is the name the variable holds after the step.
- `value` is the value the variable *previously named* `renamed` takes in any model of the original formula: `false` for a variable freed by compression (it did not occur), and the determined value for a backpropagated literal.

Translation between the external (original) and internal (current) coordinate systems is then a fold over the log: forward for compression, backward for decompression.
No hidden side tables --- the log is the whole story, and replaying it in reverse recovers original literals and models exactly.
*/

use crate::structures::{
    literal::{Literal, LiteralOps, Variable},
    model::Model,
};

/// A single rename: the variable `original` became `renamed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressionStep {
    /// The name of the variable before the step, the maximum variable at the time.
    pub original: Variable,

    /// The name of the variable after the step.
    pub renamed: Variable,

    /// The value of the variable previously named `renamed`, in models of the original formula.
    pub value: bool,
}

/// An ordered log of renames, translating literals and models in both directions.
#[derive(Clone, Debug, Default)]
pub struct CompressionLog {
    steps: Vec<CompressionStep>,
}

impl CompressionLog {
    /// Whether any rename has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The recorded renames, oldest first.
    pub fn steps(&self) -> impl Iterator<Item = &CompressionStep> {
        self.steps.iter()
    }

    /// Appends a rename to the log.
    pub fn record(&mut self, original: Variable, renamed: Variable, value: bool) {
        self.steps.push(CompressionStep { original, renamed, value });
    }

    /// Translates a literal of the original formula to its current name.
    pub fn compress_literal(&self, literal: Literal) -> Literal {
        let mut variable = literal.variable();
        for step in &self.steps {
            if variable == step.original {
                variable = step.renamed;
            }
        }
        Literal::of(variable, literal.polarity())
    }

    /// Translates a literal of the current formula back to its original name.
    pub fn decompress_literal(&self, literal: Literal) -> Literal {
        let mut variable = literal.variable();
        for step in self.steps.iter().rev() {
            if variable == step.renamed {
                variable = step.original;
            }
        }
        Literal::of(variable, literal.polarity())
    }

    /// Translates a model of the original formula to a model of the current formula.
    pub fn compress_model(&self, model: &mut Model) {
        for step in &self.steps {
            let value = model.value_of(step.original).unwrap_or(false);
            model.assign(step.renamed, value);
            model.remove(step.original);
        }
    }

    /// Translates a model of the current formula to a model of the original formula.
    ///
    /// Each step is undone in reverse: the variable at `renamed` moves back to `original`, and `renamed` takes the value recorded for the variable it displaced.
    pub fn decompress_model(&self, model: &mut Model) {
        for step in self.steps.iter().rev() {
            let value = model.value_of(step.renamed).unwrap_or(false);
            model.insert(step.original, value);
            model.assign(step.renamed, step.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_round_trip() {
        let mut log = CompressionLog::default();
        log.record(6, 2, false);
        log.record(5, 3, false);

        assert_eq!(log.compress_literal(6), 2);
        assert_eq!(log.compress_literal(-5), -3);
        assert_eq!(log.compress_literal(1), 1);

        for literal in [1, -2, 3, -4, 5, -6] {
            assert_eq!(log.decompress_literal(log.compress_literal(literal)), literal);
        }
    }

    #[test]
    fn model_round_trip() {
        let mut log = CompressionLog::default();
        log.record(6, 2, false);
        log.record(5, 3, false);

        // A model over the original variables {1, 4, 5, 6}; 2 and 3 were gaps.
        let mut model = Model::new();
        for value in [true, false, false, true, true, false] {
            model.push(value);
        }

        log.compress_model(&mut model);
        assert_eq!(model.value_of(2), Some(false));
        assert_eq!(model.value_of(3), Some(true));

        log.decompress_model(&mut model);
        assert_eq!(model.value_of(1), Some(true));
        assert_eq!(model.value_of(4), Some(true));
        assert_eq!(model.value_of(5), Some(true));
        assert_eq!(model.value_of(6), Some(false));
        // The gaps take the recorded value.
        assert_eq!(model.value_of(2), Some(false));
        assert_eq!(model.value_of(3), Some(false));
    }
}
