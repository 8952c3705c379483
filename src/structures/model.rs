/*!
Models --- assignments of values to variables.

A model stores a value for each variable of a contiguous range from 1 to some limit, with index 0 a fixed sentinel.
Variables beyond the limit are unconstrained.

Models are typically read from the output stream of a solver, which lists the literals of a satisfying assignment on `v ` lines terminated by `0`:

```text
s SATISFIABLE
v 1 -2 3 0
```
*/

use std::io::BufRead;

use crate::structures::literal::{Literal, LiteralOps, Variable};

/// An assignment of values to the variables 1 up to some limit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    /// An empty model, constraining no variable.
    pub fn new() -> Self {
        Model { values: Vec::default() }
    }

    /// Whether the model constrains any variable.
    pub fn is_empty(&self) -> bool {
        self.values.len() <= 1
    }

    /// The largest variable the model assigns a value to.
    pub fn limit(&self) -> Variable {
        (self.values.len().max(1) - 1) as Variable
    }

    /// The value of a variable, if the model constrains it.
    pub fn value_of(&self, variable: Variable) -> Option<bool> {
        match variable {
            0 => None,
            _ => self.values.get(variable as usize).copied(),
        }
    }

    /// Assigns a value to a variable, extending the model with `false` if required.
    pub fn assign(&mut self, variable: Variable, value: bool) {
        let index = variable as usize;
        if self.values.len() <= index {
            self.values.resize(index + 1, false);
        }
        self.values[index] = value;
    }

    /// Appends a value for the next unconstrained variable.
    pub fn push(&mut self, value: bool) {
        if self.values.is_empty() {
            // Index 0 does not name a variable.
            self.values.push(false);
        }
        self.values.push(value);
    }

    /// Inserts a value at the position of the given variable, shifting every later value up by one variable.
    pub fn insert(&mut self, variable: Variable, value: bool) {
        let index = variable as usize;
        if self.values.len() < index {
            self.values.resize(index, false);
        }
        if self.values.is_empty() {
            self.values.push(false);
        }
        self.values.insert(index, value);
    }

    /// Removes the value at the position of the given variable, shifting every later value down by one variable.
    pub fn remove(&mut self, variable: Variable) {
        let index = variable as usize;
        if index != 0 && index < self.values.len() {
            self.values.remove(index);
        }
    }

    /// The literals made true by the model, in order of variable.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.values
            .iter()
            .enumerate()
            .skip(1)
            .map(|(variable, value)| Literal::of(variable as Variable, *value))
    }

    /// Reads a model from the output stream of a solver.
    ///
    /// Values are taken from lines beginning with `v`, in order of appearance, up to a terminating `0`.
    /// An output stream without `v` lines yields the empty model.
    pub fn from_solver_output(reader: impl BufRead) -> Self {
        let mut model = Model::new();

        'line_loop: for line in reader.lines() {
            let Ok(line) = line else {
                break 'line_loop;
            };
            if !line.starts_with('v') {
                continue 'line_loop;
            }

            for token in line.split_whitespace().skip(1) {
                match token.parse::<Literal>() {
                    Ok(0) => break 'line_loop,
                    Ok(literal) => model.push(literal.polarity()),
                    Err(_) => {
                        log::warn!(target: crate::misc::log::targets::SOLVER, "Unreadable literal in model line: {token}");
                        continue 'line_loop;
                    }
                }
            }
        }

        model
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut space = "";
        for literal in self.literals() {
            write!(f, "{space}{literal}")?;
            space = " ";
        }
        Ok(())
    }
}
