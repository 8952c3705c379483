/*!
Reading and writing formulas in the DIMACS format.

# Reading

The reader is tolerant.
Comment lines are skipped, exactly one `p cnf <variables> <clauses>` problem line is required, and the remaining tokens form a stream of literals in which `0` terminates a clause.
Mismatches between the counts declared on the problem line and the counts read from the stream are reported as warnings, and the clauses read are retained.

A line consisting of a bare `0` is the empty clause of the classical presentation, and is stored as the unsatisfiable marker `[0]`.

Reading failure produces no observable mutation --- a formula is returned only when the read succeeds.

# Writing

Output opens with comment lines recording the provenance of the formula: its name, the tool version and build type, the total processing time, the set of applied procedures, and the equivalence the formula retains to the original input.
The problem line and the clauses follow.

If the output path refers to a directory the file is written as `<source stem>out.cnf` inside it.
An existing file is preserved unless overwriting is forced.
*/

use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use crate::{
    formula::Formula,
    misc::log::targets,
    structures::clause::{Clause, ClauseOps},
    types::err::{self, ErrorKind},
};

impl Formula {
    /// Reads a formula from a DIMACS file.
    pub fn from_dimacs_path(path: impl AsRef<Path>) -> Result<Formula, ErrorKind> {
        let path = path.as_ref();
        if !path.is_file() {
            log::error!(target: targets::DIMACS, "File {} doesn't exist", path.display());
            return Err(err::ParseError::NoFile(path.to_path_buf()).into());
        }

        let file = match File::open(path) {
            Ok(file) => file,
            Err(_) => {
                log::error!(target: targets::DIMACS, "File {} couldn't be opened", path.display());
                return Err(err::ParseError::Unreadable(path.to_path_buf()).into());
            }
        };

        let mut formula = Formula::from_dimacs(BufReader::new(file))?;
        formula.set_name(path.display().to_string());
        formula.set_source(path.to_path_buf());
        Ok(formula)
    }

    /// Reads a formula from a DIMACS stream.
    pub fn from_dimacs(reader: impl BufRead) -> Result<Formula, ErrorKind> {
        let mut formula = Formula::new();

        let mut declared_variables: u32 = 0;
        let mut declared_clauses: usize = 0;
        let mut problem_line_found = false;

        let mut clause_buffer = Clause::default();
        let mut line_counter = 0;

        'line_loop: for line in reader.lines() {
            line_counter += 1;
            let Ok(line) = line else {
                return Err(err::ParseError::Literal(line_counter).into());
            };

            match line.chars().next() {
                Some('c') => continue 'line_loop,

                Some('%') => break 'line_loop,

                Some('p') => {
                    if problem_line_found {
                        log::error!(target: targets::DIMACS, "Multiple problem lines, second at line {line_counter}");
                        return Err(err::ParseError::DuplicateProblem(line_counter).into());
                    }

                    let mut details = line.split_whitespace().skip(2);
                    let (Some(variables), Some(clauses)) = (details.next(), details.next()) else {
                        return Err(err::ParseError::ProblemSpecification.into());
                    };
                    let (Ok(variables), Ok(clauses)) = (variables.parse(), clauses.parse()) else {
                        return Err(err::ParseError::ProblemSpecification.into());
                    };

                    declared_variables = variables;
                    declared_clauses = clauses;
                    problem_line_found = true;

                    log::info!(target: targets::DIMACS, "Read problem line: {declared_variables} variables and {declared_clauses} clauses");
                    formula.reserve(declared_clauses);
                }

                _ => {
                    for token in line.split_whitespace() {
                        match token.parse::<i32>() {
                            Ok(0) => {
                                let clause = std::mem::take(&mut clause_buffer);
                                match clause.is_empty() {
                                    // A clause without literals is unsatisfiable.
                                    true => formula.push(vec![0]),
                                    false => formula.push(clause),
                                };
                            }
                            Ok(literal) => clause_buffer.push(literal),
                            Err(_) => return Err(err::ParseError::Literal(line_counter).into()),
                        }
                    }
                }
            }
        }

        if !problem_line_found {
            log::error!(target: targets::DIMACS, "There was no problem line to read");
            return Err(err::ParseError::ProblemSpecification.into());
        }

        if !clause_buffer.is_empty() {
            log::warn!(target: targets::DIMACS, "Unterminated clause at the end of the input");
            formula.push(clause_buffer);
        }

        if formula.clause_count() != declared_clauses {
            log::warn!(target: targets::DIMACS,
                "Number of clauses read ({}) differs from number of clauses in header ({declared_clauses})",
                formula.clause_count()
            );
        }
        if formula.variables() != declared_variables {
            log::warn!(target: targets::DIMACS,
                "Number of variables read ({}) differs from number of variables in header ({declared_variables})",
                formula.variables()
            );
        }
        if !formula.is_compressed() {
            log::warn!(target: targets::DIMACS,
                "The variables are not dense, maximum variable is {} but number of variables is {}",
                formula.max_variable(),
                formula.variables()
            );
        }

        log::info!(target: targets::DIMACS,
            "Successfully read {} variables and {} clauses",
            formula.variables(),
            formula.clause_count()
        );

        Ok(formula)
    }

    /// The comment and problem lines opening the DIMACS form of the formula.
    pub fn file_header(&mut self) -> String {
        let mut header = String::new();

        header.push_str(&format!("c {}\n", self.name()));
        header.push_str(&format!(
            "c Processed by otter_prep v{} Type: {}\n",
            crate::VERSION,
            crate::BUILD_TYPE
        ));
        header.push_str(&format!("c Processing took {:.2?}\n", self.processing_time()));

        let procedures: Vec<String> = self.procedures().map(|name| format!("\"{name}\"")).collect();
        match procedures.is_empty() {
            true => header.push_str("c Used Procedures: None\n"),
            false => header.push_str(&format!("c Used Procedures: {}\n", procedures.join(", "))),
        };

        match self.equivalence() {
            crate::formula::Equivalence::Equivalent => {
                header.push_str("c This formula is Equivalent to the original input formula\n");
            }
            other => {
                header.push_str(&format!(
                    "c This formula is at least {other} to the original input formula\n"
                ));
            }
        }

        header.push_str(&format!("p cnf {} {}\n", self.max_variable(), self.clause_count()));
        header
    }

    /// The formula in DIMACS form, header included.
    pub fn as_dimacs(&mut self) -> String {
        let mut out = self.file_header();
        for clause in self.clauses() {
            out.push_str(&clause.as_dimacs(true));
            out.push('\n');
        }
        out
    }

    /// Writes the formula to the given path.
    ///
    /// If the path refers to a directory the file is named `<source stem>out.cnf` inside it.
    /// Returns the path written to.
    pub fn write_dimacs_path(&mut self, path: impl AsRef<Path>, force: bool) -> Result<PathBuf, ErrorKind> {
        let path = path.as_ref();

        let file_path = match path.is_dir() {
            true => {
                let stem = match self.source().and_then(|source| source.file_stem()) {
                    Some(stem) => stem.to_string_lossy().into_owned(),
                    None => {
                        log::warn!(target: targets::DIMACS, "Formula doesn't have an original file name, using default 'out'");
                        String::default()
                    }
                };
                path.join(format!("{stem}out.cnf"))
            }
            false => path.to_path_buf(),
        };

        log::debug!(target: targets::DIMACS, "Writing formula to file {}", file_path.display());

        if !force && file_path.exists() {
            log::warn!(target: targets::DIMACS, "File {} already exists, use -f to force override", file_path.display());
            return Err(err::WriteError::Exists(file_path).into());
        }

        // The output is assembled in full before the file is touched, so no partial formula can appear.
        let content = self.as_dimacs();

        let mut file = match File::create(&file_path) {
            Ok(file) => file,
            Err(_) => {
                log::error!(target: targets::DIMACS, "Couldn't create file {}", file_path.display());
                return Err(err::WriteError::Create(file_path).into());
            }
        };

        match file.write_all(content.as_bytes()) {
            Ok(_) => Ok(file_path),
            Err(_) => {
                log::error!(target: targets::DIMACS, "Couldn't write file {}", file_path.display());
                Err(err::WriteError::Create(file_path).into())
            }
        }
    }
}
