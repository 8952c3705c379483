use std::io::Write;

use otter_prep::formula::{Equivalence, Formula};

mod reading {
    use super::*;

    #[test]
    fn tolerates_count_mismatches() {
        // Three clauses declared, two present: a warning, not an error.
        let dimacs = b"p cnf 2 3\n1 2 0\n-1 -2 0\n" as &[u8];

        let formula = Formula::from_dimacs(dimacs).unwrap();
        assert_eq!(formula.clause_count(), 2);
    }

    #[test]
    fn comments_and_satlib_terminators_are_skipped() {
        let dimacs = b"c problem\nc more comments\np cnf 2 2\n1 2 0\n-1 2 0\n%\n0\n" as &[u8];

        let formula = Formula::from_dimacs(dimacs).unwrap();
        assert_eq!(formula.clause_count(), 2);
    }

    #[test]
    fn a_second_problem_line_is_an_error() {
        let dimacs = b"p cnf 2 1\np cnf 2 1\n1 2 0\n" as &[u8];
        assert!(Formula::from_dimacs(dimacs).is_err());
    }

    #[test]
    fn a_malformed_literal_is_an_error() {
        let dimacs = b"p cnf 2 1\n1 two 0\n" as &[u8];
        assert!(Formula::from_dimacs(dimacs).is_err());
    }

    #[test]
    fn a_missing_file_is_an_error() {
        assert!(Formula::from_dimacs_path("no/such/file.cnf").is_err());
    }
}

mod writing {
    use super::*;

    #[test]
    fn output_round_trips() {
        let mut formula = Formula::from_dimacs(b"p cnf 3 2\n1 -2 0\n2 3 0\n" as &[u8]).unwrap();

        let written = formula.as_dimacs();
        let mut reread = Formula::from_dimacs(written.as_bytes()).unwrap();

        assert_eq!(reread.clause_count(), 2);
        assert_eq!(reread.max_variable(), 3);
        let clauses: Vec<_> = reread.clauses().cloned().collect();
        assert_eq!(clauses, vec![vec![1, -2], vec![2, 3]]);
    }

    #[test]
    fn existing_files_are_preserved_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formula.cnf");
        std::fs::write(&path, "untouched").unwrap();

        let mut formula = Formula::from_clauses([vec![1]]);

        assert!(formula.write_dimacs_path(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "untouched");

        assert!(formula.write_dimacs_path(&path, true).is_ok());
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("c "));
    }

    #[test]
    fn directories_take_the_source_stem() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("problem.cnf");
        std::fs::write(&source, "p cnf 1 1\n1 0\n").unwrap();

        let mut formula = Formula::from_dimacs_path(&source).unwrap();
        let written = formula.write_dimacs_path(dir.path(), false).unwrap();

        assert_eq!(written.file_name().unwrap(), "problemout.cnf");
        assert!(written.exists());
    }

    #[test]
    fn the_header_declares_the_equivalence() {
        let mut formula = Formula::from_clauses([vec![1, 2]]);

        assert!(formula.file_header().contains("is Equivalent to the original"));

        formula.degrade_equivalence(Equivalence::SatEquivalent);
        assert!(formula.file_header().contains("at least satEquivalent"));
    }
}

mod cli {
    use super::*;
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn write_formula(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".cnf").tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn preprocesses_to_the_named_output() {
        let input = write_formula("p cnf 3 3\n1 2 3 0\n1 2 0\n1 2 -3 0\n");
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.cnf");

        // No solver is installed in the test environment: solver-backed procedures degrade
        // conservatively and the propagation-based ones still run.
        let mut cmd = Command::cargo_bin("otter_prep").unwrap();
        cmd.arg(input.path())
            .args(["-o"])
            .arg(&output)
            .args(["-v", "0"])
            .assert()
            .success();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("p cnf"));
        assert!(content.contains("c Used Procedures:"));
    }

    #[test]
    fn missing_input_fails() {
        let mut cmd = Command::cargo_bin("otter_prep").unwrap();
        cmd.arg("no/such/file.cnf")
            .args(["-v", "0"])
            .assert()
            .failure()
            .code(1);
    }

    #[test]
    fn existing_output_without_force_fails() {
        let input = write_formula("p cnf 1 1\n1 0\n");
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("exists.cnf");
        std::fs::write(&output, "keep me").unwrap();

        let mut cmd = Command::cargo_bin("otter_prep").unwrap();
        cmd.arg(input.path())
            .args(["-o"])
            .arg(&output)
            .args(["-v", "0"])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("already exists"));

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");
    }
}
