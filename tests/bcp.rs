use otter_prep::{
    formula::Formula,
    procedures::BooleanConstraintPropagation,
};

mod closure {
    use super::*;

    #[test]
    fn units_chain_to_the_full_closure() {
        let formula = Formula::from_clauses([vec![1], vec![-1, 2], vec![-2, 3]]);
        let bcp = BooleanConstraintPropagation::new();

        assert_eq!(bcp.closure(&formula), vec![1, 2, 3]);
    }

    #[test]
    fn applying_the_closure_empties_the_formula() {
        let mut formula = Formula::from_clauses([vec![1], vec![-1, 2], vec![-2, 3]]);
        let bcp = BooleanConstraintPropagation::new();

        let units = bcp.closure(&formula);
        bcp.apply_literals(&mut formula, &units);

        assert!(formula.is_empty());
    }

    #[test]
    fn the_closure_is_a_fixed_point() {
        let mut formula = Formula::from_clauses([vec![1], vec![-1, 2], vec![-2, 3], vec![3, 4, 5]]);
        let bcp = BooleanConstraintPropagation::new();

        let units = bcp.closure(&formula);
        bcp.apply_literals(&mut formula, &units);

        assert!(bcp.closure(&formula).is_empty());
    }

    #[test]
    fn no_units_no_closure() {
        let formula = Formula::from_clauses([vec![1, 2], vec![-1, -2]]);
        let bcp = BooleanConstraintPropagation::new();

        assert!(bcp.closure(&formula).is_empty());
    }

    #[test]
    fn contradictory_units_fail() {
        let formula = Formula::from_clauses([vec![1], vec![-1, 2], vec![-2]]);
        let bcp = BooleanConstraintPropagation::new();

        assert_eq!(bcp.closure(&formula), vec![0]);
    }

    #[test]
    fn a_formula_with_the_empty_clause_fails() {
        let formula = Formula::from_clauses([vec![1, 2], vec![0]]);
        let bcp = BooleanConstraintPropagation::new();

        assert_eq!(bcp.closure(&formula), vec![0]);
    }

    #[test]
    fn a_formula_without_clauses_is_untouched() {
        let mut formula = Formula::new();
        let bcp = BooleanConstraintPropagation::new();

        assert!(bcp.closure(&formula).is_empty());

        bcp.apply_literals(&mut formula, &[]);
        assert!(formula.is_empty());
    }
}

mod application {
    use super::*;

    #[test]
    fn satisfied_clauses_go_and_negations_shrink() {
        let mut formula = Formula::from_clauses([vec![1, 2], vec![-1, 3], vec![-1]]);
        let bcp = BooleanConstraintPropagation::new();

        bcp.apply_single_literal(&mut formula, 1);

        let clauses: Vec<_> = formula.clauses().cloned().collect();
        assert_eq!(clauses, vec![vec![3], vec![0]]);
    }

    #[test]
    fn eq_application_restores_units() {
        let mut formula = Formula::from_clauses([vec![1, 2], vec![-1, 3]]);
        let bcp = BooleanConstraintPropagation::new();

        bcp.apply_literals_eq(&mut formula, &[1]);

        let clauses: Vec<_> = formula.clauses().cloned().collect();
        assert_eq!(clauses, vec![vec![3], vec![1]]);
    }
}
