use std::{rc::Rc, time::Duration};

use otter_prep::{
    formula::{Equivalence, Formula},
    procedures::{
        BackboneSimplification, BipartitionAndElimination, BooleanConstraintPropagation,
        OccurrenceSimplification, Procedure, ProcedureManager, SelfSubsumingResolution, Vivification,
    },
    solvers::{dpll::DpllSolver, Solver, Verdict},
    structures::{
        clause::{Clause, ClauseOps},
        literal::{Literal, LiteralOps},
    },
};

const TIMEOUT: Duration = Duration::from_secs(10);

fn solver() -> Rc<dyn Solver> {
    Rc::new(DpllSolver::new())
}

/// The number of models of the formula over the variables 1 up to `limit`, by exhaustion.
fn model_count(formula: &Formula, limit: u32) -> u64 {
    let clauses: Vec<Clause> = formula.clauses().filter(|c| !c.is_empty()).cloned().collect();

    let mut count = 0;
    for bits in 0u64..(1 << limit) {
        let assignment: Vec<Literal> = (1..=limit)
            .map(|v| Literal::of(v, bits >> (v - 1) & 1 == 1))
            .collect();
        if clauses.iter().all(|c| c.is_satisfied_by(&assignment)) {
            count += 1;
        }
    }
    count
}

fn is_satisfiable(formula: &Formula) -> bool {
    let mut copy = formula.clone();
    DpllSolver::new().is_satisfiable(&mut copy, TIMEOUT) == Verdict::Satisfiable
}

mod backbone {
    use super::*;

    #[test]
    fn a_forced_formula_collapses() {
        // Unit -1 forces 2 through (1 2): both literals are backbone, and propagating the
        // backbone leaves nothing.
        let mut formula = Formula::from_clauses([vec![1, 2], vec![-1, 2], vec![-1]]);

        let mut backbone = BackboneSimplification::propagating(solver(), TIMEOUT);
        let found = backbone.backbone(&formula);

        assert!(found.contains(&-1));
        assert!(found.contains(&2));

        backbone.apply(&mut formula);
        assert!(formula.is_empty());
        assert!(is_satisfiable(&formula));
        assert_eq!(formula.equivalence(), Equivalence::Equivalent);
    }

    #[test]
    fn recorded_units_absorb_the_backbone() {
        let mut formula = Formula::from_clauses([vec![1, 2], vec![-1, 2], vec![-1]]);

        let mut backbone = BackboneSimplification::new(solver(), TIMEOUT);
        backbone.apply(&mut formula);

        // The backbone survives as unit clauses, and a second pass finds every candidate
        // already settled.
        let clauses: Vec<_> = formula.clauses().cloned().collect();
        assert!(clauses.contains(&vec![-1]));
        assert!(clauses.contains(&vec![2]));

        let counts = (formula.clause_count(), formula.literal_count());
        backbone.apply(&mut formula);
        assert_eq!(counts, (formula.clause_count(), formula.literal_count()));
    }

    #[test]
    fn an_unsatisfiable_formula_has_no_backbone() {
        let formula = Formula::from_clauses([vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]]);

        let backbone = BackboneSimplification::new(solver(), TIMEOUT);
        assert!(backbone.backbone(&formula).is_empty());
    }

    #[test]
    fn backbone_values_translate_back_through_the_log() {
        let mut formula = Formula::from_clauses([vec![1, 2], vec![-1, 2], vec![-1]]);

        BackboneSimplification::propagating(solver(), TIMEOUT).apply(&mut formula);
        assert!(formula.is_empty());

        // The empty model of the residue decompresses to the one model of the input.
        let mut model = otter_prep::structures::model::Model::new();
        formula.decompress_model(&mut model);
        assert_eq!(model.value_of(1), Some(false));
        assert_eq!(model.value_of(2), Some(true));
    }
}

mod vivification {
    use super::*;

    #[test]
    fn entailed_clauses_are_dropped() {
        // (1 2 3) is subsumed by (1 2), and propagation of the rebuilt prefix finds this.
        let mut formula = Formula::from_clauses([vec![1, 2, 3], vec![1, 2]]);

        Vivification::new().apply(&mut formula);

        assert!(is_satisfiable(&formula));
        assert_eq!(model_count(&formula, 3), model_count(&Formula::from_clauses([vec![1, 2, 3], vec![1, 2]]), 3));
        assert!(formula.clause_count() <= 2);
        assert!(formula.literal_count() <= 5);
    }

    #[test]
    fn twice_never_grows() {
        let start = [vec![1, 2, 3], vec![-1, 2], vec![2, 3], vec![-2, -3], vec![3, 1]];
        let mut formula = Formula::from_clauses(start);

        let mut vivification = Vivification::new();
        vivification.apply(&mut formula);
        let (clauses_once, literals_once) = (formula.clause_count(), formula.literal_count());

        vivification.apply(&mut formula);
        assert!(formula.clause_count() <= clauses_once);
        assert!(formula.literal_count() <= literals_once);
    }

    #[test]
    fn unsatisfiability_is_preserved() {
        let mut formula = Formula::from_clauses([vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]]);

        Vivification::new().apply(&mut formula);

        assert!(!is_satisfiable(&formula));
        assert_eq!(formula.equivalence(), Equivalence::Equivalent);
    }

    #[test]
    fn the_unsatisfiable_marker_passes_through() {
        let mut formula = Formula::from_clauses([vec![0], vec![1, 2]]);

        Vivification::new().apply(&mut formula);

        assert!(formula.clauses().any(|clause| clause.is_unsatisfiable()));
    }

    #[test]
    fn an_empty_formula_is_untouched() {
        let mut formula = Formula::new();
        assert!(Vivification::new().apply(&mut formula));
        assert!(formula.is_empty());
    }
}

mod occurrence {
    use super::*;

    #[test]
    fn a_redundant_literal_is_deleted() {
        // Literal 3 is redundant in (1 2 3) given the rest; the pass deletes one literal of
        // the first clause and keeps the models.
        let original = [vec![1, 2, 3], vec![1, 2, -3], vec![1, -2, 3]];
        let mut formula = Formula::from_clauses(original.clone());

        OccurrenceSimplification::new().apply(&mut formula);

        assert_eq!(formula.clause_at(0).unwrap().len(), 2);
        assert!(formula.clause_at(0).unwrap().contains_literal(1));
        assert_eq!(model_count(&formula, 3), model_count(&Formula::from_clauses(original), 3));
        assert_eq!(formula.equivalence(), Equivalence::Equivalent);
    }

    #[test]
    fn tautologies_collapse() {
        let mut formula = Formula::from_clauses([vec![1, -1], vec![1, 2]]);

        OccurrenceSimplification::new().apply(&mut formula);

        let clauses: Vec<_> = formula.clauses().cloned().collect();
        assert_eq!(clauses, vec![vec![1, 2]]);
    }

    #[test]
    fn an_empty_formula_is_untouched() {
        let mut formula = Formula::new();
        assert!(OccurrenceSimplification::new().apply(&mut formula));
        assert!(formula.is_empty());
    }
}

mod self_subsumption {
    use super::*;

    #[test]
    fn strengthening_keeps_the_models() {
        let original = [vec![1, 2], vec![-1, 2, 3], vec![-2, 3, 4]];
        let mut formula = Formula::from_clauses(original.clone());

        SelfSubsumingResolution::new().apply(&mut formula);

        assert!(formula.literal_count() < 8);
        assert_eq!(model_count(&formula, 4), model_count(&Formula::from_clauses(original), 4));
    }
}

mod bipartition {
    use super::*;

    #[test]
    fn defined_variables_are_outputs() {
        // 3 is exactly 1-and-2, so {1, 2} defines 3; 1 and 2 are free.
        let formula = Formula::from_clauses([
            vec![-1, -2, 3],
            vec![1, -3],
            vec![2, -3],
        ]);

        let procedure = BipartitionAndElimination::new(solver(), TIMEOUT, 500);

        assert!(procedure.is_defined(3, &formula, &[1, 2]));
        assert!(!procedure.is_defined(1, &formula, &[2, 3]));

        let outputs = procedure.bipartition(&formula);
        assert!(outputs.contains(&3));
        assert!(!outputs.contains(&1));
        assert!(!outputs.contains(&2));
    }

    #[test]
    fn elimination_preserves_the_model_count() {
        // 3 is defined by 1 and 2; eliminating it keeps one model per assignment of {1, 2}.
        let original = [vec![-1, -2, 3], vec![1, -3], vec![2, -3], vec![1, 2]];
        let mut formula = Formula::from_clauses(original.clone());

        let before = model_count(&Formula::from_clauses(original), 3);

        let mut procedure = BipartitionAndElimination::new(solver(), TIMEOUT, 500);
        procedure.apply(&mut formula);

        assert_eq!(formula.equivalence(), Equivalence::NumberEquivalent);
        let limit = formula.max_variable();
        assert_eq!(model_count(&formula, limit), before);
    }

    #[test]
    fn two_models_differing_in_one_free_variable() {
        // Exactly two models, differing only in variable 4.  The three determined variables
        // each contribute a factor of one when eliminated; the free variable contributes its
        // factor of two whether it survives in a clause or not.
        let original = [vec![1], vec![2], vec![3], vec![2, 4]];
        let mut formula = Formula::from_clauses(original.clone());

        assert_eq!(model_count(&Formula::from_clauses(original), 4), 2);

        let mut procedure = BipartitionAndElimination::new(solver(), TIMEOUT, 500);
        procedure.apply(&mut formula);

        assert_eq!(formula.equivalence(), Equivalence::NumberEquivalent);

        // The three defined variables are eliminated; the count over what remains, times two
        // for each free variable no clause mentions any longer, matches the input.
        let limit = formula.max_variable();
        let eliminated_outputs = 3;
        let free_variables_lost = 4 - eliminated_outputs - u64::from(limit);
        let restored = model_count(&formula, limit) << free_variables_lost;
        assert_eq!(restored, 2);
    }

    #[test]
    fn the_budget_postpones_elimination() {
        // 1 is defined (it is exactly ¬2), but a budget of zero postpones any variable with
        // both polarities present, so the formula is retained as it stands.
        let original = [vec![1, 2], vec![-1, -2]];
        let mut formula = Formula::from_clauses(original.clone());

        let mut procedure = BipartitionAndElimination::new(solver(), TIMEOUT, 0);
        procedure.apply(&mut formula);

        assert_eq!(formula.max_variable(), 2);
        assert_eq!(
            model_count(&formula, 2),
            model_count(&Formula::from_clauses(original), 2)
        );
    }
}

mod manager {
    use super::*;

    #[test]
    fn procedures_run_in_order_to_a_fixed_point() {
        let mut formula = Formula::from_clauses([vec![1, 2, 3], vec![1, 2], vec![1, 2, -3]]);

        let mut manager = ProcedureManager::new(10, 1, 1);
        manager.add_iterative_procedure(Box::new(Vivification::new()));
        manager.add_iterative_procedure(Box::new(OccurrenceSimplification::new()));

        manager.apply(&mut formula);

        assert!(formula.clause_count() <= 2);
        assert!(formula.procedures().count() >= 2);
        assert!(formula.processing_time() > Duration::ZERO);
    }

    #[test]
    fn equivalence_degrades_to_the_weakest_applied() {
        let mut formula = Formula::from_clauses([vec![1], vec![-1, 2]]);

        let mut bcp = BooleanConstraintPropagation::new();
        let mut vivification = Vivification::new();

        vivification.apply(&mut formula);
        assert_eq!(formula.equivalence(), Equivalence::Equivalent);

        bcp.apply(&mut formula);
        assert_eq!(formula.equivalence(), Equivalence::SatEquivalent);

        // A stronger procedure cannot win the level back.
        vivification.apply(&mut formula);
        assert_eq!(formula.equivalence(), Equivalence::SatEquivalent);
    }

    #[test]
    fn an_empty_formula_survives_every_procedure() {
        let mut formula = Formula::new();

        let mut manager = ProcedureManager::new(3, 1, 1);
        manager.add_one_time_procedure(Box::new(BackboneSimplification::new(solver(), TIMEOUT)));
        manager.add_one_time_procedure(Box::new(BipartitionAndElimination::new(solver(), TIMEOUT, 500)));
        manager.add_iterative_procedure(Box::new(Vivification::new()));
        manager.add_iterative_procedure(Box::new(OccurrenceSimplification::new()));
        manager.add_iterative_procedure(Box::new(SelfSubsumingResolution::new()));

        manager.apply(&mut formula);

        assert!(formula.is_empty());
        assert!(is_satisfiable(&formula));
    }
}
