use pretty_assertions::{assert_eq, assert_str_eq};

use super::*;

fn prepare_problem() -> Problem {
    Problem::new(
        ObjectiveFunction::minimize(vec![2., 3., 1.]),
        vec![
            Constraint::new(vec![1., 1., 0.], Sign::Less, 10.),
            Constraint::new(vec![0., 1., 1.], Sign::Greater, 4.),
            Constraint::new(vec![1., 0., 1.], Sign::Equals, 6.),
            Constraint::new(vec![1., 2., 3.], Sign::Greater, 3.),
        ],
    )
    .unwrap()
}

#[test]
fn standard_form_assigns_auxiliary_columns_cumulatively() {
    let form = prepare_problem().standard_form();

    assert_str_eq!(
        form.tableau.to_string(),
        DMatrix::from_row_slice(
            4,
            10,
            &[
                1., 1., 0., 1., 0., 0., 0., 0., 0., 10., //
                0., 1., 1., 0., -1., 1., 0., 0., 0., 4., //
                1., 0., 1., 0., 0., 0., 1., 0., 0., 6., //
                1., 2., 3., 0., 0., 0., 0., -1., 1., 3., //
            ]
        )
        .to_string()
    );
    assert_eq!(form.artificial_columns, vec![5, 6, 8]);
    assert_eq!(form.artificial_rows, vec![1, 2, 3]);
    assert_eq!(form.basis, vec![3, 5, 6, 8]);
    assert_eq!(form.n_auxiliary, 6);
    assert_eq!(form.n_basic_rows, 4);
    assert_eq!(
        form.columns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        vec!["X1", "X2", "X3", "S1", "E2", "A2", "A3", "E4", "A4"]
    );
}

#[test]
fn standard_form_of_less_or_equal_problem_has_no_artificials() {
    let problem = Problem::new(
        ObjectiveFunction::maximize(vec![12., 8.]),
        vec![
            Constraint::new(vec![5., 2.], Sign::Less, 150.),
            Constraint::new(vec![2., 3.], Sign::Less, 100.),
            Constraint::new(vec![4., 2.], Sign::Less, 80.),
        ],
    )
    .unwrap();
    let form = problem.standard_form();

    assert_str_eq!(
        form.tableau.to_string(),
        DMatrix::from_row_slice(
            3,
            6,
            &[
                5., 2., 1., 0., 0., 150., //
                2., 3., 0., 1., 0., 100., //
                4., 2., 0., 0., 1., 80., //
            ]
        )
        .to_string()
    );
    assert!(form.artificial_columns.is_empty());
    assert!(form.artificial_rows.is_empty());
    assert_eq!(form.basis, vec![2, 3, 4]);
}

#[test]
fn validation_rejects_mismatched_arity() {
    let err = Problem::new(
        ObjectiveFunction::maximize(vec![1., 1.]),
        vec![
            Constraint::new(vec![1., 1.], Sign::Less, 4.),
            Constraint::new(vec![1., 1., 1.], Sign::Less, 4.),
        ],
    )
    .unwrap_err();

    assert_eq!(
        err,
        ValidationError::ArityMismatch {
            constraint: 1,
            expected: 2,
            found: 3,
        }
    );
    assert_eq!(err.to_string(), "constraint 1 has 3 coefficients, expected 2");
}

#[test]
fn validation_rejects_negative_rhs() {
    let err = Problem::new(
        ObjectiveFunction::minimize(vec![1.]),
        vec![Constraint::new(vec![1.], Sign::Greater, -2.)],
    )
    .unwrap_err();

    assert_eq!(
        err,
        ValidationError::NegativeRhs {
            constraint: 0,
            rhs: -2.,
        }
    );
}

#[test]
fn negative_rhs_on_less_or_equal_row_is_stored_negated() {
    let problem = Problem::new(
        ObjectiveFunction::minimize(vec![0., 1.]),
        vec![
            Constraint::new(vec![1., 1.], Sign::Less, 4.),
            Constraint::new(vec![1., -1.], Sign::Less, -1.),
        ],
    )
    .unwrap();

    assert_eq!(
        problem.constraints(),
        &[
            Constraint::new(vec![1., 1.], Sign::Less, 4.),
            Constraint::new(vec![-1., 1.], Sign::Greater, 1.),
        ]
    );
    assert_eq!(
        Problem::new(
            ObjectiveFunction::minimize(vec![1., 1.]),
            vec![Constraint::new(vec![1., 1.], Sign::Equals, -1.)],
        ),
        Err(ValidationError::NegativeRhs {
            constraint: 0,
            rhs: -1.,
        })
    );
}

#[test]
fn validation_rejects_empty_and_non_finite_input() {
    assert_eq!(
        Problem::new(
            ObjectiveFunction::maximize(vec![]),
            vec![Constraint::new(vec![], Sign::Less, 1.)],
        ),
        Err(ValidationError::NoVariables)
    );
    assert_eq!(
        Problem::new(ObjectiveFunction::maximize(vec![1.]), vec![]),
        Err(ValidationError::NoConstraints)
    );
    assert_eq!(
        Problem::new(
            ObjectiveFunction::maximize(vec![1., f64::NAN]),
            vec![Constraint::new(vec![1., 1.], Sign::Less, 1.)],
        ),
        Err(ValidationError::NonFiniteObjective { variable: 1 })
    );
    assert_eq!(
        Problem::new(
            ObjectiveFunction::maximize(vec![1.]),
            vec![Constraint::new(vec![1.], Sign::Less, f64::INFINITY)],
        ),
        Err(ValidationError::NonFiniteConstraint { constraint: 0 })
    );
}

#[test]
fn sign_parses_relation_symbols() {
    assert_eq!("<=".parse::<Sign>(), Ok(Sign::Less));
    assert_eq!(" >= ".parse::<Sign>(), Ok(Sign::Greater));
    assert_eq!("=".parse::<Sign>(), Ok(Sign::Equals));
    assert_eq!(
        "=<".parse::<Sign>(),
        Err(ValidationError::UnknownSign {
            symbol: "=<".to_owned()
        })
    );
    assert_eq!(Sign::Greater.to_string(), ">=");
}

#[test]
fn normalized_flips_constraint_with_negative_rhs() {
    assert_eq!(
        Constraint::new(vec![1., -2.], Sign::Less, -3.).normalized(),
        Constraint::new(vec![-1., 2.], Sign::Greater, 3.)
    );
    assert_eq!(
        Constraint::new(vec![1., 1.], Sign::Equals, -1.).normalized(),
        Constraint::new(vec![-1., -1.], Sign::Equals, 1.)
    );
    assert_eq!(
        Constraint::new(vec![1., 1.], Sign::Greater, 1.).normalized(),
        Constraint::new(vec![1., 1.], Sign::Greater, 1.)
    );
}

#[test]
fn problem_deserialization_validates_input() {
    let problem: Problem = serde_json::from_str(
        r#"{
            "objective_function": { "coefficients": [12, 8], "direction": "maximize" },
            "constraints": [
                { "coefficients": [5, 2], "sign": "<=", "rhs": 150 },
                { "coefficients": [2, 3], "sign": ">=", "rhs": 10 }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(problem.n_variables(), 2);
    assert_eq!(problem.constraints()[1].sign(), Sign::Greater);

    let err = serde_json::from_str::<Problem>(
        r#"{
            "objective_function": { "coefficients": [1, 1], "direction": "minimize" },
            "constraints": [{ "coefficients": [1], "sign": "=", "rhs": 1 }]
        }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("constraint 0 has 1 coefficients"));
}
