//! Linear programming with the tabular simplex method and the Big-M technique.
//!
//! ```
//! use bigm_simplex::{solve, Constraint, Sign};
//!
//! let solution = solve(
//!     &[12., 8.],
//!     vec![
//!         Constraint::new(vec![5., 2.], Sign::Less, 150.),
//!         Constraint::new(vec![2., 3.], Sign::Less, 100.),
//!         Constraint::new(vec![4., 2.], Sign::Less, 80.),
//!     ],
//!     true,
//! )
//! .unwrap();
//! let optimal = solution.optimal().unwrap();
//! assert!((optimal.objective_value - 300.).abs() < 1e-9);
//! ```

mod helpers;
pub mod simplex;

pub use simplex::{
    BigNumber, Constraint, Direction, ObjectiveFunction, OptimalSolution, Problem, Sign,
    SimplexTable, Solution, SolveError, SolveResult, SolverOptions, Status, ValidationError,
    Variable, VariableKind,
};

/// Solves `objective` over `constraints` with the default [`SolverOptions`].
pub fn solve(
    objective: &[f64],
    constraints: Vec<Constraint>,
    maximize: bool,
) -> SolveResult<Solution> {
    Problem::new(
        ObjectiveFunction::new(objective.to_vec(), maximize.into()),
        constraints,
    )?
    .solve()
}
