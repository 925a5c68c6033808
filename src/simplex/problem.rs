use std::{
    ops::{Mul, MulAssign},
    str::FromStr,
};

use derive_more::{Display, IsVariant};
use derive_new::new;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::helpers::ensure;

use super::{
    big_number::BigNumber, SimplexTable, Solution, SolveError, SolveResult, SolverOptions,
    ValidationError, Variable, VariableKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IsVariant)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Maximize,
    Minimize,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Maximize => "Maximum",
            Direction::Minimize => "Minimum",
        }
    }

    /// Cost of an artificial variable: always works against the optimization direction.
    pub fn penalty(&self) -> BigNumber<f64> {
        match self {
            Direction::Maximize => -BigNumber::one_big(),
            Direction::Minimize => BigNumber::one_big(),
        }
    }
}

impl From<bool> for Direction {
    fn from(maximize: bool) -> Self {
        if maximize {
            Direction::Maximize
        } else {
            Direction::Minimize
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct ObjectiveFunction {
    pub(crate) coefficients: Vec<f64>,
    pub(crate) direction: Direction,
}

impl ObjectiveFunction {
    pub fn maximize(coefficients: Vec<f64>) -> Self {
        Self::new(coefficients, Direction::Maximize)
    }

    pub fn minimize(coefficients: Vec<f64>) -> Self {
        Self::new(coefficients, Direction::Minimize)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct Constraint {
    coefficients: Vec<f64>,
    sign: Sign,
    rhs: f64,
}

impl Constraint {
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Multiplies the constraint by -1 if its right-hand side is negative,
    /// flipping `<=` and `>=`.
    pub fn normalized(mut self) -> Self {
        if self.rhs < 0. {
            self *= -1.;
        }
        self
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, IsVariant,
)]
pub enum Sign {
    #[serde(rename = "<=")]
    #[display(fmt = "<=")]
    Less = -1,
    #[serde(rename = "=")]
    #[display(fmt = "=")]
    Equals = 0,
    #[serde(rename = ">=")]
    #[display(fmt = ">=")]
    Greater = 1,
}

impl Sign {
    /// Number of slack, surplus and artificial columns a constraint with this sign adds.
    pub fn auxiliary_count(&self) -> usize {
        match self {
            Sign::Less | Sign::Equals => 1,
            Sign::Greater => 2,
        }
    }
}

impl FromStr for Sign {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=" => Ok(Sign::Less),
            ">=" => Ok(Sign::Greater),
            "=" | "==" => Ok(Sign::Equals),
            symbol => Err(ValidationError::UnknownSign {
                symbol: symbol.to_owned(),
            }),
        }
    }
}

impl Mul<f64> for Sign {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        if rhs >= 0. {
            return self;
        }
        match self {
            Sign::Less => Sign::Greater,
            Sign::Equals => self,
            Sign::Greater => Sign::Less,
        }
    }
}

impl MulAssign<f64> for Sign {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl MulAssign<f64> for Constraint {
    fn mul_assign(&mut self, rhs: f64) {
        self.coefficients.iter_mut().for_each(|c| *c *= rhs);
        self.rhs *= rhs;
        self.sign *= rhs;
    }
}

/// A validated linear program over non-negative decision variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedProblem")]
pub struct Problem {
    pub(crate) objective_function: ObjectiveFunction,
    pub(crate) constraints: Vec<Constraint>,
}

#[derive(Deserialize)]
struct UncheckedProblem {
    objective_function: ObjectiveFunction,
    constraints: Vec<Constraint>,
}

impl TryFrom<UncheckedProblem> for Problem {
    type Error = ValidationError;

    fn try_from(value: UncheckedProblem) -> Result<Self, Self::Error> {
        Self::new(value.objective_function, value.constraints)
    }
}

/// Augmented constraint matrix together with the bookkeeping the cost
/// initialization needs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StandardForm {
    /// One row per constraint, last column is the right-hand side
    pub(crate) tableau: DMatrix<f64>,
    pub(crate) columns: Vec<Variable>,
    /// Initially basic column of every row
    pub(crate) basis: Vec<usize>,
    pub(crate) artificial_columns: Vec<usize>,
    pub(crate) artificial_rows: Vec<usize>,
    pub(crate) n_auxiliary: usize,
    pub(crate) n_basic_rows: usize,
}

impl Problem {
    /// Validates the problem. A `<=` row with a negative right-hand side is
    /// stored negated as a `>=` row; a negative right-hand side on a `>=` or
    /// `=` row is rejected.
    pub fn new(
        objective_function: ObjectiveFunction,
        constraints: Vec<Constraint>,
    ) -> Result<Self, ValidationError> {
        let constraints: Vec<_> = constraints
            .into_iter()
            .map(|constraint| {
                if constraint.sign.is_less() {
                    constraint.normalized()
                } else {
                    constraint
                }
            })
            .collect();
        Self::validate(&objective_function, &constraints)?;
        Ok(Self {
            objective_function,
            constraints,
        })
    }

    pub fn objective_function(&self) -> &ObjectiveFunction {
        &self.objective_function
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn n_variables(&self) -> usize {
        self.objective_function.coefficients.len()
    }

    pub fn solve(self) -> SolveResult<Solution> {
        self.solve_with(&SolverOptions::default())
    }

    pub fn solve_with(self, options: &SolverOptions) -> SolveResult<Solution> {
        let mut table = SimplexTable::new(&self, options);
        for iteration in 1..=options.max_iterations {
            log::info!("Iteration: {iteration}");
            if let Some(solution) = table.step() {
                return Ok(solution);
            }
        }
        if let Some(solution) = table.terminal_state() {
            return Ok(solution);
        }

        log::error!(
            "Iteration limit of {} reached without reaching a terminal state",
            options.max_iterations
        );
        Err(SolveError::NonConvergence {
            iterations: options.max_iterations,
        })
    }

    fn validate(
        objective_function: &ObjectiveFunction,
        constraints: &[Constraint],
    ) -> Result<(), ValidationError> {
        let expected = objective_function.coefficients.len();
        ensure!(expected != 0, ValidationError::NoVariables);
        ensure!(!constraints.is_empty(), ValidationError::NoConstraints);
        if let Some(variable) = objective_function
            .coefficients
            .iter()
            .position(|c| !c.is_finite())
        {
            return Err(ValidationError::NonFiniteObjective { variable });
        }

        for (i, constraint) in constraints.iter().enumerate() {
            ensure!(
                constraint.coefficients.len() == expected,
                ValidationError::ArityMismatch {
                    constraint: i,
                    expected,
                    found: constraint.coefficients.len(),
                }
            );
            ensure!(
                constraint
                    .coefficients
                    .iter()
                    .chain([&constraint.rhs])
                    .all(|value| value.is_finite()),
                ValidationError::NonFiniteConstraint { constraint: i }
            );
            ensure!(
                constraint.rhs >= 0.,
                ValidationError::NegativeRhs {
                    constraint: i,
                    rhs: constraint.rhs,
                }
            );
        }
        Ok(())
    }

    /// Appends a slack column for every `<=`, a surplus and an artificial column
    /// for every `>=` and an artificial column for every `=` constraint.
    ///
    /// Auxiliary columns are numbered globally, in constraint order.
    pub(crate) fn standard_form(&self) -> StandardForm {
        let n_variables = self.n_variables();
        let n_auxiliary = self
            .constraints
            .iter()
            .map(|constraint| constraint.sign.auxiliary_count())
            .sum::<usize>();
        let nrows = self.constraints.len();
        let ncols = n_variables + n_auxiliary + 1;

        let mut tableau = DMatrix::<f64>::zeros(nrows, ncols);
        let mut columns = (0..n_variables)
            .map(|j| Variable::new(VariableKind::Decision, j))
            .collect::<Vec<_>>();
        let mut basis = Vec::with_capacity(nrows);
        let mut artificial_columns = Vec::new();
        let mut artificial_rows = Vec::new();

        for (i, constraint) in self.constraints.iter().enumerate() {
            tableau
                .row_mut(i)
                .iter_mut()
                .zip(&constraint.coefficients)
                .for_each(|(el, coefficient)| *el = *coefficient);
            tableau[(i, ncols - 1)] = constraint.rhs;

            let next = columns.len();
            match constraint.sign {
                Sign::Less => {
                    tableau[(i, next)] = 1.;
                    columns.push(Variable::new(VariableKind::Slack, i));
                    basis.push(next);
                }
                Sign::Greater => {
                    tableau[(i, next)] = -1.;
                    columns.push(Variable::new(VariableKind::Surplus, i));
                    tableau[(i, next + 1)] = 1.;
                    columns.push(Variable::new(VariableKind::Artificial, i));
                    artificial_columns.push(next + 1);
                    artificial_rows.push(i);
                    basis.push(next + 1);
                }
                Sign::Equals => {
                    tableau[(i, next)] = 1.;
                    columns.push(Variable::new(VariableKind::Artificial, i));
                    artificial_columns.push(next);
                    artificial_rows.push(i);
                    basis.push(next);
                }
            }
        }

        StandardForm {
            tableau,
            columns,
            n_basic_rows: basis.len(),
            basis,
            artificial_columns,
            artificial_rows,
            n_auxiliary,
        }
    }
}

#[cfg(test)]
mod tests;
