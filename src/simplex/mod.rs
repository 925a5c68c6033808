mod big_number;
mod error;
mod options;
mod problem;
mod solution;
mod table;

pub use big_number::BigNumber;
pub use error::*;
pub use options::SolverOptions;
pub use problem::{Constraint, Direction, ObjectiveFunction, Problem, Sign};
pub use solution::{OptimalSolution, Variable, VariableKind};
pub use table::SimplexTable;

use std::fmt;

use derive_more::{Display, IsVariant};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IsVariant)]
pub enum Status {
    #[display(fmt = "OPTIMAL")]
    Optimal,
    #[display(fmt = "INFEASIBLE")]
    Infeasible,
    #[display(fmt = "UNBOUNDED")]
    Unbounded,
}

/// Terminal state of a solve.
#[derive(Debug, Clone, PartialEq, Serialize, IsVariant)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Solution {
    Optimal(OptimalSolution),
    /// An artificial variable could not be driven out of the basis
    Infeasible,
    /// The objective improves without limit along some edge
    Unbounded,
}

impl Solution {
    pub fn status(&self) -> Status {
        match self {
            Solution::Optimal(_) => Status::Optimal,
            Solution::Infeasible => Status::Infeasible,
            Solution::Unbounded => Status::Unbounded,
        }
    }

    pub fn optimal(&self) -> Option<&OptimalSolution> {
        match self {
            Solution::Optimal(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_optimal(self) -> Option<OptimalSolution> {
        match self {
            Solution::Optimal(solution) => Some(solution),
            _ => None,
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solution::Optimal(solution) => write!(f, "{solution}"),
            Solution::Infeasible => writeln!(f, "Solution is INFEASIBLE."),
            Solution::Unbounded => writeln!(f, "This problem has unbounded solution!"),
        }
    }
}
