use derive_more::{Display, Error, IsVariant};

/// The problem handed to the solver is not a well-formed linear program.
///
/// Constraint and variable indices are zero-based positions in the caller's input.
#[derive(Debug, Clone, PartialEq, Display, Error, IsVariant)]
pub enum ValidationError {
    #[display(fmt = "objective function has no variables")]
    NoVariables,
    #[display(fmt = "problem has no constraints")]
    NoConstraints,
    #[display(
        fmt = "constraint {} has {} coefficients, expected {}",
        constraint,
        found,
        expected
    )]
    ArityMismatch {
        constraint: usize,
        expected: usize,
        found: usize,
    },
    #[display(fmt = "objective coefficient of variable {} is not finite", variable)]
    NonFiniteObjective { variable: usize },
    #[display(fmt = "constraint {} contains a value that is not finite", constraint)]
    NonFiniteConstraint { constraint: usize },
    /// Only `>=` and `=` rows, `<=` rows are negated instead
    #[display(fmt = "constraint {} has negative right-hand side {}", constraint, rhs)]
    NegativeRhs { constraint: usize, rhs: f64 },
    #[display(fmt = "unrecognized relation `{}`, expected one of `<=`, `>=`, `=`", symbol)]
    UnknownSign { symbol: String },
}

#[derive(Debug, Clone, PartialEq, Display, Error, IsVariant)]
pub enum SolveError {
    #[display(fmt = "invalid problem: {}", _0)]
    Validation(ValidationError),
    /// The pivot cap was reached before the tableau became terminal.
    #[display(fmt = "no convergence after {} iterations", iterations)]
    NonConvergence { iterations: usize },
}

impl From<ValidationError> for SolveError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

pub type SolveResult<T> = Result<T, SolveError>;
