use std::{collections::BTreeMap, fmt};

use derive_more::{Display, IsVariant};
use derive_new::new;
use nalgebra::DMatrix;
use serde::Serialize;

use crate::helpers::f64_rounded_string;

use super::{big_number::BigNumber, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IsVariant)]
pub enum VariableKind {
    Decision,
    Slack,
    Surplus,
    Artificial,
}

impl VariableKind {
    fn prefix(&self) -> &'static str {
        match self {
            VariableKind::Decision => "X",
            VariableKind::Slack => "S",
            VariableKind::Surplus => "E",
            VariableKind::Artificial => "A",
        }
    }
}

/// A tableau column. `index` is the decision variable position for
/// [`VariableKind::Decision`] and the constraint row otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, new)]
#[display(fmt = "{}{}", "kind.prefix()", "index + 1")]
pub struct Variable {
    pub kind: VariableKind,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalSolution {
    pub direction: Direction,
    pub objective_value: f64,
    /// Value of every tableau column, in column order
    pub values: Vec<f64>,
    pub columns: Vec<Variable>,
    /// A non-basic column has zero net evaluation, so other vertices reach the same value
    pub has_alternative_optima: bool,
    pub tableau: DMatrix<f64>,
    pub basis: Vec<usize>,
    pub cj: Vec<BigNumber<f64>>,
    pub cb: Vec<BigNumber<f64>>,
    pub pivots: usize,
}

impl OptimalSolution {
    /// Values of the decision variables, in input order.
    pub fn decision_values(&self) -> Vec<f64> {
        self.column_values()
            .filter_map(|(variable, value)| variable.kind.is_decision().then_some(value))
            .collect()
    }

    /// Decision variable name (`X1`, `X2`, ...) to value.
    pub fn variable_values(&self) -> BTreeMap<String, f64> {
        self.column_values()
            .filter(|(variable, _)| variable.kind.is_decision())
            .map(|(variable, value)| (variable.to_string(), value))
            .collect()
    }

    /// Every column including slack, surplus and artificial ones.
    pub fn column_values(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.columns.iter().copied().zip(self.values.iter().copied())
    }
}

impl fmt::Display for OptimalSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Optimal {} Value: {}",
            self.direction.label(),
            f64_rounded_string(&self.objective_value, 2)
        )?;
        for (variable, value) in self
            .column_values()
            .filter(|(variable, _)| variable.kind.is_decision())
        {
            writeln!(f, "{variable} = {}", f64_rounded_string(&value, 2))?;
        }
        if self.has_alternative_optima {
            writeln!(f, "This problem has alternative optimal solutions.")?;
        }
        Ok(())
    }
}
