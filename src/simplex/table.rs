use std::{cmp::Ordering, iter, ops::ControlFlow};

use nalgebra::{DMatrix, DVector, RowDVector};
use num_traits::Zero;

use crate::helpers::dbg_display;

use super::{
    big_number::BigNumber, problem::StandardForm, Direction, OptimalSolution, Problem, Solution,
    SolverOptions, Variable,
};

/// Big-M simplex tableau of a single solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplexTable {
    /// Constraint coefficients, the last column holds the right-hand sides
    tableau: DMatrix<f64>,
    /// Index of the basic column of every row
    basis: DVector<usize>,
    columns: Vec<Variable>,
    /// Cj: objective coefficient of every column except the right-hand side
    cj: RowDVector<BigNumber<f64>>,
    /// Cb: objective coefficient of the variable basic in every row
    cb: DVector<BigNumber<f64>>,
    direction: Direction,
    tolerance: f64,
    pivots: usize,
}

impl SimplexTable {
    pub fn new(problem: &Problem, options: &SolverOptions) -> Self {
        let form = problem.standard_form();
        let direction = problem.objective_function.direction;
        let (cj, cb) =
            Self::initial_costs(&problem.objective_function.coefficients, direction, &form);
        let StandardForm {
            tableau,
            columns,
            basis,
            ..
        } = form;

        Self {
            tableau,
            basis: DVector::from_vec(basis),
            columns,
            cj,
            cb,
            direction,
            tolerance: options.tolerance,
            pivots: 0,
        }
    }

    /// Cj is the objective followed by zeros for the auxiliary columns, Cb is zero
    /// for every row. Artificial columns and the rows they start basic in get the
    /// Big-M penalty instead.
    pub(crate) fn initial_costs(
        objective: &[f64],
        direction: Direction,
        form: &StandardForm,
    ) -> (RowDVector<BigNumber<f64>>, DVector<BigNumber<f64>>) {
        let penalty = direction.penalty();

        let mut cj = RowDVector::from_iterator(
            objective.len() + form.n_auxiliary,
            objective
                .iter()
                .copied()
                .map(BigNumber::from)
                .chain(iter::repeat(BigNumber::zero()).take(form.n_auxiliary)),
        );
        for &column in &form.artificial_columns {
            cj[column] = penalty;
        }

        let mut cb = DVector::from_element(form.n_basic_rows, BigNumber::zero());
        for &row in &form.artificial_rows {
            cb[row] = penalty;
        }

        (cj, cb)
    }

    pub fn tableau(&self) -> &DMatrix<f64> {
        &self.tableau
    }

    pub fn basis(&self) -> &DVector<usize> {
        &self.basis
    }

    pub fn cj(&self) -> &RowDVector<BigNumber<f64>> {
        &self.cj
    }

    pub fn cb(&self) -> &DVector<BigNumber<f64>> {
        &self.cb
    }

    fn rhs_index(&self) -> usize {
        self.tableau.ncols() - 1
    }

    /// Zj of every column including the right-hand side: `sum(Cb[i] * tableau[i][j])`.
    pub fn zj(&self) -> RowDVector<BigNumber<f64>> {
        RowDVector::from_iterator(
            self.tableau.ncols(),
            self.tableau.column_iter().map(|column| {
                column
                    .iter()
                    .zip(self.cb.iter())
                    .map(|(el, cost)| *cost * *el)
                    .sum::<BigNumber<f64>>()
            }),
        )
    }

    /// Cj - Zj of every variable column.
    pub fn net_evaluation(&self, zj: &RowDVector<BigNumber<f64>>) -> RowDVector<BigNumber<f64>> {
        RowDVector::from_iterator(
            self.cj.len(),
            self.cj.iter().zip(zj.iter()).map(|(cj, zj)| *cj - *zj),
        )
    }

    /// Column with the largest improvement of the objective, first one on ties.
    /// `None` means the tableau is optimal.
    fn entering_column(&self, evaluation: &RowDVector<BigNumber<f64>>) -> Option<usize> {
        let tolerance = self.tolerance;
        evaluation
            .iter()
            .map(|delta| match self.direction {
                Direction::Maximize => *delta,
                Direction::Minimize => -*delta,
            })
            .enumerate()
            .filter(|(_, improvement)| improvement.approx_signum(tolerance) == Ordering::Greater)
            .fold(None, |best, (j, improvement)| match best {
                Some((_, best_improvement))
                    if improvement.approx_cmp(&best_improvement, tolerance)
                        != Ordering::Greater =>
                {
                    best
                }
                _ => Some((j, improvement)),
            })
            .map(|(j, _)| j)
    }

    /// Minimum ratio test over rows with a positive entry in `pivot_col` and a
    /// non-negative right-hand side, first row on ties. `None` means no row limits
    /// the entering variable.
    fn leaving_row(&self, pivot_col: usize) -> Option<usize> {
        let tolerance = self.tolerance;
        self.tableau
            .column(pivot_col)
            .iter()
            .zip(self.tableau.column(self.rhs_index()).iter())
            .enumerate()
            .filter(|(_, (el, rhs))| **el > tolerance && **rhs >= -tolerance)
            .map(|(i, (el, rhs))| (i, rhs.max(0.) / el))
            .fold(None, |best, (i, ratio)| match best {
                Some((_, best_ratio)) if ratio >= best_ratio => best,
                _ => Some((i, ratio)),
            })
            .map(|(i, _)| i)
    }

    /// Gauss-Jordan elimination around `(pivot_row, pivot_col)`; the entering
    /// column becomes basic in `pivot_row`.
    fn pivot(&mut self, pivot_row: usize, pivot_col: usize) {
        let pivot_el = self.tableau[(pivot_row, pivot_col)];
        log::info!("Pivot element: {pivot_el}");

        // divide all elements in a row by pivot element
        self.tableau.row_mut(pivot_row).apply(|el| *el /= pivot_el);
        self.tableau[(pivot_row, pivot_col)] = 1.;

        let pivot_row_values = self.tableau.row(pivot_row).into_owned();
        for i in (0..self.tableau.nrows()).filter(|i| *i != pivot_row) {
            let multiplier = self.tableau[(i, pivot_col)];
            if multiplier == 0. {
                continue;
            }
            self.tableau
                .row_mut(i)
                .zip_apply(&pivot_row_values, |el, pivot_row_el| {
                    *el -= pivot_row_el * multiplier
                });
            self.tableau[(i, pivot_col)] = 0.;
        }

        self.cb[pivot_row] = self.cj[pivot_col];
        self.basis[pivot_row] = pivot_col;
        self.pivots += 1;

        let rhs_index = self.rhs_index();
        for (i, rhs) in self.tableau.column(rhs_index).iter().enumerate() {
            if *rhs < -self.tolerance {
                log::warn!("Right-hand side of row {i} became negative after pivot: {rhs}");
            }
        }
    }

    /// A column that is a unit vector of the current tableau.
    fn is_unit_column(&self, j: usize) -> bool {
        let tolerance = self.tolerance;
        let column = self.tableau.column(j);
        let ones = column
            .iter()
            .filter(|el| (**el - 1.).abs() <= tolerance)
            .count();
        let zeros = column.iter().filter(|el| el.abs() <= tolerance).count();
        ones == 1 && zeros == column.len() - 1
    }

    /// Performs one simplex iteration. Returns the terminal result once the
    /// tableau is optimal, infeasible or unbounded.
    pub fn step(&mut self) -> Option<Solution> {
        match self.next_pivot() {
            ControlFlow::Break(solution) => Some(solution),
            ControlFlow::Continue((pivot_row, pivot_col)) => {
                self.pivot(pivot_row, pivot_col);
                None
            }
        }
    }

    /// The terminal result of the current tableau, if it has one. Never pivots.
    pub fn terminal_state(&self) -> Option<Solution> {
        match self.next_pivot() {
            ControlFlow::Break(solution) => Some(solution),
            ControlFlow::Continue(_) => None,
        }
    }

    /// Pivot position `(row, column)` of the next iteration, or the terminal result.
    fn next_pivot(&self) -> ControlFlow<Solution, (usize, usize)> {
        log::debug!("Tableau:{}", self.tableau);
        let zj = dbg_display!(self.zj());
        let evaluation = dbg_display!(self.net_evaluation(&zj));

        let Some(pivot_col) = self.entering_column(&evaluation) else {
            log::info!("Optimal tableau was reached");
            return ControlFlow::Break(self.finalize(&zj, &evaluation));
        };
        log::info!("Pivot column: {}", self.columns[pivot_col]);

        let Some(pivot_row) = self.leaving_row(pivot_col) else {
            log::info!("Solution is unbounded");
            return ControlFlow::Break(Solution::Unbounded);
        };
        log::info!("Pivot row: {pivot_row}");

        ControlFlow::Continue((pivot_row, pivot_col))
    }

    fn finalize(
        &self,
        zj: &RowDVector<BigNumber<f64>>,
        evaluation: &RowDVector<BigNumber<f64>>,
    ) -> Solution {
        let tolerance = self.tolerance;
        if self.cb.iter().any(|cost| cost.is_big(tolerance)) {
            log::info!("An artificial variable stayed basic, solution is infeasible");
            return Solution::Infeasible;
        }

        let rhs_index = self.rhs_index();
        let objective_value = match f64::try_from(zj[rhs_index]) {
            Ok(value) => value,
            Err(err_msg) => {
                log::error!("{err_msg}");
                return Solution::Infeasible;
            }
        };

        let mut values = vec![0.; rhs_index];
        for (row, column) in self.basis.iter().enumerate() {
            let value = self.tableau[(row, rhs_index)];
            values[*column] = if value.abs() <= tolerance { 0. } else { value };
        }

        let has_alternative_optima = (0..rhs_index)
            .filter(|j| !self.is_unit_column(*j))
            .any(|j| evaluation[j].approx_signum(tolerance) == Ordering::Equal);
        log::info!(
            "Optimal {} value: {objective_value}",
            self.direction.label()
        );
        if has_alternative_optima {
            log::info!("The problem has alternative optimal solutions");
        }

        Solution::Optimal(OptimalSolution {
            direction: self.direction,
            objective_value,
            values,
            columns: self.columns.clone(),
            has_alternative_optima,
            tableau: self.tableau.clone(),
            basis: self.basis.iter().copied().collect(),
            cj: self.cj.iter().copied().collect(),
            cb: self.cb.iter().copied().collect(),
            pivots: self.pivots,
        })
    }
}
