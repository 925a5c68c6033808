use std::{
    cmp::Ordering,
    fmt,
    iter::Sum,
    ops::{Mul, Neg},
};

use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::helpers::f64_rounded_string;

/// A number of the form `big_part * M + small_part`, where `M` is larger than
/// any value appearing in the problem.
///
/// The derived ordering is lexicographic (M-part first), which is exactly the
/// ordering of such numbers when `M` tends to infinity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Default,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::Sub,
    derive_more::AddAssign,
    derive_more::SubAssign,
)]
pub struct BigNumber<T> {
    big_part: T,
    small_part: T,
}

impl<T> BigNumber<T> {
    #[inline(always)]
    pub const fn new(big_part: T, small_part: T) -> Self {
        Self {
            big_part,
            small_part,
        }
    }

    pub const fn big_part(&self) -> &T {
        &self.big_part
    }

    pub const fn small_part(&self) -> &T {
        &self.small_part
    }
}

impl<T: One + Zero> BigNumber<T> {
    pub fn one_big() -> Self {
        Self {
            big_part: T::one(),
            small_part: T::zero(),
        }
    }
}

impl BigNumber<f64> {
    /// `true` if the M-part is not zero within `tolerance`.
    pub fn is_big(&self, tolerance: f64) -> bool {
        self.big_part.abs() > tolerance
    }

    /// Lexicographic comparison where parts closer than `tolerance`
    /// (scaled by their magnitude when above one) count as equal.
    pub fn approx_cmp(&self, other: &Self, tolerance: f64) -> Ordering {
        match approx_cmp(self.big_part, other.big_part, tolerance) {
            Ordering::Equal => approx_cmp(self.small_part, other.small_part, tolerance),
            ord => ord,
        }
    }

    pub fn approx_signum(&self, tolerance: f64) -> Ordering {
        self.approx_cmp(&Self::zero(), tolerance)
    }
}

fn approx_cmp(lhs: f64, rhs: f64, tolerance: f64) -> Ordering {
    let scale = lhs.abs().max(rhs.abs()).max(1.);
    if (lhs - rhs).abs() <= tolerance * scale {
        Ordering::Equal
    } else if lhs < rhs {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

impl fmt::Display for BigNumber<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        let small_part = f64_rounded_string(&self.small_part, precision);
        match self.big_part {
            big if big == 0. => write!(f, "{small_part}"),
            big => {
                match big {
                    _ if big == 1. => write!(f, "M")?,
                    _ if big == -1. => write!(f, "-M")?,
                    _ => write!(f, "{}M", f64_rounded_string(&big, precision))?,
                }
                if small_part == "0" {
                    Ok(())
                } else if self.small_part > 0. {
                    write!(f, "+{small_part}")
                } else {
                    write!(f, "{small_part}")
                }
            }
        }
    }
}

impl TryFrom<BigNumber<f64>> for f64 {
    type Error = String;

    fn try_from(value: BigNumber<f64>) -> Result<Self, Self::Error> {
        if value.big_part != 0. {
            return Err(format!("The number is too big: {value}"));
        }
        Ok(value.small_part)
    }
}

impl<T> From<T> for BigNumber<T>
where
    T: Zero,
{
    #[inline]
    fn from(val: T) -> Self {
        Self {
            big_part: T::zero(),
            small_part: val,
        }
    }
}

impl<T> Mul<T> for BigNumber<T>
where
    T: Mul<T, Output = T> + Clone,
{
    type Output = Self;

    fn mul(self, other: T) -> Self {
        Self {
            big_part: self.big_part * other.clone(),
            small_part: self.small_part * other,
        }
    }
}

impl<T> Neg for BigNumber<T>
where
    T: Neg<Output = T>,
{
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            big_part: -self.big_part,
            small_part: -self.small_part,
        }
    }
}

impl<T: Zero> Zero for BigNumber<T> {
    fn zero() -> Self {
        Self {
            big_part: T::zero(),
            small_part: T::zero(),
        }
    }

    fn is_zero(&self) -> bool {
        self.big_part.is_zero() && self.small_part.is_zero()
    }
}

impl<T: Zero> Sum for BigNumber<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |sum, el| sum + el)
    }
}
