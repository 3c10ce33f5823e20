//! Opaque monetary amount used for declared item values.
//!
//! Only addition and presence matter to the model; currency and rounding are
//! the caller's concern. Amounts are whole minor units (e.g. cents).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Cost(i64);

impl Cost {
    #[inline]
    pub const fn new(minor_units: i64) -> Self {
        Cost(minor_units)
    }

    #[inline]
    pub const fn zero() -> Self {
        Cost(0)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn checked_add(self, other: Cost) -> Option<Self> {
        self.0.checked_add(other.0).map(Cost)
    }

    /// Sum every cost, or `None` if any is missing, the iterator is empty or
    /// the total overflows.
    ///
    /// A partial sum is never returned.
    pub fn sum_all<I>(costs: I) -> Option<Cost>
    where
        I: IntoIterator<Item = Option<Cost>>,
    {
        let mut costs = costs.into_iter();
        let first = costs.next()??;
        costs.try_fold(first, |acc, cost| acc.checked_add(cost?))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cost({})", self.0)
    }
}

impl From<i64> for Cost {
    fn from(v: i64) -> Self {
        Cost(v)
    }
}

/// Overflows the way `i64` addition does; use [`Cost::checked_add`] for
/// untrusted amounts.
impl Add for Cost {
    type Output = Cost;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Cost(self.0 + rhs.0)
    }
}

impl AddAssign for Cost {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Cost::zero(), |a, b| a + b)
    }
}

impl<'a> Sum<&'a Cost> for Cost {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Cost::zero(), |a, b| a + *b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_arithmetic() {
        let mut c = Cost::new(100) + Cost::new(50);
        assert_eq!(c.value(), 150);
        c += Cost::new(25);
        assert_eq!(c.value(), 175);
        assert_eq!(format!("{}", c), "Cost(175)");
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(Cost::new(1).checked_add(Cost::new(2)), Some(Cost::new(3)));
        assert!(Cost::new(i64::MAX).checked_add(Cost::new(1)).is_none());
    }

    #[test]
    fn test_sum_all_overflow_is_undefined() {
        assert_eq!(Cost::sum_all([Some(Cost::new(i64::MAX)), Some(Cost::new(1))]), None);
        assert_eq!(
            Cost::sum_all([Some(Cost::new(i64::MAX)), Some(Cost::new(-1)), Some(Cost::new(1))]),
            Some(Cost::new(i64::MAX))
        );
    }

    #[test]
    fn test_sum_all_is_all_or_nothing() {
        assert_eq!(
            Cost::sum_all([Some(Cost::new(12_345)), Some(Cost::new(12_345))]),
            Some(Cost::new(24_690))
        );
        assert_eq!(Cost::sum_all([Some(Cost::new(12_345)), None]), None);
        assert_eq!(Cost::sum_all([None, Some(Cost::new(1))]), None);
        assert_eq!(Cost::sum_all(std::iter::empty()), None);
    }
}
