//! Tick-based numeric types for prices and quantities
//!
//! Prices are signed integer ticks; the engine treats them as opaque totally
//! ordered values and leaves the tick size to the caller. Quantities are
//! unsigned lots and can never go negative.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Limit price in integer ticks
///
/// Totally ordered; the bid book keeps the highest price first, the ask book
/// the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i32);

impl Price {
    pub const fn new(ticks: i32) -> Self {
        Self(ticks)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl From<i32> for Price {
    fn from(ticks: i32) -> Self {
        Self(ticks)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order quantity in lots
///
/// Subtraction below zero is a programmer error and panics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const fn new(lots: u32) -> Self {
        Self(lots)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Quantity {
    fn from(lots: u32) -> Self {
        Self(lots)
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(
            self.0 >= rhs.0,
            "Quantity subtraction would result in negative"
        );
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
