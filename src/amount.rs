use serde_with::SerializeDisplay;

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Represents a sales amount in whole currency units.
///
/// Totals are kept strictly below [`Amount::CEILING`], that is, to at most
/// ten digits. Use [`Amount::checked_add`] to accumulate them.
#[derive(Clone, Copy, Default, SerializeDisplay, Eq, PartialEq, Ord, PartialOrd)]
pub struct Amount(u64);

impl Amount {
    /// The smallest value a total may never reach.
    pub const CEILING: u64 = 10_000_000_000;

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns `self + rhs`, or `None` if the sum would reach
    /// [`Amount::CEILING`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use branch_sales::Amount;
    /// let total = Amount::new(9_999_999_998);
    /// assert_eq!(total.checked_add(Amount::new(1)), Some(Amount::new(9_999_999_999)));
    /// assert_eq!(total.checked_add(Amount::new(2)), None);
    /// ```
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0
            .checked_add(rhs.0)
            .filter(|&sum| sum < Self::CEILING)
            .map(Self)
    }
}

impl Debug for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
