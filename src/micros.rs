#![doc = r#"
Microsecond spans, the unit of every timing calculation in the player.
"#]

use core::fmt;
use core::ops::{Add, Mul};

/// Unsigned microseconds
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UMicros(u64);

impl UMicros {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates a new instance of microseconds
    #[inline]
    pub const fn new(microseconds: u64) -> Self {
        Self(microseconds)
    }

    /// Returns the microseconds as a u64
    #[inline]
    pub const fn us(&self) -> u64 {
        self.0
    }

    /// ms -> us
    #[inline]
    pub const fn from_ms(ms: u64) -> Self {
        Self(ms * 1_000)
    }

    /// Returns no time if I am less than other.
    pub const fn saturating_sub(&self, other: Self) -> UMicros {
        UMicros(self.0.saturating_sub(other.0))
    }

    /// How many whole `unit`s fit in this span, and what is left over.
    ///
    /// A zero `unit` divides nothing and returns the whole span as remainder.
    pub const fn div_rem(&self, unit: UMicros) -> (u64, UMicros) {
        if unit.0 == 0 {
            return (0, *self);
        }
        (self.0 / unit.0, UMicros(self.0 % unit.0))
    }
}

impl fmt::Display for UMicros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}µs", self.0)
    }
}

impl From<core::time::Duration> for UMicros {
    fn from(value: core::time::Duration) -> Self {
        Self(u64::try_from(value.as_micros()).unwrap_or(u64::MAX))
    }
}

impl Add for UMicros {
    type Output = UMicros;
    fn add(self, rhs: Self) -> Self::Output {
        UMicros(self.0 + rhs.0)
    }
}

impl Mul<u64> for UMicros {
    type Output = UMicros;
    fn mul(self, rhs: u64) -> Self::Output {
        UMicros(self.0 * rhs)
    }
}

#[test]
fn div_rem_splits_whole_units() {
    assert_eq!(
        UMicros::new(25_000).div_rem(UMicros::new(10_416)),
        (2, UMicros::new(4_168))
    );
    assert_eq!(
        UMicros::new(500).div_rem(UMicros::ZERO),
        (0, UMicros::new(500))
    );
}
