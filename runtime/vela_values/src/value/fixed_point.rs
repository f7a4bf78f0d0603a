//! Fixed-point decimal values, scaled by 1e8.

use std::fmt;

const SCALE: u64 = 100_000_000;
const FRACTION_DIGITS: usize = 8;

/// Signed 64-bit fixed-point value with 8 decimal places.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Fix64Value(pub i64);

impl Fix64Value {
    /// Build from a whole number.
    pub const fn from_integer(value: i64) -> Self {
        Fix64Value(value * SCALE as i64)
    }
}

impl fmt::Display for Fix64Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        if self.0 < 0 {
            write!(f, "-")?;
        }
        write!(
            f,
            "{}.{:0width$}",
            magnitude / SCALE,
            magnitude % SCALE,
            width = FRACTION_DIGITS
        )
    }
}

/// Unsigned 64-bit fixed-point value with 8 decimal places.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct UFix64Value(pub u64);

impl UFix64Value {
    /// Build from a whole number.
    pub const fn from_integer(value: u64) -> Self {
        UFix64Value(value * SCALE)
    }
}

impl fmt::Display for UFix64Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.0 / SCALE,
            self.0 % SCALE,
            width = FRACTION_DIGITS
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_pads_fraction_to_eight_digits() {
        assert_eq!(UFix64Value(1_230_000_000).to_string(), "12.30000000");
        assert_eq!(UFix64Value(1).to_string(), "0.00000001");
    }

    #[test]
    fn negative_values_keep_the_sign_on_the_integer_part() {
        assert_eq!(Fix64Value(-150_000_000).to_string(), "-1.50000000");
        assert_eq!(Fix64Value(-1).to_string(), "-0.00000001");
    }

    #[test]
    fn from_integer_scales() {
        assert_eq!(Fix64Value::from_integer(3).to_string(), "3.00000000");
        assert_eq!(UFix64Value::from_integer(0).to_string(), "0.00000000");
    }
}
