// ============================================================================
// av1transcoder-core/src/types.rs
// ============================================================================
//
// CONSTRAINED VALUES: Self-Validating Numeric Types
//
// These types encode semantic restrictions in the type system. A value can
// only be obtained through a checked constructor, so holding one is proof
// that it satisfies its domain. The `FromStr` implementations double as the
// command-line value parsers, which moves range validation to the moment an
// argument is read.
//
// KEY COMPONENTS:
// - NonNegativeInt: pixel crop amounts (n >= 0)
// - PositiveInt: durations, concurrency and encode limits (n > 0)
// - NormalizedFloat: scene cut threshold (0 < v <= 1)

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValidationError;

const NON_NEGATIVE_DOMAIN: &str = "a non-negative integer";
const POSITIVE_DOMAIN: &str = "a positive integer";
const NORMALIZED_DOMAIN: &str = "a floating point value in the interval (0, 1]";

/// Reads a decimal integer token and rejects negative values.
///
/// Any run of digits is a well-formed number; magnitudes past `u64::MAX`
/// are reported as unrepresentable rather than malformed.
fn parse_unsigned(token: &str, expected: &'static str) -> Result<u64, ValidationError> {
    let trimmed = token.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::Malformed {
            expected,
            token: token.to_string(),
        });
    }
    if negative && digits.bytes().any(|b| b != b'0') {
        return Err(out_of_range(expected, trimmed));
    }
    digits.parse::<u64>().map_err(|_| ValidationError::Unrepresentable {
        limit: u64::MAX,
        value: trimmed.to_string(),
    })
}

fn out_of_range(expected: &'static str, value: impl fmt::Display) -> ValidationError {
    ValidationError::OutOfRange {
        expected,
        value: value.to_string(),
    }
}

// ============================================================================
// NON-NEGATIVE INTEGER
// ============================================================================

/// Pixel count that may be zero. Used for crop values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct NonNegativeInt(u64);

impl NonNegativeInt {
    pub const ZERO: Self = Self(0);

    /// Builds a value from an unsigned constant. Every `u64` is in range.
    #[must_use]
    pub const fn new_const(value: u64) -> Self {
        Self(value)
    }

    /// Validates a signed number.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| out_of_range(NON_NEGATIVE_DOMAIN, value))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for NonNegativeInt {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl FromStr for NonNegativeInt {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_unsigned(s, NON_NEGATIVE_DOMAIN).map(Self)
    }
}

impl From<NonNegativeInt> for u64 {
    fn from(value: NonNegativeInt) -> Self {
        value.0
    }
}

impl fmt::Display for NonNegativeInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// POSITIVE INTEGER
// ============================================================================

/// Strictly positive count. Used for scene lengths and for limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PositiveInt(NonZeroU64);

impl PositiveInt {
    /// Builds a value from a constant.
    ///
    /// Intended for defaults: a zero argument fails const evaluation, so an
    /// invalid default never reaches a running program.
    #[must_use]
    pub const fn new_const(value: u64) -> Self {
        match NonZeroU64::new(value) {
            Some(value) => Self(value),
            None => panic!("PositiveInt constant must be greater than zero"),
        }
    }

    /// Validates a signed number.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(|| out_of_range(POSITIVE_DOMAIN, value))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<i64> for PositiveInt {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl FromStr for PositiveInt {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_unsigned(s, POSITIVE_DOMAIN)?;
        NonZeroU64::new(value)
            .map(Self)
            .ok_or_else(|| out_of_range(POSITIVE_DOMAIN, s.trim()))
    }
}

impl From<PositiveInt> for u64 {
    fn from(value: PositiveInt) -> Self {
        value.get()
    }
}

impl fmt::Display for PositiveInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// NORMALIZED FLOAT
// ============================================================================

/// Floating point value in the half-open interval (0, 1].
///
/// Used for the scene cut threshold. NaN is rejected because it fails both
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct NormalizedFloat(f64);

impl NormalizedFloat {
    pub const ONE: Self = Self(1.0);

    /// Builds a value from a constant; out-of-range constants fail const
    /// evaluation.
    #[must_use]
    pub const fn new_const(value: f64) -> Self {
        assert!(
            value > 0.0 && value <= 1.0,
            "NormalizedFloat constant must be in (0, 1]"
        );
        Self(value)
    }

    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(out_of_range(NORMALIZED_DOMAIN, value))
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for NormalizedFloat {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl FromStr for NormalizedFloat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::Malformed {
                expected: NORMALIZED_DOMAIN,
                token: s.to_string(),
            })?;
        Self::try_new(value)
    }
}

impl From<NormalizedFloat> for f64 {
    fn from(value: NormalizedFloat) -> Self {
        value.0
    }
}

impl fmt::Display for NormalizedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_accepts_zero_and_rejects_negatives() {
        for n in [0_i64, 1, 7, 1080, i64::MAX] {
            assert_eq!(NonNegativeInt::try_new(n).map(|v| i64::try_from(v.get()).unwrap()), Ok(n));
        }
        for n in [-1_i64, -3, i64::MIN] {
            let err = NonNegativeInt::try_new(n).unwrap_err();
            assert!(err.is_out_of_range(), "{n} should be out of range");
        }
    }

    #[test]
    fn positive_rejects_zero_and_negatives() {
        for n in [1_i64, 30, 120] {
            assert_eq!(PositiveInt::try_new(n).map(|v| i64::try_from(v.get()).unwrap()), Ok(n));
        }
        for n in [0_i64, -1, -30] {
            assert!(PositiveInt::try_new(n).unwrap_err().is_out_of_range());
        }
    }

    #[test]
    fn large_values_are_accepted() {
        let big = "5000000000";
        assert_eq!(big.parse::<PositiveInt>().map(PositiveInt::get), Ok(5_000_000_000));
        assert_eq!(big.parse::<NonNegativeInt>().map(NonNegativeInt::get), Ok(5_000_000_000));

        let max = u64::MAX.to_string();
        assert_eq!(max.parse::<PositiveInt>().map(u64::from), Ok(u64::MAX));
        assert_eq!(max.parse::<NonNegativeInt>().map(u64::from), Ok(u64::MAX));
        assert_eq!(PositiveInt::try_new(i64::MAX).map(PositiveInt::get), Ok(i64::MAX as u64));
    }

    #[test]
    fn digits_past_u64_are_unrepresentable_not_malformed() {
        let huge = "99999999999999999999999";
        assert!(matches!(
            huge.parse::<PositiveInt>(),
            Err(ValidationError::Unrepresentable { .. })
        ));
        let err = huge.parse::<NonNegativeInt>().unwrap_err();
        assert!(err.to_string().contains(huge));
        assert!(!err.to_string().contains("Expected a non-negative integer"));
    }

    #[test]
    fn sign_handling_follows_integer_syntax() {
        assert_eq!("+7".parse::<PositiveInt>().map(PositiveInt::get), Ok(7));
        assert_eq!("-0".parse::<NonNegativeInt>(), Ok(NonNegativeInt::ZERO));
        assert!("-0".parse::<PositiveInt>().unwrap_err().is_out_of_range());
        assert!("-99999999999999999999999".parse::<NonNegativeInt>().unwrap_err().is_out_of_range());
        for token in ["-", "+", "--1", "1e3", "0x10", " "] {
            assert!(
                matches!(token.parse::<NonNegativeInt>(), Err(ValidationError::Malformed { .. })),
                "{token:?} should be malformed"
            );
        }
    }

    #[test]
    fn normalized_float_bounds() {
        for f in [1e-9, 0.3, 0.5, 1.0] {
            assert_eq!(NormalizedFloat::try_new(f).map(NormalizedFloat::get), Ok(f));
        }
        for f in [0.0, -0.1, 1.000_001, 2.0, f64::NAN, f64::INFINITY] {
            assert!(NormalizedFloat::try_new(f).unwrap_err().is_out_of_range());
        }
    }

    #[test]
    fn parsing_distinguishes_malformed_from_out_of_range() {
        assert_eq!("12".parse::<NonNegativeInt>().map(NonNegativeInt::get), Ok(12));
        assert!("-3".parse::<NonNegativeInt>().unwrap_err().is_out_of_range());
        assert!("0".parse::<PositiveInt>().unwrap_err().is_out_of_range());
        assert!("1.5".parse::<NormalizedFloat>().unwrap_err().is_out_of_range());

        assert!(matches!(
            "ten".parse::<PositiveInt>(),
            Err(ValidationError::Malformed { .. })
        ));
        assert!(matches!(
            "1.5".parse::<NonNegativeInt>(),
            Err(ValidationError::Malformed { .. })
        ));
        assert!(matches!(
            "".parse::<NormalizedFloat>(),
            Err(ValidationError::Malformed { .. })
        ));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        // clap renders defaults with Display and parses them back.
        let threshold = NormalizedFloat::new_const(0.3);
        assert_eq!(threshold.to_string().parse::<NormalizedFloat>(), Ok(threshold));
        let length = PositiveInt::new_const(30);
        assert_eq!(length.to_string(), "30");
        assert_eq!(length.to_string().parse::<PositiveInt>(), Ok(length));
    }

    #[test]
    fn usable_as_plain_numbers() {
        let workers = PositiveInt::new_const(8);
        assert_eq!(u64::from(workers), 8);
        assert_eq!(u64::from(NonNegativeInt::new_const(4)), 4);
        assert!((f64::from(NormalizedFloat::ONE) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_as_bare_numbers() {
        let json = serde_json::to_string(&(
            NonNegativeInt::new_const(2),
            PositiveInt::new_const(3),
            NormalizedFloat::new_const(0.5),
        ))
        .unwrap();
        assert_eq!(json, "[2,3,0.5]");
    }
}
