// ============================================================================
// av1transcoder-core/src/crop.rs
// ============================================================================
//
// CROP VALUES: Pixel Amounts Trimmed From Each Frame Edge
//
// A crop specification is four non-negative pixel counts given as
// TOP BOTTOM LEFT RIGHT on the command line. Validation happens per
// component, so a value of this type is always usable as-is.

use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;
use crate::types::NonNegativeInt;

/// Number of values making up one crop specification.
pub const CROP_VALUE_COUNT: usize = 4;

/// Pixels to remove from each edge of the video frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct CropValues {
    top: NonNegativeInt,
    bottom: NonNegativeInt,
    left: NonNegativeInt,
    right: NonNegativeInt,
}

impl CropValues {
    #[must_use]
    pub const fn new(
        top: NonNegativeInt,
        bottom: NonNegativeInt,
        left: NonNegativeInt,
        right: NonNegativeInt,
    ) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Validates four signed numbers. The first negative component is
    /// reported.
    pub fn try_from_raw(top: i64, bottom: i64, left: i64, right: i64) -> Result<Self, ValidationError> {
        Ok(Self::new(
            NonNegativeInt::try_new(top)?,
            NonNegativeInt::try_new(bottom)?,
            NonNegativeInt::try_new(left)?,
            NonNegativeInt::try_new(right)?,
        ))
    }

    #[must_use]
    pub const fn top(&self) -> NonNegativeInt {
        self.top
    }

    #[must_use]
    pub const fn bottom(&self) -> NonNegativeInt {
        self.bottom
    }

    #[must_use]
    pub const fn left(&self) -> NonNegativeInt {
        self.left
    }

    #[must_use]
    pub const fn right(&self) -> NonNegativeInt {
        self.right
    }

    /// Total number of rows removed.
    #[must_use]
    pub fn crop_height(&self) -> u128 {
        u128::from(self.top.get()) + u128::from(self.bottom.get())
    }

    /// Total number of columns removed.
    #[must_use]
    pub fn crop_width(&self) -> u128 {
        u128::from(self.left.get()) + u128::from(self.right.get())
    }

    /// True when no pixels are removed at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crop_height() == 0 && self.crop_width() == 0
    }

    /// The ffmpeg `crop` filter applying these values.
    ///
    /// ```
    /// use av1transcoder_core::CropValues;
    ///
    /// let crop = CropValues::try_from_raw(140, 140, 0, 0).unwrap();
    /// assert_eq!(crop.filter_expression(), "crop=iw-0:ih-280:0:140");
    /// ```
    #[must_use]
    pub fn filter_expression(&self) -> String {
        format!(
            "crop=iw-{}:ih-{}:{}:{}",
            self.crop_width(),
            self.crop_height(),
            self.left,
            self.top
        )
    }
}

impl From<[NonNegativeInt; CROP_VALUE_COUNT]> for CropValues {
    fn from([top, bottom, left, right]: [NonNegativeInt; CROP_VALUE_COUNT]) -> Self {
        Self::new(top, bottom, left, right)
    }
}

impl TryFrom<&[NonNegativeInt]> for CropValues {
    type Error = ValidationError;

    fn try_from(values: &[NonNegativeInt]) -> Result<Self, Self::Error> {
        let values: [NonNegativeInt; CROP_VALUE_COUNT] =
            values.try_into().map_err(|_| ValidationError::Malformed {
                expected: "exactly four crop values: TOP BOTTOM LEFT RIGHT",
                token: values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" "),
            })?;
        Ok(values.into())
    }
}

impl fmt::Display for CropValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top={} bottom={} left={} right={}",
            self.top, self.bottom, self.left, self.right
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop(top: u64, bottom: u64, left: u64, right: u64) -> CropValues {
        CropValues::new(
            NonNegativeInt::new_const(top),
            NonNegativeInt::new_const(bottom),
            NonNegativeInt::new_const(left),
            NonNegativeInt::new_const(right),
        )
    }

    #[test]
    fn derived_dimensions_sum_opposite_edges() {
        for (t, b, l, r) in [(0, 0, 0, 0), (1, 2, 3, 4), (140, 138, 0, 2), (u64::MAX, u64::MAX, 5, 6)] {
            let values = crop(t, b, l, r);
            assert_eq!(values.crop_height(), u128::from(t) + u128::from(b));
            assert_eq!(values.crop_width(), u128::from(l) + u128::from(r));
        }
    }

    #[test]
    fn negative_component_is_rejected() {
        let err = CropValues::try_from_raw(1, 2, -3, 4).unwrap_err();
        assert!(err.is_out_of_range());
        assert!(err.to_string().contains("-3"));
    }

    #[test]
    fn slice_must_hold_exactly_four_values() {
        let values = [NonNegativeInt::new_const(1); 4];
        assert_eq!(CropValues::try_from(&values[..]), Ok(crop(1, 1, 1, 1)));
        assert!(matches!(
            CropValues::try_from(&values[..3]),
            Err(ValidationError::Malformed { .. })
        ));
    }

    #[test]
    fn filter_expression_uses_left_and_top_offsets() {
        assert_eq!(crop(10, 20, 30, 40).filter_expression(), "crop=iw-70:ih-30:30:10");
        assert!(crop(0, 0, 0, 0).is_empty());
        assert!(!crop(0, 0, 0, 1).is_empty());
    }
}
