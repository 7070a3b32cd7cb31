//! Association of crop specifications with input files.
//!
//! Crop values are matched to input files by position. When the user gives
//! fewer specifications than files, the last specification applies to every
//! remaining file. Without any specification, every file is left uncropped.

use std::iter::FusedIterator;

use serde::Serialize;

use crate::crop::CropValues;

/// Per-input crop values, in input file order.
///
/// With at least one specification the plan is logically infinite: it can be
/// zipped with an input list of any length. Without specifications it holds
/// exactly one "no crop" marker per input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropPlan {
    specs: Vec<CropValues>,
    inputs: usize,
}

impl CropPlan {
    /// Creates a plan for `inputs` input files.
    #[must_use]
    pub fn new(specs: Vec<CropValues>, inputs: usize) -> Self {
        Self { specs, inputs }
    }

    /// The specifications exactly as given, in order.
    #[must_use]
    pub fn specs(&self) -> &[CropValues] {
        &self.specs
    }

    #[must_use]
    pub fn is_uncropped(&self) -> bool {
        self.specs.is_empty()
    }

    /// Crop values for the input file at `index`.
    ///
    /// Indices past the last specification resolve to the last
    /// specification.
    #[must_use]
    pub fn crop_for(&self, index: usize) -> Option<CropValues> {
        let last = self.specs.len().checked_sub(1)?;
        self.specs.get(index.min(last)).copied()
    }

    /// Lazily yields the crop value for each input position.
    #[must_use]
    pub fn iter(&self) -> CropPlanIter<'_> {
        CropPlanIter {
            specs: &self.specs,
            position: 0,
            uncropped_remaining: self.inputs,
        }
    }
}

impl<'a> IntoIterator for &'a CropPlan {
    type Item = Option<CropValues>;
    type IntoIter = CropPlanIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`CropPlan::iter`].
///
/// Ends after the input count when the plan is uncropped; otherwise never
/// ends, repeating the last specification.
#[derive(Debug, Clone)]
pub struct CropPlanIter<'a> {
    specs: &'a [CropValues],
    position: usize,
    uncropped_remaining: usize,
}

impl Iterator for CropPlanIter<'_> {
    type Item = Option<CropValues>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.specs.last() {
            None => {
                if self.uncropped_remaining == 0 {
                    return None;
                }
                self.uncropped_remaining -= 1;
                Some(None)
            }
            Some(last) => {
                let values = self.specs.get(self.position).unwrap_or(last);
                self.position = self.position.saturating_add(1);
                Some(Some(*values))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.specs.is_empty() {
            (self.uncropped_remaining, Some(self.uncropped_remaining))
        } else {
            (usize::MAX, None)
        }
    }
}

impl FusedIterator for CropPlanIter<'_> {}
