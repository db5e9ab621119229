//! Size criteria: approximate sizes, size ranges and named size buckets.
//!
//! Sizes are given as a floating-point magnitude in a binary unit, so
//! `1.5 MegaBytes` is representable. A single magnitude is matched as a
//! window one unit wide on either side, see [`size_bounds`].

use crate::entry::Entry;
use crate::error::SieveError;
use crate::traits::Matcher;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

/// 2^63, the first value past `i64::MAX` that `f64` represents exactly.
const I64_EDGE: f64 = 9_223_372_036_854_775_808.0;

/// Binary size units. Each step multiplies by 1024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeUnit {
    #[default]
    Bytes,
    KiloBytes,
    MegaBytes,
    GigaBytes,
    TeraBytes,
    PetaBytes,
}

impl SizeUnit {
    /// The power of 1024 this unit stands for (`Bytes` = 0 ... `PetaBytes` = 5).
    pub const fn power(self) -> i32 {
        match self {
            Self::Bytes => 0,
            Self::KiloBytes => 1,
            Self::MegaBytes => 2,
            Self::GigaBytes => 3,
            Self::TeraBytes => 4,
            Self::PetaBytes => 5,
        }
    }

    fn multiplier(self) -> f64 {
        1024f64.powi(self.power())
    }
}

/// Compute the inclusive byte window `(lower, upper)` accepted for a size of
/// `magnitude` units.
///
/// `lower = floor((magnitude - 1) * 1024^unit)` and
/// `upper = ceil((magnitude + 1) * 1024^unit)`. A magnitude of exactly `0` is
/// treated as `1`, so `0 KiloBytes` accepts `0..=2048` bytes.
///
/// # Errors
///
/// [`SieveError::OutOfRange`] if either bound is not finite or does not fit
/// in an `i64`.
pub fn size_bounds(magnitude: f64, unit: SizeUnit) -> Result<(i64, i64), SieveError> {
    let effective = if magnitude == 0.0 { 1.0 } else { magnitude };
    let scale = unit.multiplier();

    let out_of_range = || SieveError::OutOfRange { magnitude, unit };
    let lower = to_i64(((effective - 1.0) * scale).floor()).ok_or_else(out_of_range)?;
    let upper = to_i64(((effective + 1.0) * scale).ceil()).ok_or_else(out_of_range)?;

    Ok((lower, upper))
}

fn to_i64(value: f64) -> Option<i64> {
    if value.is_finite() && value < I64_EDGE && value >= -I64_EDGE {
        Some(value as i64)
    } else {
        None
    }
}

fn size_within(entry: &Entry, lower: i64, upper: i64) -> bool {
    entry
        .size
        .and_then(|size| i64::try_from(size).ok())
        .map_or(false, |size| lower <= size && size <= upper)
}

fn valid_range(lower: f64, upper: f64) -> bool {
    lower >= 0.0 && upper >= 0.0 && lower < upper
}

/// Whether the entry's size falls inside the window of [`size_bounds`].
///
/// A bound that cannot be computed yields `false`. Directories never match.
pub fn match_by_size(entry: &Entry, magnitude: f64, unit: SizeUnit) -> bool {
    match size_bounds(magnitude, unit) {
        Ok((lower, upper)) => size_within(entry, lower, upper),
        Err(_) => false,
    }
}

/// Whether the entry's size lies between the lower bound of `lower` and the
/// upper bound of `upper`, both in `unit`.
///
/// Negative magnitudes, or `lower >= upper`, match nothing.
pub fn match_by_size_range(entry: &Entry, lower: f64, upper: f64, unit: SizeUnit) -> bool {
    if !valid_range(lower, upper) {
        return false;
    }
    match (size_bounds(lower, unit), size_bounds(upper, unit)) {
        (Ok((lo, _)), Ok((_, hi))) => size_within(entry, lo, hi),
        _ => false,
    }
}

/// Named size buckets in the style of a file manager's size filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommonSize {
    /// Exactly 0 bytes.
    Empty,
    /// 1 KiB to 10 KiB.
    Tiny,
    /// 11 KiB to 100 KiB.
    Small,
    /// 101 KiB to 1000 KiB.
    Medium,
    /// 2 MiB to 16 MiB.
    Large,
    /// 17 MiB to 128 MiB.
    Huge,
    /// Above 128 MiB.
    Gigantic,
}

/// Whether the entry's size falls in `bucket`. Bounds are inclusive and
/// the buckets do not tile: a 500 byte file is in none of them.
pub fn match_by_common_size(entry: &Entry, bucket: CommonSize) -> bool {
    let Some(size) = entry.size else {
        return false;
    };

    match bucket {
        CommonSize::Empty => size == 0,
        CommonSize::Tiny => (KIB..=10 * KIB).contains(&size),
        CommonSize::Small => (11 * KIB..=100 * KIB).contains(&size),
        CommonSize::Medium => (101 * KIB..=1000 * KIB).contains(&size),
        CommonSize::Large => (2 * MIB..=16 * MIB).contains(&size),
        CommonSize::Huge => (17 * MIB..=128 * MIB).contains(&size),
        CommonSize::Gigantic => size_bounds(129.0, SizeUnit::MegaBytes)
            .map_or(false, |(lower, _)| i64::try_from(size).map_or(true, |s| s > lower)),
    }
}

impl Matcher for CommonSize {
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
        Ok(match_by_common_size(entry, *self))
    }
}

/// An approximate size: `magnitude` units, plus or minus one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeCriterion {
    pub magnitude: f64,
    pub unit: SizeUnit,
}

impl SizeCriterion {
    pub fn new(magnitude: f64, unit: SizeUnit) -> Self {
        Self { magnitude, unit }
    }
}

impl Matcher for SizeCriterion {
    /// Unlike [`match_by_size`], an out-of-range bound is reported as an
    /// error so a logging walk can record it.
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
        let (lower, upper) = size_bounds(self.magnitude, self.unit)?;
        Ok(size_within(entry, lower, upper))
    }
}

/// A size range sharing one unit. Matches nothing unless
/// `0 <= lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRangeCriterion {
    pub lower: f64,
    pub upper: f64,
    pub unit: SizeUnit,
}

impl SizeRangeCriterion {
    pub fn new(lower: f64, upper: f64, unit: SizeUnit) -> Self {
        Self { lower, upper, unit }
    }
}

impl Matcher for SizeRangeCriterion {
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
        if !valid_range(self.lower, self.upper) {
            return Ok(false);
        }
        let (lower, _) = size_bounds(self.lower, self.unit)?;
        let (_, upper) = size_bounds(self.upper, self.unit)?;
        Ok(size_within(entry, lower, upper))
    }
}
