//! Aggregation of per-place category scores into a single banded vibe.

use vibecheck_core::{Place, VibeResult};

use crate::scorer::score_category;

/// Mean used when there are no places to score.
pub const NEUTRAL_MEAN: f64 = 5.0;

const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;

/// Compute the vibe for a list of places.
///
/// Only each place's primary category contributes. An empty list is banded
/// as [`NEUTRAL_MEAN`]. Pure and total: the same input always yields the same
/// result and the score is always in `[1, 10]`.
#[must_use]
pub fn compute_vibe(places: &[Place]) -> VibeResult {
    let mean = mean_category_score(places.iter().map(|p| p.primary_category_name.as_str()))
        .unwrap_or(NEUTRAL_MEAN);
    band_score(mean)
}

/// Arithmetic mean of the category scores, or `None` for an empty input.
#[must_use]
pub fn mean_category_score<'a, I>(categories: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    let (sum, count) = categories
        .into_iter()
        .fold((0_u32, 0_u32), |(sum, count), name| {
            (sum + u32::from(score_category(name)), count + 1)
        });
    if count == 0 {
        return None;
    }
    Some(f64::from(sum) / f64::from(count))
}

/// Round a (possibly fractional) mean to the nearest integer, clamp it into
/// `[1, 10]`, and attach the matching label and emoji.
///
/// Halves round up, so `8.5` bands as `9` and `2.5` as `3`. A NaN mean is
/// treated as [`NEUTRAL_MEAN`].
#[must_use]
pub fn band_score(mean: f64) -> VibeResult {
    let mean = if mean.is_nan() { NEUTRAL_MEAN } else { mean };
    let clamped = mean.round().clamp(MIN_SCORE, MAX_SCORE);
    // clamped is an integer in [1, 10]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = clamped as u8;
    VibeResult::from_score(score)
}
