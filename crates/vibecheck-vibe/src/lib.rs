//! Vibe scoring for a neighbourhood.
//!
//! Each place contributes the base score of its primary category (see
//! [`score_category`]); [`compute_vibe`] averages those scores and bands the
//! result into a [`VibeResult`].

pub mod aggregate;
pub mod scorer;

pub use aggregate::{band_score, compute_vibe, mean_category_score, NEUTRAL_MEAN};
pub use scorer::{score_category, NEUTRAL_CATEGORY_SCORE};
pub use vibecheck_core::VibeResult;
