//! Keyword scorer for venue category names.

/// Score for a category that matches no keyword group.
pub const NEUTRAL_CATEGORY_SCORE: u8 = 3;

/// Keyword groups in priority order.
///
/// Keywords are lowercase substrings. The first group with any matching
/// keyword decides the score; later groups are never consulted.
pub(crate) const CATEGORY_GROUPS: &[(&[&str], u8)] = &[
    (&["music", "brewery", "beer"], 10),
    (&["bar", "pizzeria", "pub"], 8),
    (&["restaurant", "movie", "hotel", "theater"], 7),
    (&["coffee"], 6),
    (&["park", "plaza"], 5),
    (&["store", "shop"], 4),
    (&["library", "bank", "government", "city hall"], 1),
];

/// Score a category name using the keyword groups.
///
/// Matching is a case-insensitive substring test. Returns
/// [`NEUTRAL_CATEGORY_SCORE`] for empty or unrecognized names.
#[must_use]
pub fn score_category(name: &str) -> u8 {
    let lower = name.to_lowercase();
    CATEGORY_GROUPS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(NEUTRAL_CATEGORY_SCORE, |&(_, score)| score)
}
