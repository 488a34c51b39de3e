//! Normalization from raw search records to [`vibecheck_core::Place`].
//!
//! A record is kept only if it has a non-empty name, at least one category,
//! and a non-empty first category name. Only the first category is carried
//! forward; it is the one the vibe scorer reads. A record without coordinates
//! is kept with no position.

use thiserror::Error;
use vibecheck_core::Place;

use crate::types::{PlaceSearchResponse, RawPlace};

const ADDRESS_FALLBACK: &str = "Address unavailable";
const LOCALITY_FALLBACK: &str = "Unknown";

/// Why a raw record was left out of the normalized list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("record has no name")]
    MissingName,
    #[error("record has no categories")]
    NoCategories,
    #[error("first category has no name")]
    EmptyPrimaryCategory,
}

/// Normalizes every usable record in a search response, preserving order.
///
/// Skipped records are logged at debug level.
#[must_use]
pub fn normalize_results(response: PlaceSearchResponse) -> Vec<Place> {
    response
        .results
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let raw = raw?;
            match normalize_place(raw, index) {
                Ok(place) => Some(place),
                Err(reason) => {
                    tracing::debug!(index, %reason, "skipping place record");
                    None
                }
            }
        })
        .collect()
}

/// Normalizes a single [`RawPlace`].
///
/// `index` is the record's position in the response; it seeds a stand-in
/// identifier when the API omits one.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the record cannot become a [`Place`].
pub fn normalize_place(raw: RawPlace, index: usize) -> Result<Place, SkipReason> {
    let name = raw
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or(SkipReason::MissingName)?;

    let first_category = raw
        .categories
        .and_then(|cats| cats.into_iter().next())
        .ok_or(SkipReason::NoCategories)?;
    let primary_category_name = first_category
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or(SkipReason::EmptyPrimaryCategory)?;

    let (latitude, longitude) = match (raw.latitude, raw.longitude) {
        (Some(lat), Some(lon)) => (Some(lat), Some(lon)),
        _ => raw
            .geocodes
            .and_then(|g| g.main)
            .map_or((None, None), |m| (Some(m.latitude), Some(m.longitude))),
    };

    let location = raw.location.unwrap_or_default();
    let address = non_empty(location.address)
        .or_else(|| non_empty(location.formatted_address))
        .unwrap_or_else(|| ADDRESS_FALLBACK.to_string());
    let locality = non_empty(location.locality).unwrap_or_else(|| LOCALITY_FALLBACK.to_string());

    if latitude.is_none() {
        tracing::debug!(index, %name, "place has no coordinates; it will not be mapped");
    }

    let id = non_empty(raw.fsq_place_id).unwrap_or_else(|| format!("unidentified-{index}"));

    Ok(Place {
        id,
        name,
        primary_category_name,
        address,
        locality,
        latitude,
        longitude,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
