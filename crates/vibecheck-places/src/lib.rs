//! Client for the Foursquare Places search API.
//!
//! [`PlacesClient::fetch_nearby_places`] issues one search around a
//! coordinate and returns normalized [`vibecheck_core::Place`] records.
//! Transport and decoding failures surface as connection errors; non-2xx
//! responses surface as service errors carrying the status and message.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{PlacesClient, SearchParams};
pub use error::PlacesError;
pub use normalize::{normalize_place, normalize_results, SkipReason};
pub use types::{PlaceSearchResponse, RawCategory, RawLocation, RawPlace};
