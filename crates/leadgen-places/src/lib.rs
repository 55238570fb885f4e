//! Async client for the Google Places text-search and place-details endpoints.

pub mod client;
pub mod error;
pub mod types;

pub use client::{search_phrase, PlacesClient, DETAIL_FIELDS};
pub use error::PlacesError;
pub use types::{PlaceCandidate, PlaceDetail};
