//! Places API response types.
//!
//! Both endpoints wrap their payload in a `{"status": "OK", ...}` envelope.
//! Only `results` (text search) and `result` (details) are consumed; the
//! client inspects the envelope as raw JSON and deserializes these members
//! into the types below.

use serde::{Deserialize, Deserializer};

/// Reads an explicit JSON `null` as `T::default()`.
///
/// `#[serde(default)]` only covers an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry from the text-search `results` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceCandidate {
    pub place_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_ratings_total: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
}

/// The `result` object from the place-details endpoint.
///
/// Every field is optional. [`PlaceDetail::default`] is the all-empty record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    /// `OPERATIONAL`, `CLOSED_TEMPORARILY` or `CLOSED_PERMANENTLY`.
    #[serde(default)]
    pub business_status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
}
