//! HTTP client for the Google Places web service.
//!
//! Wraps `reqwest` with API key handling, envelope status checks and typed
//! response deserialization. Only the first page of text-search results is
//! read; `next_page_token` is ignored.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::error::PlacesError;
use crate::types::{PlaceCandidate, PlaceDetail};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Fields requested from the place-details endpoint.
pub const DETAIL_FIELDS: &str = "name,formatted_address,formatted_phone_number,website,rating,user_ratings_total,business_status,types";

/// Client for the Places text-search and place-details endpoints.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    text_search_url: Url,
    details_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes `join` append to the path instead of
        // replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        let text_search_url = base
            .join("textsearch/json")
            .map_err(|e| invalid(e.to_string()))?;
        let details_url = base
            .join("details/json")
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            text_search_url,
            details_url,
        })
    }

    /// Searches for places matching `"{query} in {location}"`.
    ///
    /// Entries in `results` that lack a `place_id` or otherwise fail to
    /// deserialize are skipped.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the envelope status is not `OK` or `ZERO_RESULTS`.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body is not JSON.
    /// - [`PlacesError::UnexpectedShape`] if `results` is missing.
    pub async fn text_search(
        &self,
        query: &str,
        location: &str,
    ) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let phrase = search_phrase(query, location);
        let url = self.build_url(&self.text_search_url, &[("query", &phrase)]);
        let context = format!("textsearch(query={phrase})");

        let body = self.request_json(&url, &context).await?;
        Self::check_status(&body)?;

        let results = body
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| PlacesError::UnexpectedShape {
                context: context.clone(),
                field: "results",
            })?;

        let candidates = results
            .iter()
            .filter_map(|raw| match PlaceCandidate::deserialize(raw) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    tracing::debug!(query, location, error = %e, "skipping malformed search result");
                    None
                }
            })
            .collect();

        Ok(candidates)
    }

    /// Fetches the [`DETAIL_FIELDS`] for a single place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the envelope status is not `OK`.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body or `result` does not match
    ///   the expected shape.
    /// - [`PlacesError::UnexpectedShape`] if `result` is missing.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetail, PlacesError> {
        let url = self.build_url(
            &self.details_url,
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        );
        let context = format!("details(place_id={place_id})");

        let body = self.request_json(&url, &context).await?;
        Self::check_status(&body)?;

        let result = body
            .get("result")
            .filter(|r| r.is_object())
            .ok_or_else(|| PlacesError::UnexpectedShape {
                context: context.clone(),
                field: "result",
            })?;

        PlaceDetail::deserialize(result).map_err(|e| PlacesError::Deserialize { context, source: e })
    }

    /// Builds the request URL with percent-encoded parameters and the API key
    /// appended last.
    fn build_url(&self, endpoint: &Url, params: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as JSON.
    ///
    /// `context` identifies the call in errors; the URL itself is never used
    /// because it carries the API key.
    async fn request_json(&self, url: &Url, context: &str) -> Result<Value, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    /// Checks the envelope `status` field.
    ///
    /// `OK` and `ZERO_RESULTS` pass. A missing status passes too, leaving the
    /// shape check to decide.
    fn check_status(body: &Value) -> Result<(), PlacesError> {
        match body.get("status").and_then(Value::as_str) {
            None | Some("OK" | "ZERO_RESULTS") => Ok(()),
            Some(status) => {
                let message = body
                    .get("error_message")
                    .and_then(Value::as_str)
                    .unwrap_or("no error message")
                    .to_string();
                Err(PlacesError::ApiStatus {
                    status: status.to_string(),
                    message,
                })
            }
        }
    }
}

/// The natural-language phrase sent to text search.
#[must_use]
pub fn search_phrase(query: &str, location: &str) -> String {
    format!("{query} in {location}")
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
