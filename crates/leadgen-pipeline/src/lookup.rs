use std::future::Future;

use leadgen_places::{PlaceCandidate, PlaceDetail, PlacesClient, PlacesError};

/// The two remote lookups the pipeline depends on.
///
/// Implemented by [`PlacesClient`]; tests substitute in-memory fakes.
pub trait PlaceLookup {
    fn search(
        &self,
        query: &str,
        location: &str,
    ) -> impl Future<Output = Result<Vec<PlaceCandidate>, PlacesError>> + Send;

    fn details(
        &self,
        place_id: &str,
    ) -> impl Future<Output = Result<PlaceDetail, PlacesError>> + Send;
}

impl PlaceLookup for PlacesClient {
    async fn search(
        &self,
        query: &str,
        location: &str,
    ) -> Result<Vec<PlaceCandidate>, PlacesError> {
        self.text_search(query, location).await
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetail, PlacesError> {
        self.place_details(place_id).await
    }
}
