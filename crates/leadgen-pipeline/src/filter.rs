use std::collections::HashSet;

use leadgen_places::PlaceDetail;

/// Returns `true` when the detail record has no usable website.
///
/// An absent website and one that is blank after trimming are treated alike.
#[must_use]
pub fn should_include(detail: &PlaceDetail) -> bool {
    detail
        .website
        .as_deref()
        .is_none_or(|site| site.trim().is_empty())
}

/// Place ids already processed in the current run.
#[derive(Debug, Default)]
pub struct SeenIds {
    ids: HashSet<String>,
}

impl SeenIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `place_id` as seen and returns `true` if it was not seen before.
    pub fn first_sighting(&mut self, place_id: &str) -> bool {
        self.ids.insert(place_id.to_owned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
