//! Lead pipeline orchestration.

use leadgen_core::{AppConfig, DetailStatus, FetchFailurePolicy, LeadRecord};
use leadgen_places::{PlaceCandidate, PlaceDetail};

use crate::email::extract_email;
use crate::filter::{should_include, SeenIds};
use crate::lookup::PlaceLookup;
use crate::rate_limit::RateLimiter;

/// Behavior switches for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Keep at most this many candidates from each search.
    pub max_results_per_query: Option<usize>,
    /// Skip place ids already processed earlier in the run.
    pub dedupe: bool,
    /// Scan name and address for an email address.
    pub extract_emails: bool,
    pub fetch_failure_policy: FetchFailurePolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_results_per_query: None,
            dedupe: true,
            extract_emails: true,
            fetch_failure_policy: FetchFailurePolicy::Include,
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_results_per_query: config.max_results_per_query,
            dedupe: config.dedupe,
            extract_emails: config.extract_emails,
            fetch_failure_policy: config.fetch_failure_policy,
        }
    }
}

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub pairs_searched: usize,
    pub failed_searches: usize,
    pub candidates_seen: usize,
    pub duplicates_skipped: usize,
    pub details_fetched: usize,
    pub detail_failures: usize,
    /// Candidates rejected because their detail record lists a website.
    pub with_website: usize,
    /// Website-less candidates dropped under [`FetchFailurePolicy::Skip`].
    pub unverified_skipped: usize,
    pub leads: usize,
}

/// Result of [`LeadPipeline::run`]: leads in discovery order plus counters.
#[derive(Debug, Clone, Default)]
pub struct LeadRun {
    pub leads: Vec<LeadRecord>,
    pub stats: RunStats,
}

/// Per-run mutable state. Created fresh by every `run` call.
#[derive(Default)]
struct RunState {
    seen: SeenIds,
    leads: Vec<LeadRecord>,
    stats: RunStats,
}

/// Drives search, dedup, detail fetch and filtering over a search plan.
pub struct LeadPipeline<L, R> {
    lookup: L,
    limiter: R,
    options: PipelineOptions,
}

impl<L, R> LeadPipeline<L, R>
where
    L: PlaceLookup,
    R: RateLimiter,
{
    pub fn new(lookup: L, limiter: R, options: PipelineOptions) -> Self {
        Self {
            lookup,
            limiter,
            options,
        }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Run the full search plan.
    ///
    /// Locations form the outer loop and queries the inner loop; candidates
    /// are handled in the order the API returned them, so `leads` is in
    /// discovery order. The rate limiter is awaited between consecutive
    /// (location, query) pairs. Every pair is attempted regardless of how
    /// many searches or detail lookups fail.
    pub async fn run(&self, queries: &[String], locations: &[String]) -> LeadRun {
        let mut state = RunState::default();
        let mut first_pair = true;

        for location in locations {
            for query in queries {
                if !first_pair {
                    self.limiter.wait().await;
                }
                first_pair = false;

                self.process_pair(query, location, &mut state).await;
            }
        }

        state.stats.leads = state.leads.len();
        tracing::info!(
            pairs = state.stats.pairs_searched,
            failed_searches = state.stats.failed_searches,
            candidates = state.stats.candidates_seen,
            duplicates = state.stats.duplicates_skipped,
            detail_failures = state.stats.detail_failures,
            leads = state.stats.leads,
            "lead pipeline finished"
        );

        LeadRun {
            leads: state.leads,
            stats: state.stats,
        }
    }

    async fn process_pair(&self, query: &str, location: &str, state: &mut RunState) {
        tracing::info!(query, location, "searching");
        let candidates = self.search(query, location, &mut state.stats).await;
        let leads_before = state.leads.len();

        for candidate in &candidates {
            state.stats.candidates_seen += 1;

            if candidate.place_id.trim().is_empty() {
                tracing::debug!(query, location, "skipping candidate with blank place id");
                continue;
            }

            if self.options.dedupe && !state.seen.first_sighting(&candidate.place_id) {
                state.stats.duplicates_skipped += 1;
                tracing::debug!(place_id = %candidate.place_id, "already processed this run");
                continue;
            }

            let (detail, status) = self
                .fetch_details(&candidate.place_id, &mut state.stats)
                .await;

            if !should_include(&detail) {
                state.stats.with_website += 1;
                continue;
            }

            if status == DetailStatus::Unavailable
                && self.options.fetch_failure_policy == FetchFailurePolicy::Skip
            {
                state.stats.unverified_skipped += 1;
                tracing::warn!(
                    place_id = %candidate.place_id,
                    "dropping candidate with unverified website status"
                );
                continue;
            }

            let lead = self.build_lead(candidate, &detail, status, location, query);
            tracing::info!(
                name = lead.business_name.as_deref().unwrap_or("N/A"),
                place_id = %lead.place_id,
                detail_status = %lead.detail_status,
                "found business without website"
            );
            state.leads.push(lead);
        }

        tracing::debug!(
            query,
            location,
            candidates = candidates.len(),
            new_leads = state.leads.len() - leads_before,
            "pair complete"
        );
    }

    /// Search one (query, location) pair, degrading any failure to an empty
    /// candidate list.
    async fn search(
        &self,
        query: &str,
        location: &str,
        stats: &mut RunStats,
    ) -> Vec<PlaceCandidate> {
        stats.pairs_searched += 1;
        match self.lookup.search(query, location).await {
            Ok(mut candidates) => {
                if let Some(cap) = self.options.max_results_per_query {
                    candidates.truncate(cap);
                }
                candidates
            }
            Err(e) => {
                stats.failed_searches += 1;
                tracing::warn!(query, location, error = %e, "search failed; continuing");
                Vec::new()
            }
        }
    }

    /// Fetch details for one place, substituting an empty record on failure.
    async fn fetch_details(
        &self,
        place_id: &str,
        stats: &mut RunStats,
    ) -> (PlaceDetail, DetailStatus) {
        match self.lookup.details(place_id).await {
            Ok(detail) => {
                stats.details_fetched += 1;
                (detail, DetailStatus::Fetched)
            }
            Err(e) => {
                stats.detail_failures += 1;
                tracing::warn!(place_id, error = %e, "detail lookup failed; treating as empty record");
                (PlaceDetail::default(), DetailStatus::Unavailable)
            }
        }
    }

    fn build_lead(
        &self,
        candidate: &PlaceCandidate,
        detail: &PlaceDetail,
        detail_status: DetailStatus,
        location: &str,
        query: &str,
    ) -> LeadRecord {
        let business_name = first_non_blank(candidate.name.as_deref(), detail.name.as_deref());
        let address = first_non_blank(
            candidate.formatted_address.as_deref(),
            detail.formatted_address.as_deref(),
        );

        let email = if self.options.extract_emails {
            extract_email(business_name.as_deref(), address.as_deref())
        } else {
            None
        };

        let total_ratings = if candidate.user_ratings_total > 0 {
            candidate.user_ratings_total
        } else {
            detail.user_ratings_total.unwrap_or(0)
        };

        let types = if candidate.types.is_empty() {
            &detail.types
        } else {
            &candidate.types
        };

        LeadRecord {
            business_name,
            address,
            phone: first_non_blank(detail.formatted_phone_number.as_deref(), None),
            email,
            rating: candidate.rating.or(detail.rating),
            total_ratings,
            business_status: first_non_blank(detail.business_status.as_deref(), None),
            types: types.join(", "),
            location_searched: location.to_owned(),
            query_used: query.to_owned(),
            place_id: candidate.place_id.clone(),
            detail_status,
        }
    }
}

fn first_non_blank(primary: Option<&str>, fallback: Option<&str>) -> Option<String> {
    [primary, fallback]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
