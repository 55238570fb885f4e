//! Lead-discovery pipeline.
//!
//! Searches every (location, query) pair, skips place ids already seen in
//! the run, fetches details for the rest, and keeps businesses without a
//! website as [`leadgen_core::LeadRecord`]s. Search and detail failures are
//! logged and skipped; nothing below configuration aborts a run.

pub mod email;
pub mod filter;
pub mod lookup;
pub mod pipeline;
pub mod rate_limit;

pub use email::{extract_email, find_email};
pub use filter::{should_include, SeenIds};
pub use lookup::PlaceLookup;
pub use pipeline::{LeadPipeline, LeadRun, PipelineOptions, RunStats};
pub use rate_limit::{FixedInterval, NoDelay, RateLimiter};
