//! The lead run: search plan in, spreadsheet (and optional email) out.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use leadgen_core::{load_search_plan, AppConfig, EmailDelivery, SearchPlan};
use leadgen_pipeline::{FixedInterval, LeadPipeline, LeadRun, PipelineOptions};
use leadgen_places::PlacesClient;

#[derive(Debug, Default)]
pub(crate) struct RunOptions {
    pub(crate) output: Option<PathBuf>,
    pub(crate) send_email: bool,
}

/// Load the search plan from `path`, falling back to the built-in plan when
/// the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed or
/// validated.
pub(crate) fn resolve_search_plan(path: &Path) -> anyhow::Result<SearchPlan> {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "search plan file not found; using built-in queries and locations"
        );
        return Ok(SearchPlan::builtin());
    }

    let plan = load_search_plan(path)?;
    tracing::debug!(
        path = %path.display(),
        queries = plan.queries.len(),
        locations = plan.locations.len(),
        "loaded search plan"
    );
    Ok(plan)
}

pub(crate) fn print_plan(plan: &SearchPlan) {
    println!(
        "dry-run: {} queries x {} locations = {} searches",
        plan.queries.len(),
        plan.locations.len(),
        plan.total_searches()
    );
    println!("queries:");
    for query in &plan.queries {
        println!("  {query}");
    }
    println!("locations:");
    for location in &plan.locations {
        println!("  {location}");
    }
}

/// The spreadsheet path: `explicit` when given, otherwise a generated name
/// inside `output_dir`.
pub(crate) fn resolve_output_path(
    explicit: Option<&Path>,
    output_dir: &Path,
    timestamp: NaiveDateTime,
    locations: &[String],
) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => output_dir.join(leadgen_export::default_filename(timestamp, locations)),
    }
}

fn print_summary(run: &LeadRun) {
    let stats = &run.stats;
    println!(
        "Searched {} location/query pairs ({} failed); {} candidates, {} duplicates skipped.",
        stats.pairs_searched, stats.failed_searches, stats.candidates_seen, stats.duplicates_skipped
    );
    println!(
        "Detail lookups: {} succeeded, {} failed; {} had a website.",
        stats.details_fetched, stats.detail_failures, stats.with_website
    );
    if stats.unverified_skipped > 0 {
        println!(
            "Dropped {} candidates whose website status could not be verified.",
            stats.unverified_skipped
        );
    }
    println!("Found {} businesses without a website.", stats.leads);
}

/// Run the pipeline over `plan`, write the spreadsheet and email it if
/// configured.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the spreadsheet
/// cannot be written. Search, detail and email failures are logged only.
pub(crate) async fn run_leads(
    config: &AppConfig,
    plan: &SearchPlan,
    options: &RunOptions,
) -> anyhow::Result<()> {
    let client = PlacesClient::new(
        &config.places_api_key,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Places client: {e}"))?;

    let pipeline = LeadPipeline::new(
        client,
        FixedInterval::from_millis(config.rate_limit_ms),
        PipelineOptions::from_app_config(config),
    );

    tracing::info!(
        searches = plan.total_searches(),
        rate_limit_ms = config.rate_limit_ms,
        dedupe = config.dedupe,
        fetch_failure_policy = %config.fetch_failure_policy,
        "starting lead run"
    );

    let run = pipeline.run(&plan.queries, &plan.locations).await;
    print_summary(&run);

    if run.leads.is_empty() {
        println!("No leads found.");
        return Ok(());
    }

    let path = resolve_output_path(
        options.output.as_deref(),
        &config.output_dir,
        chrono::Local::now().naive_local(),
        &plan.locations,
    );
    leadgen_export::write_leads_xlsx(&path, &run.leads)?;
    println!("Saved {} leads to {}", run.leads.len(), path.display());

    if !options.send_email {
        tracing::info!("email delivery skipped (--no-email)");
        return Ok(());
    }

    match &config.email {
        EmailDelivery::Enabled(email) => {
            match leadgen_export::send_report(email, &path, run.leads.len()).await {
                Ok(()) => println!("Emailed report to {}", email.recipient),
                Err(e) => {
                    tracing::error!(error = %e, recipient = %email.recipient, "failed to email lead report");
                }
            }
        }
        EmailDelivery::Disabled { missing } => {
            tracing::warn!(
                missing = %missing.join(", "),
                "email delivery skipped; credentials not configured"
            );
        }
    }

    Ok(())
}
