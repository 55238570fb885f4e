use std::path::PathBuf;

/// What to do with a candidate whose detail lookup failed.
///
/// A failed lookup yields an empty detail record, which carries no website
/// and therefore passes the lead filter. `Include` keeps that behavior;
/// `Skip` drops such candidates instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchFailurePolicy {
    #[default]
    Include,
    Skip,
}

impl std::fmt::Display for FetchFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailurePolicy::Include => write!(f, "include"),
            FetchFailurePolicy::Skip => write!(f, "skip"),
        }
    }
}

/// SMTP credentials and addressing for the report email.
#[derive(Clone)]
pub struct EmailConfig {
    pub sender: String,
    pub password: String,
    pub recipient: String,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("sender", &self.sender)
            .field("password", &"[redacted]")
            .field("recipient", &self.recipient)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

/// Whether the exported spreadsheet should be emailed.
///
/// Delivery is enabled only when sender, password and recipient are all set.
/// `Disabled` lists the variables that were missing so the caller can warn.
#[derive(Debug, Clone)]
pub enum EmailDelivery {
    Enabled(EmailConfig),
    Disabled { missing: Vec<String> },
}

impl EmailDelivery {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, EmailDelivery::Enabled(_))
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub places_api_key: String,
    pub log_level: String,
    pub search_plan_path: PathBuf,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub rate_limit_ms: u64,
    pub max_results_per_query: Option<usize>,
    pub dedupe: bool,
    pub extract_emails: bool,
    pub fetch_failure_policy: FetchFailurePolicy,
    pub email: EmailDelivery,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("places_api_key", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("search_plan_path", &self.search_plan_path)
            .field("output_dir", &self.output_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("rate_limit_ms", &self.rate_limit_ms)
            .field("max_results_per_query", &self.max_results_per_query)
            .field("dedupe", &self.dedupe)
            .field("extract_emails", &self.extract_emails)
            .field("fetch_failure_policy", &self.fetch_failure_policy)
            .field("email", &self.email)
            .finish()
    }
}
