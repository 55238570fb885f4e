//! The lead record: one business found without a published website.

/// Rendered in place of an email address when none could be extracted.
pub const EMAIL_NOT_FOUND: &str = "Not Found";

/// Every lead, by construction, has no website.
pub const HAS_WEBSITE_NO: &str = "No";

/// Provenance of the detail record a lead was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailStatus {
    /// The detail lookup succeeded and reported no website.
    Fetched,
    /// The detail lookup failed; the lead rests on an empty stand-in record.
    Unavailable,
}

impl std::fmt::Display for DetailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetailStatus::Fetched => write!(f, "fetched"),
            DetailStatus::Unavailable => write!(f, "unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeadRecord {
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub rating: Option<f64>,
    pub total_ratings: u32,
    pub business_status: Option<String>,
    /// Category tags joined with `", "`.
    pub types: String,
    pub location_searched: String,
    pub query_used: String,
    pub place_id: String,
    pub detail_status: DetailStatus,
}

impl LeadRecord {
    #[must_use]
    pub fn has_website(&self) -> &'static str {
        HAS_WEBSITE_NO
    }

    /// The email column value, falling back to [`EMAIL_NOT_FOUND`].
    #[must_use]
    pub fn email_or_sentinel(&self) -> &str {
        self.email.as_deref().unwrap_or(EMAIL_NOT_FOUND)
    }
}
