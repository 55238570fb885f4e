//! Shared configuration and domain types for the lead-discovery workspace.

pub mod app_config;
pub mod config;
pub mod error;
pub mod lead;
pub mod search_plan;

pub use app_config::{AppConfig, EmailConfig, EmailDelivery, FetchFailurePolicy};
pub use config::{load_app_config, load_app_config_from_env, API_KEY_PLACEHOLDER};
pub use error::ConfigError;
pub use lead::{DetailStatus, LeadRecord, EMAIL_NOT_FOUND, HAS_WEBSITE_NO};
pub use search_plan::{load_search_plan, SearchPlan};
