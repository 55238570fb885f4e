use crate::app_config::{AppConfig, EmailConfig, EmailDelivery, FetchFailurePolicy};
use crate::ConfigError;

/// Value shipped in sample `.env` files; treated the same as a missing key.
pub const API_KEY_PLACEHOLDER: &str = "PASTE_YOUR_API_KEY_HERE";

const API_KEY_VAR: &str = "GOOGLE_PLACES_API_KEY";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if the API key is missing or still the placeholder,
/// or if any value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Values that are set but blank are treated as unset.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let present = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { present(var).unwrap_or_else(|| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match present(var) {
            None => Ok(default),
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                invalid(var, format!("expected true/false, got '{raw}'"))
            }),
        }
    };

    let places_api_key = present(API_KEY_VAR)
        .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_VAR.to_string()))?;
    if places_api_key == API_KEY_PLACEHOLDER {
        return Err(ConfigError::PlaceholderApiKey {
            var: API_KEY_VAR.to_string(),
        });
    }

    let log_level = or_default("LEADGEN_LOG_LEVEL", "info");
    let search_plan_path = PathBuf::from(or_default("LEADGEN_SEARCH_PATH", "./config/search.yaml"));
    let output_dir = PathBuf::from(or_default("LEADGEN_OUTPUT_DIR", "."));
    let request_timeout_secs = parse_u64("LEADGEN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("LEADGEN_USER_AGENT", "leadgen/0.1 (lead-discovery)");
    let rate_limit_ms = parse_u64("LEADGEN_RATE_LIMIT_MS", "1000")?;

    let max_results_per_query = match present("LEADGEN_MAX_RESULTS_PER_QUERY") {
        None => None,
        Some(raw) => {
            let cap = raw
                .parse::<usize>()
                .map_err(|e| invalid("LEADGEN_MAX_RESULTS_PER_QUERY", e.to_string()))?;
            if cap == 0 {
                return Err(invalid(
                    "LEADGEN_MAX_RESULTS_PER_QUERY",
                    "must be at least 1".to_string(),
                ));
            }
            Some(cap)
        }
    };

    let dedupe = parse_bool("LEADGEN_DEDUPE", true)?;
    let extract_emails = parse_bool("LEADGEN_EXTRACT_EMAILS", true)?;
    let fetch_failure_policy =
        parse_fetch_failure_policy(&or_default("LEADGEN_FETCH_FAILURE_POLICY", "include"))?;

    let sender = present("SENDER_EMAIL");
    let password = present("SENDER_PASSWORD");
    let recipient = present("RECIPIENT_EMAIL");
    let smtp_host = or_default("SMTP_HOST", "smtp.gmail.com");
    let smtp_port = or_default("SMTP_PORT", "587")
        .parse::<u16>()
        .map_err(|e| invalid("SMTP_PORT", e.to_string()))?;

    let email = match (sender, password, recipient) {
        (Some(sender), Some(password), Some(recipient)) => EmailDelivery::Enabled(EmailConfig {
            sender,
            password,
            recipient,
            smtp_host,
            smtp_port,
        }),
        (sender, password, recipient) => {
            let missing = [
                ("SENDER_EMAIL", sender.is_none()),
                ("SENDER_PASSWORD", password.is_none()),
                ("RECIPIENT_EMAIL", recipient.is_none()),
            ]
            .into_iter()
            .filter(|(_, absent)| *absent)
            .map(|(var, _)| var.to_string())
            .collect();
            EmailDelivery::Disabled { missing }
        }
    };

    Ok(AppConfig {
        places_api_key,
        log_level,
        search_plan_path,
        output_dir,
        request_timeout_secs,
        user_agent,
        rate_limit_ms,
        max_results_per_query,
        dedupe,
        extract_emails,
        fetch_failure_policy,
        email,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_fetch_failure_policy(s: &str) -> Result<FetchFailurePolicy, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "include" => Ok(FetchFailurePolicy::Include),
        "skip" => Ok(FetchFailurePolicy::Skip),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEADGEN_FETCH_FAILURE_POLICY".to_string(),
            reason: format!("expected 'include' or 'skip', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
