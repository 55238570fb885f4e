use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Ordered business queries and locations whose cross product is searched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchPlan {
    pub queries: Vec<String>,
    pub locations: Vec<String>,
}

impl SearchPlan {
    /// Number of (location, query) searches a run will issue.
    #[must_use]
    pub fn total_searches(&self) -> usize {
        self.queries.len() * self.locations.len()
    }

    /// Service businesses in smaller central-Florida cities, where listings
    /// without a website are most common.
    #[must_use]
    pub fn builtin() -> Self {
        let queries = [
            "mobile barber",
            "barber shop",
            "hair salon",
            "beauty salon",
            "lawn care",
            "landscaping",
            "tree service",
            "handyman",
            "junk removal",
            "pressure washing",
            "mobile car wash",
            "auto detailing",
            "mobile pet grooming",
            "pet grooming",
            "house cleaning",
            "carpet cleaning",
        ];
        let locations = [
            "Apopka FL",
            "Sanford FL",
            "Ocoee FL",
            "Clermont FL",
            "Davenport FL",
            "Haines City FL",
            "Poinciana FL",
            "St Cloud FL",
            "Deltona FL",
            "DeLand FL",
            "Lake Mary FL",
            "Longwood FL",
            "Casselberry FL",
            "Winter Springs FL",
            "Oviedo FL",
        ];
        Self {
            queries: queries.iter().map(ToString::to_string).collect(),
            locations: locations.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Load and validate a search plan from a YAML file.
///
/// Entries are trimmed before validation.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_search_plan(path: &Path) -> Result<SearchPlan, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SearchPlanIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_search_plan(&content)
}

fn parse_search_plan(content: &str) -> Result<SearchPlan, ConfigError> {
    let raw: SearchPlan = serde_yaml::from_str(content)?;

    let plan = SearchPlan {
        queries: trim_all(raw.queries),
        locations: trim_all(raw.locations),
    };

    validate_entries("queries", &plan.queries)?;
    validate_entries("locations", &plan.locations)?;

    Ok(plan)
}

fn trim_all(entries: Vec<String>) -> Vec<String> {
    entries.into_iter().map(|e| e.trim().to_string()).collect()
}

fn validate_entries(field: &str, entries: &[String]) -> Result<(), ConfigError> {
    if entries.is_empty() {
        return Err(ConfigError::Validation(format!(
            "'{field}' must list at least one entry"
        )));
    }

    let mut seen = HashSet::new();
    for entry in entries {
        if entry.is_empty() {
            return Err(ConfigError::Validation(format!(
                "'{field}' contains an empty entry"
            )));
        }
        if !seen.insert(entry.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate entry in '{field}': '{entry}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_trims_plan() {
        let plan = parse_search_plan(
            "queries:\n  - ' bakery '\n  - florist\nlocations:\n  - Springfield\n",
        )
        .expect("plan should parse");
        assert_eq!(plan.queries, vec!["bakery", "florist"]);
        assert_eq!(plan.locations, vec!["Springfield"]);
        assert_eq!(plan.total_searches(), 2);
    }

    #[test]
    fn rejects_empty_query_list() {
        let err = parse_search_plan("queries: []\nlocations: [Springfield]\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("queries")),
            "got: {err}"
        );
    }

    #[test]
    fn rejects_blank_location() {
        let err = parse_search_plan("queries: [bakery]\nlocations: ['  ']\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("empty entry")),
            "got: {err}"
        );
    }

    #[test]
    fn rejects_case_insensitive_duplicates() {
        let err =
            parse_search_plan("queries: [Bakery, bakery]\nlocations: [Springfield]\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")),
            "got: {err}"
        );
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = parse_search_plan("queries: [bakery\n").unwrap_err();
        assert!(matches!(err, ConfigError::SearchPlanParse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_search_plan(Path::new("./does/not/exist.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::SearchPlanIo { .. }));
    }

    #[test]
    fn builtin_plan_is_valid() {
        let plan = SearchPlan::builtin();
        validate_entries("queries", &plan.queries).unwrap();
        validate_entries("locations", &plan.locations).unwrap();
        assert_eq!(plan.total_searches(), 16 * 15);
    }
}
