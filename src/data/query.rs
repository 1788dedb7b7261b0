use thiserror::Error;

use super::model::{GradeScale, Roster, Student};

// ---------------------------------------------------------------------------
// Query errors: rejected user input, never a crash
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("search term cannot be empty")]
    EmptySearchTerm,

    #[error("a minimum average is required")]
    MissingThreshold,

    #[error("'{0}' is not a number")]
    InvalidThreshold(String),

    #[error("minimum average {value} is outside {min}..={max}")]
    ThresholdOutOfRange { value: f64, min: f64, max: f64 },
}

// ---------------------------------------------------------------------------
// Search by name
// ---------------------------------------------------------------------------

/// Return the students whose name contains `query`, ignoring case.
///
/// Both sides are upper-cased, so `strauß` also matches `STRAUSS`. The query
/// is trimmed first; a blank query is rejected. Matches keep roster order.
pub fn search_by_name<'a>(roster: &'a Roster, query: &str) -> Result<Vec<&'a Student>, QueryError> {
    let needle = query.trim().to_uppercase();
    if needle.is_empty() {
        return Err(QueryError::EmptySearchTerm);
    }

    Ok(roster
        .iter()
        .filter(|student| student.name.to_uppercase().contains(&needle))
        .collect())
}

// ---------------------------------------------------------------------------
// Filter by minimum average
// ---------------------------------------------------------------------------

/// Parse a user-supplied threshold and check it against `scale`.
pub fn parse_threshold(input: &str, scale: &GradeScale) -> Result<f64, QueryError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QueryError::MissingThreshold);
    }

    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| QueryError::InvalidThreshold(trimmed.to_string()))?;

    check_threshold(value, scale)
}

fn check_threshold(value: f64, scale: &GradeScale) -> Result<f64, QueryError> {
    if !scale.contains(value) {
        return Err(QueryError::ThresholdOutOfRange {
            value,
            min: scale.min,
            max: scale.max,
        });
    }
    Ok(value)
}

/// Return the students whose average is strictly greater than `threshold`.
///
/// A student sitting exactly on the threshold is excluded. Thresholds
/// outside `scale` are rejected before anything is computed.
pub fn filter_by_min_average<'a>(
    roster: &'a Roster,
    threshold: f64,
    scale: &GradeScale,
) -> Result<Vec<&'a Student>, QueryError> {
    let threshold = check_threshold(threshold, scale)?;

    Ok(roster
        .iter()
        .filter(|student| student.average() > threshold)
        .collect())
}
