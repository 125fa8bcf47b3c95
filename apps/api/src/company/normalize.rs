//! Final normalization — turns an accumulated partial into a complete
//! `CompanyProfile`.
//!
//! Runs after every resolution path. Invariant on exit: no scalar field is
//! empty — each carries either real data or an explicit sentinel. Gap
//! filling order: curated exact overrides first, then the deterministic
//! generators (industry keyword table, website slug guess, templated
//! description), then sentinels.

use chrono::Utc;

use crate::models::company::{
    CompanyProfile, ProfileSource, NOT_SPECIFIED,
};
use crate::sources::{curated, placeholder, PartialProfile};

use super::merge::merge;

/// Fallback culture values used when a source produced a culture block
/// without any named values (the `values` list must never be empty).
const DEFAULT_CULTURE_VALUES: &[&str] = &["Integrity", "Collaboration", "Customer focus"];

pub fn complete_profile(
    requested_name: &str,
    partial: PartialProfile,
    source: ProfileSource,
) -> CompanyProfile {
    // curated overrides outrank generated fallbacks, never real source data
    let partial = match curated::find(requested_name) {
        Some(entry) => merge(partial, curated::to_partial(entry)),
        None => partial,
    };

    let name = partial
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| display_name(requested_name));

    let industry = partial
        .industry
        .or_else(|| placeholder::guess_industry(&name))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let description = partial.description.unwrap_or_else(|| {
        let guessed = if industry == NOT_SPECIFIED {
            None
        } else {
            Some(industry.as_str())
        };
        placeholder::templated_description(&name, guessed)
    });

    let website = partial
        .website
        .unwrap_or_else(|| placeholder::website_guess(&name));

    let mut culture = partial.culture;
    if let Some(culture) = culture.as_mut() {
        backfill(&mut culture.work_life_balance);
        backfill(&mut culture.learning_opportunities);
        backfill(&mut culture.team_environment);
        if culture.values.is_empty() {
            culture.values = DEFAULT_CULTURE_VALUES.iter().map(|v| v.to_string()).collect();
        }
    }

    let mut interview_process = partial.interview_process;
    if let Some(interview) = interview_process.as_mut() {
        backfill(&mut interview.typical_duration);
    }

    let mut hiring_process = partial.hiring_process;
    if let Some(hiring) = hiring_process.as_mut() {
        backfill(&mut hiring.typical_timeline);
    }

    let mut career_growth = partial.career_growth;
    if let Some(growth) = career_growth.as_mut() {
        backfill(&mut growth.promotion_cycle);
        backfill(&mut growth.learning_support);
    }

    CompanyProfile {
        name,
        description,
        extended_description: partial.extended_description,
        industry,
        founded: sentinel_or(partial.founded),
        headquarters: sentinel_or(partial.headquarters),
        employee_count: sentinel_or(partial.employee_count),
        revenue: sentinel_or(partial.revenue),
        website,
        key_people: partial.key_people,
        business_segments: partial.business_segments,
        technologies: partial.technologies,
        products: partial.products,
        services: partial.services,
        culture,
        interview_process,
        hiring_process,
        career_growth,
        source,
        last_updated: Utc::now(),
    }
}

fn sentinel_or(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn backfill(field: &mut String) {
    if field.trim().is_empty() {
        *field = NOT_SPECIFIED.to_string();
    }
}

/// Title-cases a raw query for display: "good company" → "Good Company".
pub fn display_name(requested: &str) -> String {
    requested
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
