//! Canonical company-profile model returned by the resolution pipeline.
//!
//! Scalar fields are never empty once a profile leaves the pipeline: each
//! carries either real data or one of the explicit sentinels below. The
//! final normalization pass enforces this before any profile reaches a
//! caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel for a scalar field no source could fill.
pub const NOT_SPECIFIED: &str = "Not specified";
/// Sentinel for a field a source reported but could not qualify.
pub const UNKNOWN: &str = "Unknown";

/// Returns true when `value` carries real data rather than a sentinel.
pub fn is_filled(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && v != NOT_SPECIFIED && v != UNKNOWN
}

/// Canonical name normalization used by every fuzzy matcher and by the
/// store key: lowercase, punctuation stripped, whitespace collapsed.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Provenance of a resolved profile. Doubles as the identity of the source
/// adapter that produced a partial result, for logging and merge tagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    Cache,
    Dataset,
    KnowledgeGraph,
    LinkedData,
    Encyclopedia,
    InstantAnswer,
    Curated,
    CombinedFallback,
    Placeholder,
    Error,
}

impl std::fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProfileSource::Cache => "cache",
            ProfileSource::Dataset => "dataset",
            ProfileSource::KnowledgeGraph => "knowledge_graph",
            ProfileSource::LinkedData => "linked_data",
            ProfileSource::Encyclopedia => "encyclopedia",
            ProfileSource::InstantAnswer => "instant_answer",
            ProfileSource::Curated => "curated",
            ProfileSource::CombinedFallback => "combined_fallback",
            ProfileSource::Placeholder => "placeholder",
            ProfileSource::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Culture {
    pub work_life_balance: String,
    pub learning_opportunities: String,
    pub team_environment: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewProcess {
    pub rounds: Vec<String>,
    pub typical_duration: String,
    pub tips: Vec<String>,
    pub common_questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiringProcess {
    pub steps: Vec<String>,
    pub typical_timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerGrowth {
    pub paths: Vec<String>,
    pub promotion_cycle: String,
    pub learning_support: String,
}

/// The resolved company record. Field order matches the public JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub extended_description: Vec<String>,
    pub industry: String,
    pub founded: String,
    pub headquarters: String,
    pub employee_count: String,
    pub revenue: String,
    pub website: String,
    #[serde(default)]
    pub key_people: Vec<String>,
    #[serde(default)]
    pub business_segments: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culture: Option<Culture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_process: Option<InterviewProcess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hiring_process: Option<HiringProcess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_growth: Option<CareerGrowth>,
    pub source: ProfileSource,
    pub last_updated: DateTime<Utc>,
}

impl CompanyProfile {
    /// Listing/autocomplete projection. Callers outside the resolution
    /// pipeline never see full profiles through the listing endpoints.
    pub fn to_search_result(&self) -> SearchResult {
        SearchResult {
            name: self.name.clone(),
            industry: self.industry.clone(),
            headquarters: self.headquarters.clone(),
        }
    }
}

/// Projection of a profile used by listing and autocomplete endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub name: String,
    pub industry: String,
    pub headquarters: String,
}

/// Tagged outcome of a resolution. `success = false` still carries a
/// best-effort profile so callers always have renderable content.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionOutcome {
    pub success: bool,
    pub profile: CompanyProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolutionOutcome {
    pub fn ok(profile: CompanyProfile) -> Self {
        Self {
            success: true,
            profile,
            error: None,
        }
    }

    pub fn failed(profile: CompanyProfile, error: impl Into<String>) -> Self {
        Self {
            success: false,
            profile,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_filled_rejects_sentinels() {
        assert!(!is_filled(NOT_SPECIFIED));
        assert!(!is_filled(UNKNOWN));
        assert!(!is_filled(""));
        assert!(!is_filled("   "));
    }

    #[test]
    fn test_is_filled_accepts_real_data() {
        assert!(is_filled("E-commerce"));
        assert!(is_filled("2005"));
    }

    #[test]
    fn test_normalize_name_strips_punctuation_and_case() {
        assert_eq!(normalize_name("  Infosys,  Ltd. "), "infosys ltd");
        assert_eq!(normalize_name("J.P. Morgan"), "j p morgan");
        assert_eq!(normalize_name("GOOGLE"), "google");
    }

    #[test]
    fn test_normalize_name_collapses_whitespace() {
        assert_eq!(normalize_name("Good   Company\tInc"), "good company inc");
    }

    #[test]
    fn test_source_serializes_snake_case() {
        let json = serde_json::to_string(&ProfileSource::KnowledgeGraph).unwrap();
        assert_eq!(json, r#""knowledge_graph""#);
        let json = serde_json::to_string(&ProfileSource::CombinedFallback).unwrap();
        assert_eq!(json, r#""combined_fallback""#);
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = CompanyProfile {
            name: "Acme".to_string(),
            description: "A company".to_string(),
            extended_description: vec![],
            industry: "Technology".to_string(),
            founded: NOT_SPECIFIED.to_string(),
            headquarters: NOT_SPECIFIED.to_string(),
            employee_count: NOT_SPECIFIED.to_string(),
            revenue: NOT_SPECIFIED.to_string(),
            website: "https://www.acme.com".to_string(),
            key_people: vec![],
            business_segments: vec![],
            technologies: vec![],
            products: vec![],
            services: vec![],
            culture: None,
            interview_process: None,
            hiring_process: None,
            career_growth: None,
            source: ProfileSource::Placeholder,
            last_updated: Utc::now(),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("employeeCount").is_some());
        assert!(value.get("lastUpdated").is_some());
        assert!(value.get("employee_count").is_none());
        // absent substructures are omitted, not null
        assert!(value.get("culture").is_none());
    }

    #[test]
    fn test_search_result_projection_has_three_fields() {
        let result = SearchResult {
            name: "Google".to_string(),
            industry: "Technology".to_string(),
            headquarters: "Mountain View, California".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("name"));
        assert!(obj.contains_key("industry"));
        assert!(obj.contains_key("headquarters"));
    }
}
