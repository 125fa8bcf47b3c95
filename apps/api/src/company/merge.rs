//! Ordered merge of partial profiles.
//!
//! The cascade folds each new source result into the accumulated fallback
//! with `merge(earlier, later)`: a field set by an earlier (higher
//! priority) source is never displaced, and a later source only fills what
//! is still empty. Simple last-writer-wins would let a weaker late source
//! clobber a better early one.

use crate::sources::PartialProfile;

/// Minimum description length for a merged result to short-circuit the
/// rest of the cascade.
pub const QUALITY_DESCRIPTION_LEN: usize = 80;

/// Fills the gaps of `base` from `lower`. `base` always wins where both
/// carry data; lists and substructures transfer only when `base`'s are
/// empty.
pub fn merge(base: PartialProfile, lower: PartialProfile) -> PartialProfile {
    PartialProfile {
        name: base.name.or(lower.name),
        description: base.description.or(lower.description),
        extended_description: pick_list(base.extended_description, lower.extended_description),
        industry: base.industry.or(lower.industry),
        founded: base.founded.or(lower.founded),
        headquarters: base.headquarters.or(lower.headquarters),
        employee_count: base.employee_count.or(lower.employee_count),
        revenue: base.revenue.or(lower.revenue),
        website: base.website.or(lower.website),
        key_people: pick_list(base.key_people, lower.key_people),
        business_segments: pick_list(base.business_segments, lower.business_segments),
        technologies: pick_list(base.technologies, lower.technologies),
        products: pick_list(base.products, lower.products),
        services: pick_list(base.services, lower.services),
        culture: base.culture.or(lower.culture),
        interview_process: base.interview_process.or(lower.interview_process),
        hiring_process: base.hiring_process.or(lower.hiring_process),
        career_growth: base.career_growth.or(lower.career_growth),
    }
}

fn pick_list(base: Vec<String>, lower: Vec<String>) -> Vec<String> {
    if base.is_empty() {
        lower
    } else {
        base
    }
}

/// A merged result is good enough to stop the cascade when it carries a
/// non-trivial description and a specified industry.
pub fn is_quality(partial: &PartialProfile) -> bool {
    partial
        .description
        .as_deref()
        .is_some_and(|d| d.len() > QUALITY_DESCRIPTION_LEN)
        && partial.industry.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earlier_non_empty_field_is_never_clobbered() {
        let earlier = PartialProfile {
            industry: Some("Tech".to_string()),
            founded: None,
            ..Default::default()
        };
        let later = PartialProfile {
            industry: None,
            founded: Some("1999".to_string()),
            ..Default::default()
        };
        let merged = merge(earlier, later);
        assert_eq!(merged.industry.as_deref(), Some("Tech"));
        assert_eq!(merged.founded.as_deref(), Some("1999"));
    }

    #[test]
    fn test_later_source_fills_empty_lists_only() {
        let earlier = PartialProfile {
            products: vec!["Widgets".to_string()],
            ..Default::default()
        };
        let later = PartialProfile {
            products: vec!["Gears".to_string()],
            services: vec!["Repairs".to_string()],
            ..Default::default()
        };
        let merged = merge(earlier, later);
        assert_eq!(merged.products, vec!["Widgets"]);
        assert_eq!(merged.services, vec!["Repairs"]);
    }

    #[test]
    fn test_merge_is_left_biased_for_substructures() {
        use crate::models::company::Culture;
        let earlier = PartialProfile {
            culture: Some(Culture {
                work_life_balance: "Good".to_string(),
                learning_opportunities: String::new(),
                team_environment: String::new(),
                values: vec!["Craft".to_string()],
            }),
            ..Default::default()
        };
        let later = PartialProfile {
            culture: Some(Culture {
                work_life_balance: "Poor".to_string(),
                learning_opportunities: String::new(),
                team_environment: String::new(),
                values: vec!["Speed".to_string()],
            }),
            ..Default::default()
        };
        let merged = merge(earlier, later);
        assert_eq!(merged.culture.unwrap().values, vec!["Craft"]);
    }

    #[test]
    fn test_quality_requires_description_and_industry() {
        let long_description = "x".repeat(QUALITY_DESCRIPTION_LEN + 1);
        let both = PartialProfile {
            description: Some(long_description.clone()),
            industry: Some("Tech".to_string()),
            ..Default::default()
        };
        assert!(is_quality(&both));

        let short_description = PartialProfile {
            description: Some("short".to_string()),
            industry: Some("Tech".to_string()),
            ..Default::default()
        };
        assert!(!is_quality(&short_description));

        let no_industry = PartialProfile {
            description: Some(long_description),
            industry: None,
            ..Default::default()
        };
        assert!(!is_quality(&no_industry));
    }
}
