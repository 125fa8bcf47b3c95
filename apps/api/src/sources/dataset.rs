//! Dataset source — tiered fuzzy matching over the bulk company dataset.
//!
//! Match tiers, strongest first: exact normalized name, substring
//! containment in either direction, token overlap. Within a tier the first
//! dataset occurrence wins; there is no scoring among tier peers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::dataset::{CompanyDataset, DatasetRecord, SIZE_RANGE_UNAVAILABLE};
use crate::models::company::{normalize_name, ProfileSource};

use super::{fill_scalar, PartialProfile, SourceAdapter, SourceError};

pub struct DatasetSource {
    dataset: Arc<CompanyDataset>,
}

impl DatasetSource {
    pub fn new(dataset: Arc<CompanyDataset>) -> Self {
        Self { dataset }
    }
}

#[async_trait]
impl SourceAdapter for DatasetSource {
    fn id(&self) -> ProfileSource {
        ProfileSource::Dataset
    }

    async fn try_resolve(&self, name: &str) -> Result<Option<PartialProfile>, SourceError> {
        let records = self.dataset.records().await;
        Ok(find_match(&records, name).map(record_to_partial))
    }
}

pub fn find_match<'a>(records: &'a [DatasetRecord], name: &str) -> Option<&'a DatasetRecord> {
    let query = normalize_name(name);
    if query.is_empty() {
        return None;
    }

    // tier 1: exact normalized match
    if let Some(record) = records.iter().find(|r| r.normalized_name == query) {
        return Some(record);
    }

    // tier 2: substring containment, either direction
    if let Some(record) = records.iter().find(|r| {
        !r.normalized_name.is_empty()
            && (r.normalized_name.contains(&query) || query.contains(&r.normalized_name))
    }) {
        return Some(record);
    }

    // tier 3: token overlap — any query word equals any candidate word
    let query_tokens: Vec<&str> = query.split(' ').filter(|t| t.len() > 2).collect();
    if query_tokens.is_empty() {
        return None;
    }
    records.iter().find(|r| {
        r.normalized_name
            .split(' ')
            .any(|word| query_tokens.contains(&word))
    })
}

fn record_to_partial(record: &DatasetRecord) -> PartialProfile {
    let mut partial = PartialProfile::default();
    fill_scalar(&mut partial.name, &record.name);
    fill_scalar(&mut partial.industry, &record.industry);
    if let Some(year) = record.year_founded {
        fill_scalar(&mut partial.founded, &year.to_string());
    }
    fill_scalar(&mut partial.headquarters, &record.headquarters());
    if record.employees_current > 0 {
        fill_scalar(&mut partial.employee_count, &record.employees_current.to_string());
    } else if record.employees_total > 0 {
        fill_scalar(&mut partial.employee_count, &record.employees_total.to_string());
    } else if record.size_range != SIZE_RANGE_UNAVAILABLE {
        fill_scalar(
            &mut partial.employee_count,
            &format!("{} employees", record.size_range),
        );
    }
    if !record.domain.is_empty() {
        fill_scalar(&mut partial.website, &format!("https://{}", record.domain));
    }
    partial
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, industry: &str) -> DatasetRecord {
        DatasetRecord {
            name: name.to_string(),
            normalized_name: normalize_name(name),
            domain: String::new(),
            year_founded: None,
            industry: industry.to_string(),
            size_range: SIZE_RANGE_UNAVAILABLE.to_string(),
            locality: String::new(),
            country: String::new(),
            employees_current: 0,
            employees_total: 0,
        }
    }

    #[test]
    fn test_exact_tier_beats_substring_tier() {
        let records = vec![record("Infosys BPM", "IT services"), record("Infosys", "IT services")];
        let hit = find_match(&records, "infosys").unwrap();
        assert_eq!(hit.name, "Infosys");
    }

    #[test]
    fn test_substring_tier_matches_either_direction() {
        let records = vec![record("Google", "Internet")];
        assert_eq!(find_match(&records, "Google LLC").unwrap().name, "Google");
        assert_eq!(find_match(&records, "oogl").unwrap().name, "Google");
    }

    #[test]
    fn test_token_overlap_tier_first_occurrence_wins() {
        let records = vec![
            record("Acme Payments Group", "Fintech"),
            record("Nimbus Payments", "Fintech"),
        ];
        // no exact or substring match, shared token "payments"
        let hit = find_match(&records, "Stellar Payments Ltd").unwrap();
        assert_eq!(hit.name, "Acme Payments Group");
    }

    #[test]
    fn test_no_match_returns_none() {
        let records = vec![record("Google", "Internet")];
        assert!(find_match(&records, "Quantumloop").is_none());
        assert!(find_match(&records, "   ").is_none());
        assert!(find_match(&[], "Google").is_none());
    }

    #[test]
    fn test_record_to_partial_maps_fields() {
        let mut r = record("Etsy", "E-commerce");
        r.domain = "etsy.com".to_string();
        r.year_founded = Some(2005);
        r.locality = "Brooklyn".to_string();
        r.country = "United States".to_string();
        r.employees_current = 2400;

        let partial = record_to_partial(&r);
        assert_eq!(partial.name.as_deref(), Some("Etsy"));
        assert_eq!(partial.industry.as_deref(), Some("E-commerce"));
        assert_eq!(partial.founded.as_deref(), Some("2005"));
        assert_eq!(partial.headquarters.as_deref(), Some("Brooklyn, United States"));
        assert_eq!(partial.employee_count.as_deref(), Some("2400"));
        assert_eq!(partial.website.as_deref(), Some("https://etsy.com"));
    }

    #[test]
    fn test_record_to_partial_uses_size_range_when_no_estimate() {
        let mut r = record("Smallco", "Software");
        r.size_range = "11 - 50".to_string();
        let partial = record_to_partial(&r);
        assert_eq!(partial.employee_count.as_deref(), Some("11 - 50 employees"));
    }
}
