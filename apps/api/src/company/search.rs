//! Search and listing over cached companies plus the bulk dataset.
//!
//! Matching is plain case-insensitive substring containment on name or
//! industry, no ranking: cached companies come back in store order, then
//! dataset rows in file order, deduplicated by normalized name and capped.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use crate::dataset::CompanyDataset;
use crate::models::company::{normalize_name, SearchResult};
use crate::store::CompanyStore;

/// Queries shorter than this are rejected at the API boundary.
pub const MIN_QUERY_LEN: usize = 2;
/// Below-threshold queries internally yield this many entries for UI
/// focus suggestions.
const FOCUS_SUGGESTION_LIMIT: i64 = 5;
const SEARCH_LIMIT: usize = 10;
pub const DEFAULT_LIST_LIMIT: i64 = 20;

pub struct SearchService {
    store: Arc<dyn CompanyStore>,
    dataset: Arc<CompanyDataset>,
}

impl SearchService {
    pub fn new(store: Arc<dyn CompanyStore>, dataset: Arc<CompanyDataset>) -> Self {
        Self { store, dataset }
    }

    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.len() < MIN_QUERY_LEN {
            return self.list(FOCUS_SUGGESTION_LIMIT, 0).await;
        }

        let needle = query.to_lowercase();
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        match self.store.search(query, SEARCH_LIMIT as i64).await {
            Ok(profiles) => {
                for profile in profiles {
                    if seen.insert(normalize_name(&profile.name)) {
                        results.push(profile.to_search_result());
                    }
                }
            }
            Err(e) => warn!(error = %e, "store search failed, falling back to dataset only"),
        }

        for record in self.dataset.records().await.iter() {
            if results.len() >= SEARCH_LIMIT {
                break;
            }
            let matches = record.name.to_lowercase().contains(&needle)
                || record.industry.to_lowercase().contains(&needle);
            if matches && seen.insert(record.normalized_name.clone()) {
                results.push(SearchResult {
                    name: record.name.clone(),
                    industry: record.industry.clone(),
                    headquarters: record.headquarters(),
                });
            }
        }

        results.truncate(SEARCH_LIMIT);
        results
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Vec<SearchResult> {
        let limit = limit.clamp(1, 100);
        let offset = offset.max(0);

        let mut seen = HashSet::new();
        let mut results = Vec::new();

        match self.store.list(limit, offset).await {
            Ok(profiles) => {
                for profile in profiles {
                    if seen.insert(normalize_name(&profile.name)) {
                        results.push(profile.to_search_result());
                    }
                }
            }
            Err(e) => warn!(error = %e, "store list failed, falling back to dataset only"),
        }

        for record in self.dataset.records().await.iter() {
            if results.len() >= limit as usize {
                break;
            }
            if seen.insert(record.normalized_name.clone()) {
                results.push(SearchResult {
                    name: record.name.clone(),
                    industry: record.industry.clone(),
                    headquarters: record.headquarters(),
                });
            }
        }

        results.truncate(limit as usize);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetRecord;
    use crate::models::company::{CompanyProfile, ProfileSource, NOT_SPECIFIED};
    use crate::store::MemoryCompanyStore;
    use chrono::Utc;

    fn record(name: &str, industry: &str) -> DatasetRecord {
        DatasetRecord {
            name: name.to_string(),
            normalized_name: normalize_name(name),
            domain: String::new(),
            year_founded: None,
            industry: industry.to_string(),
            size_range: "Information not available".to_string(),
            locality: "Springfield".to_string(),
            country: "United States".to_string(),
            employees_current: 0,
            employees_total: 0,
        }
    }

    fn profile(name: &str, industry: &str) -> CompanyProfile {
        CompanyProfile {
            name: name.to_string(),
            description: "d".to_string(),
            extended_description: vec![],
            industry: industry.to_string(),
            founded: NOT_SPECIFIED.to_string(),
            headquarters: NOT_SPECIFIED.to_string(),
            employee_count: NOT_SPECIFIED.to_string(),
            revenue: NOT_SPECIFIED.to_string(),
            website: "https://example.com".to_string(),
            key_people: vec![],
            business_segments: vec![],
            technologies: vec![],
            products: vec![],
            services: vec![],
            culture: None,
            interview_process: None,
            hiring_process: None,
            career_growth: None,
            source: ProfileSource::Dataset,
            last_updated: Utc::now(),
        }
    }

    fn service(records: Vec<DatasetRecord>) -> (SearchService, Arc<MemoryCompanyStore>) {
        let store = Arc::new(MemoryCompanyStore::new());
        let service = SearchService::new(
            store.clone(),
            Arc::new(CompanyDataset::from_records(records)),
        );
        (service, store)
    }

    #[tokio::test]
    async fn test_substring_match_on_name_returns_projections() {
        let (service, _) = service(vec![
            record("Google", "Internet"),
            record("Good Company Inc", "Consulting"),
            record("Etsy", "E-commerce"),
        ]);

        let results = service.search("Goo").await;
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Google", "Good Company Inc"]);
        assert_eq!(results[0].headquarters, "Springfield, United States");
    }

    #[tokio::test]
    async fn test_match_on_industry() {
        let (service, _) = service(vec![
            record("Etsy", "E-commerce"),
            record("Bolt", "Logistics"),
        ]);
        let results = service.search("commerce").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Etsy");
    }

    #[tokio::test]
    async fn test_cached_companies_come_before_dataset_and_dedupe() {
        let (service, store) = service(vec![record("Google", "Internet")]);
        store
            .upsert("google", &profile("Google", "Technology"))
            .await
            .unwrap();

        let results = service.search("goog").await;
        // the cached profile wins; the dataset row for the same company is
        // suppressed by the dedupe
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].industry, "Technology");
    }

    #[tokio::test]
    async fn test_short_query_returns_focus_suggestions() {
        let (service, _) = service(
            (0..10)
                .map(|i| record(&format!("Company {i}"), "Tech"))
                .collect(),
        );
        let results = service.search("a").await;
        assert_eq!(results.len(), 5);
    }

    #[tokio::test]
    async fn test_list_caps_and_offsets() {
        let (service, _) = service(
            (0..30)
                .map(|i| record(&format!("Company {i}"), "Tech"))
                .collect(),
        );
        let results = service.list(DEFAULT_LIST_LIMIT, 0).await;
        assert_eq!(results.len(), 20);
    }
}
