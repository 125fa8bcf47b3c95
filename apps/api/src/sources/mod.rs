//! Data-source adapters for the company resolution cascade.
//!
//! Every adapter exposes the same contract: given a raw company name,
//! return a partial profile or nothing. Adapter failures never cross the
//! cascade boundary — the orchestrator's attempt wrapper logs them with
//! source identity and elapsed time and carries on with the next source.

pub mod cache;
pub mod curated;
pub mod dataset;
pub mod encyclopedia;
pub mod extract;
pub mod instant_answer;
pub mod knowledge_graph;
pub mod linked_data;
pub mod placeholder;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::company::{
    is_filled, CareerGrowth, Culture, HiringProcess, InterviewProcess, ProfileSource,
};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection refused, DNS failure, timeout — these count toward the
    /// connectivity-degraded aggregate.
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        // a body that fails to decode is a malformed response, not an outage
        if e.is_decode() {
            SourceError::Shape(e.to_string())
        } else {
            SourceError::Network(e.to_string())
        }
    }
}

impl SourceError {
    /// Network-class failures are counted separately by the orchestrator;
    /// three or more in one resolution flips it into the degraded path.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, SourceError::Network(_))
    }
}

/// A field-by-field fragment of a company profile. Adapters only populate
/// what their source actually knows; sentinels never appear here — an
/// unknown field stays `None` so the merge step can fill it from a later
/// source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialProfile {
    pub name: Option<String>,
    pub description: Option<String>,
    pub extended_description: Vec<String>,
    pub industry: Option<String>,
    pub founded: Option<String>,
    pub headquarters: Option<String>,
    pub employee_count: Option<String>,
    pub revenue: Option<String>,
    pub website: Option<String>,
    pub key_people: Vec<String>,
    pub business_segments: Vec<String>,
    pub technologies: Vec<String>,
    pub products: Vec<String>,
    pub services: Vec<String>,
    pub culture: Option<Culture>,
    pub interview_process: Option<InterviewProcess>,
    pub hiring_process: Option<HiringProcess>,
    pub career_growth: Option<CareerGrowth>,
}

impl PartialProfile {
    pub fn is_empty(&self) -> bool {
        *self == PartialProfile::default()
    }
}

/// Sets `slot` only when it is still empty and `value` is real data (not a
/// sentinel, not blank). Adapters use this so sentinels and low-quality
/// values never displace anything.
pub fn fill_scalar(slot: &mut Option<String>, value: &str) {
    if slot.is_none() && is_filled(value) {
        *slot = Some(value.trim().to_string());
    }
}

/// One resolver in the cascade.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn id(&self) -> ProfileSource;

    async fn try_resolve(&self, name: &str) -> Result<Option<PartialProfile>, SourceError>;
}
