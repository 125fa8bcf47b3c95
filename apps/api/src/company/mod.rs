//! Company resolution — the adapter cascade and its orchestration.
//!
//! `CompanyResolver::resolve` drives the sources in fixed priority order:
//! cache → dataset → knowledge graph → linked data → encyclopedia →
//! instant answer → curated → placeholder. Partial results merge as the
//! cascade advances (earlier sources win field-by-field); a merged result
//! with a non-trivial description and a specified industry stops the
//! cascade early. Successful resolutions are written back to the store
//! keyed by the raw requested name.

pub mod handlers;
pub mod merge;
pub mod normalize;
pub mod search;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::dataset::CompanyDataset;
use crate::models::company::{CompanyProfile, ProfileSource, ResolutionOutcome};
use crate::sources::cache::CacheSource;
use crate::sources::curated::CuratedSource;
use crate::sources::dataset::DatasetSource;
use crate::sources::{placeholder, PartialProfile, SourceAdapter};
use crate::store::CompanyStore;

use merge::{is_quality, merge};
use normalize::complete_profile;

/// This many network-class source failures in one resolution marks the
/// whole lookup as connectivity-degraded.
const CONNECTIVITY_DEGRADED_THRESHOLD: u32 = 3;

const NETWORK_ERROR_MESSAGE: &str =
    "Unable to reach external company data sources right now. Showing locally generated information instead.";

pub struct CompanyResolver {
    store: Arc<dyn CompanyStore>,
    cache: CacheSource,
    dataset: DatasetSource,
    external: Vec<Arc<dyn SourceAdapter>>,
    curated: CuratedSource,
}

impl CompanyResolver {
    pub fn new(
        store: Arc<dyn CompanyStore>,
        dataset: Arc<CompanyDataset>,
        external: Vec<Arc<dyn SourceAdapter>>,
    ) -> Self {
        Self {
            cache: CacheSource::new(store.clone()),
            dataset: DatasetSource::new(dataset),
            store,
            external,
            curated: CuratedSource,
        }
    }

    pub async fn resolve(&self, raw_name: &str) -> ResolutionOutcome {
        let requested = raw_name.trim();
        if requested.is_empty() {
            let profile = complete_profile("Unknown", PartialProfile::default(), ProfileSource::Error);
            return ResolutionOutcome::failed(profile, "Company name is required");
        }

        // 1. cache — a hit short-circuits everything else
        match self.cache.lookup(requested).await {
            Ok(Some(profile)) => return ResolutionOutcome::ok(profile),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "cache lookup failed, continuing cascade"),
        }

        let mut network_failures = 0u32;

        // 2. local dataset
        if let Some(partial) = self
            .attempt(&self.dataset, requested, &mut network_failures)
            .await
        {
            let profile = complete_profile(requested, partial, ProfileSource::Dataset);
            self.persist(requested, &profile).await;
            info!(company = %profile.name, "resolved from dataset");
            return ResolutionOutcome::ok(profile);
        }

        // 3. external sources in fixed priority order, folding each partial
        //    into the accumulated fallback
        let mut merged = PartialProfile::default();
        let mut contributors: Vec<ProfileSource> = Vec::new();
        for adapter in &self.external {
            if let Some(partial) = self
                .attempt(adapter.as_ref(), requested, &mut network_failures)
                .await
            {
                if partial.is_empty() {
                    continue;
                }
                merged = merge(merged, partial);
                contributors.push(adapter.id());
                if is_quality(&merged) {
                    break;
                }
            }
        }

        let degraded = network_failures >= CONNECTIVITY_DEGRADED_THRESHOLD;

        if !contributors.is_empty() {
            let source = if contributors.len() == 1 {
                contributors[0]
            } else {
                ProfileSource::CombinedFallback
            };
            let profile = complete_profile(requested, merged, source);
            if degraded {
                return ResolutionOutcome::failed(profile, NETWORK_ERROR_MESSAGE);
            }
            self.persist(requested, &profile).await;
            info!(company = %profile.name, %source, "resolved from external sources");
            return ResolutionOutcome::ok(profile);
        }

        // 4. curated static table
        if let Some(partial) = self
            .attempt(&self.curated, requested, &mut network_failures)
            .await
        {
            let profile = complete_profile(requested, partial, ProfileSource::Curated);
            if degraded {
                return ResolutionOutcome::failed(profile, NETWORK_ERROR_MESSAGE);
            }
            self.persist(requested, &profile).await;
            info!(company = %profile.name, "resolved from curated table");
            return ResolutionOutcome::ok(profile);
        }

        // 5. synthesized placeholder — never cached, so future lookups
        //    retry the real sources
        let profile = complete_profile(
            requested,
            placeholder::synthesize(requested),
            ProfileSource::Placeholder,
        );
        if degraded {
            ResolutionOutcome::failed(profile, NETWORK_ERROR_MESSAGE)
        } else {
            info!(company = %profile.name, "no source had data, synthesized placeholder");
            ResolutionOutcome::ok(profile)
        }
    }

    /// The adapter boundary: no source error escapes this wrapper. Errors
    /// are logged with source identity and elapsed time; connectivity-class
    /// failures are tallied for the degraded check.
    async fn attempt(
        &self,
        adapter: &dyn SourceAdapter,
        name: &str,
        network_failures: &mut u32,
    ) -> Option<PartialProfile> {
        let source = adapter.id();
        let started = Instant::now();
        match adapter.try_resolve(name).await {
            Ok(Some(partial)) => {
                debug!(
                    %source,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "source produced a partial profile"
                );
                Some(partial)
            }
            Ok(None) => {
                debug!(
                    %source,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "source had no match"
                );
                None
            }
            Err(e) => {
                if e.is_connectivity() {
                    *network_failures += 1;
                }
                warn!(
                    %source,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "source lookup failed"
                );
                None
            }
        }
    }

    /// Cache writes are a side effect, not the deliverable — failures are
    /// logged and swallowed.
    async fn persist(&self, requested: &str, profile: &CompanyProfile) {
        if let Err(e) = self.store.upsert(requested, profile).await {
            warn!(company = %profile.name, error = %e, "cache write failed");
        }
    }
}
