//! Cache source — case-insensitive lookup against the persistent store.
//!
//! Unlike the other sources this one yields a full profile, not a partial:
//! anything in the store already went through normalization before being
//! written. A hit short-circuits the entire cascade.

use std::sync::Arc;

use tracing::debug;

use crate::models::company::{CompanyProfile, ProfileSource};
use crate::store::CompanyStore;

use super::SourceError;

pub struct CacheSource {
    store: Arc<dyn CompanyStore>,
}

impl CacheSource {
    pub fn new(store: Arc<dyn CompanyStore>) -> Self {
        Self { store }
    }

    pub async fn lookup(&self, name: &str) -> Result<Option<CompanyProfile>, SourceError> {
        match self.store.get(name).await? {
            Some(mut profile) => {
                debug!(company = %profile.name, "cache hit");
                profile.source = ProfileSource::Cache;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }
}
