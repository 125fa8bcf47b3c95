//! Persistent company cache.
//!
//! The pipeline reads resolved profiles back through `CompanyStore` before
//! touching any external source, and writes every successful non-cache
//! resolution behind it. Keys are normalized from the raw requested name so
//! casing/spacing variants of the same query hit the cache.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use thiserror::Error;
use tracing::info;

use crate::models::company::{normalize_name, CompanyProfile};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("profile serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Keyed persistent storage for resolved profiles. Upserts are
/// last-write-wins; the data is derived and idempotent to re-produce, so
/// concurrent writers for the same name are allowed to race.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<CompanyProfile>, StoreError>;

    /// Upsert keyed by the raw requested name (normalized internally).
    async fn upsert(&self, requested_name: &str, profile: &CompanyProfile)
        -> Result<(), StoreError>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<CompanyProfile>, StoreError>;

    /// Case-insensitive substring match on display name or industry.
    async fn search(&self, fragment: &str, limit: i64) -> Result<Vec<CompanyProfile>, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct PgCompanyStore {
    pool: PgPool,
}

impl PgCompanyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the backing table when absent. Called once at startup.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS companies (
                name_key     TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                profile      JSONB NOT NULL,
                updated_at   TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        info!("companies table ready");
        Ok(())
    }
}

#[async_trait]
impl CompanyStore for PgCompanyStore {
    async fn get(&self, name: &str) -> Result<Option<CompanyProfile>, StoreError> {
        let key = normalize_name(name);
        let row = sqlx::query("SELECT profile FROM companies WHERE name_key = $1")
            .bind(&key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let value: serde_json::Value = row.try_get("profile")?;
                Ok(Some(serde_json::from_value(value)?))
            }
            None => Ok(None),
        }
    }

    async fn upsert(
        &self,
        requested_name: &str,
        profile: &CompanyProfile,
    ) -> Result<(), StoreError> {
        let key = normalize_name(requested_name);
        let value = serde_json::to_value(profile)?;
        sqlx::query(
            r#"
            INSERT INTO companies (name_key, display_name, profile, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (name_key)
            DO UPDATE SET display_name = EXCLUDED.display_name,
                          profile = EXCLUDED.profile,
                          updated_at = now()
            "#,
        )
        .bind(&key)
        .bind(&profile.name)
        .bind(&value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<CompanyProfile>, StoreError> {
        let rows = sqlx::query(
            "SELECT profile FROM companies ORDER BY display_name LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let value: serde_json::Value = row.try_get("profile")?;
                Ok(serde_json::from_value(value)?)
            })
            .collect()
    }

    async fn search(&self, fragment: &str, limit: i64) -> Result<Vec<CompanyProfile>, StoreError> {
        let pattern = format!("%{}%", fragment);
        let rows = sqlx::query(
            r#"
            SELECT profile FROM companies
            WHERE display_name ILIKE $1 OR profile->>'industry' ILIKE $1
            ORDER BY display_name
            LIMIT $2
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let value: serde_json::Value = row.try_get("profile")?;
                Ok(serde_json::from_value(value)?)
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory implementation (tests and local development without Postgres)
// ────────────────────────────────────────────────────────────────────────────

/// Exercised by unit tests across the crate; also usable for local runs
/// without Postgres.
#[derive(Default)]
#[allow(dead_code)]
pub struct MemoryCompanyStore {
    // insertion order kept separately so listings are stable
    inner: RwLock<(HashMap<String, CompanyProfile>, Vec<String>)>,
}

impl MemoryCompanyStore {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyStore for MemoryCompanyStore {
    async fn get(&self, name: &str) -> Result<Option<CompanyProfile>, StoreError> {
        let key = normalize_name(name);
        let guard = self.inner.read().expect("store lock poisoned");
        Ok(guard.0.get(&key).cloned())
    }

    async fn upsert(
        &self,
        requested_name: &str,
        profile: &CompanyProfile,
    ) -> Result<(), StoreError> {
        let key = normalize_name(requested_name);
        let mut guard = self.inner.write().expect("store lock poisoned");
        if guard.0.insert(key.clone(), profile.clone()).is_none() {
            guard.1.push(key);
        }
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<CompanyProfile>, StoreError> {
        let guard = self.inner.read().expect("store lock poisoned");
        Ok(guard
            .1
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .filter_map(|k| guard.0.get(k).cloned())
            .collect())
    }

    async fn search(&self, fragment: &str, limit: i64) -> Result<Vec<CompanyProfile>, StoreError> {
        let needle = fragment.to_lowercase();
        let guard = self.inner.read().expect("store lock poisoned");
        Ok(guard
            .1
            .iter()
            .filter_map(|k| guard.0.get(k))
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.industry.to_lowercase().contains(&needle)
            })
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::company::{ProfileSource, NOT_SPECIFIED};
    use chrono::Utc;

    fn make_profile(name: &str, industry: &str) -> CompanyProfile {
        CompanyProfile {
            name: name.to_string(),
            description: format!("{name} description"),
            extended_description: vec![],
            industry: industry.to_string(),
            founded: NOT_SPECIFIED.to_string(),
            headquarters: NOT_SPECIFIED.to_string(),
            employee_count: NOT_SPECIFIED.to_string(),
            revenue: NOT_SPECIFIED.to_string(),
            website: format!("https://www.{}.com", name.to_lowercase()),
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

    #[tokio::test]
    async fn test_get_is_case_insensitive() {
        let store = MemoryCompanyStore::new();
        store
            .upsert("Google", &make_profile("Google", "Technology"))
            .await
            .unwrap();

        let hit = store.get("  gOOgle ").await.unwrap();
        assert_eq!(hit.unwrap().name, "Google");
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing_key() {
        let store = MemoryCompanyStore::new();
        store
            .upsert("Acme", &make_profile("Acme", "Technology"))
            .await
            .unwrap();
        store
            .upsert("acme", &make_profile("Acme Corp", "Retail"))
            .await
            .unwrap();

        let hit = store.get("ACME").await.unwrap().unwrap();
        assert_eq!(hit.name, "Acme Corp");
        assert_eq!(store.list(10, 0).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_matches_name_or_industry() {
        let store = MemoryCompanyStore::new();
        store
            .upsert("Google", &make_profile("Google", "Technology"))
            .await
            .unwrap();
        store
            .upsert("Etsy", &make_profile("Etsy", "E-commerce"))
            .await
            .unwrap();

        let by_name = store.search("goo", 10).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Google");

        let by_industry = store.search("commerce", 10).await.unwrap();
        assert_eq!(by_industry.len(), 1);
        assert_eq!(by_industry[0].name, "Etsy");
    }

    #[tokio::test]
    async fn test_list_respects_limit_and_offset() {
        let store = MemoryCompanyStore::new();
        for name in ["A", "B", "C"] {
            store
                .upsert(name, &make_profile(name, "Technology"))
                .await
                .unwrap();
        }
        let page = store.list(2, 1).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "B");
    }
}
