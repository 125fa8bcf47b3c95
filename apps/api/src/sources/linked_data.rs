//! Linked-data source — Wikidata-style entity lookup.
//!
//! Flow: label search → entity claims fetch → typed claim extraction via a
//! property-ID table → one follow-up request resolving entity-valued claims
//! (industry, headquarters) to their English labels. Date claims are
//! truncated to a four-digit year.

use async_trait::async_trait;
use serde_json::Value;

use crate::models::company::ProfileSource;

use super::{fill_scalar, PartialProfile, SourceAdapter, SourceError};

const API_URL: &str = "https://www.wikidata.org/w/api.php";

const P_INDUSTRY: &str = "P452";
const P_INCEPTION: &str = "P571";
const P_HEADQUARTERS: &str = "P159";
const P_EMPLOYEES: &str = "P1128";
const P_WEBSITE: &str = "P856";

pub struct LinkedDataSource {
    http: reqwest::Client,
}

impl LinkedDataSource {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn search_entity_id(&self, name: &str) -> Result<Option<String>, SourceError> {
        let response: Value = self
            .http
            .get(API_URL)
            .query(&[
                ("action", "wbsearchentities"),
                ("search", name),
                ("language", "en"),
                ("type", "item"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .get("search")
            .and_then(Value::as_array)
            .and_then(|hits| hits.first())
            .and_then(|hit| hit.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn fetch_entities(&self, ids: &str, props: &str) -> Result<Value, SourceError> {
        let response: Value = self
            .http
            .get(API_URL)
            .query(&[
                ("action", "wbgetentities"),
                ("ids", ids),
                ("props", props),
                ("languages", "en"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }

    /// Resolves entity ids to English labels. Failures here drop the
    /// affected fields instead of failing the whole source.
    async fn resolve_labels(&self, ids: &[String]) -> Vec<Option<String>> {
        if ids.is_empty() {
            return Vec::new();
        }
        let joined = ids.join("|");
        match self.fetch_entities(&joined, "labels").await {
            Ok(response) => ids
                .iter()
                .map(|id| entity_label(&response, id))
                .collect(),
            Err(_) => ids.iter().map(|_| None).collect(),
        }
    }
}

#[async_trait]
impl SourceAdapter for LinkedDataSource {
    fn id(&self) -> ProfileSource {
        ProfileSource::LinkedData
    }

    async fn try_resolve(&self, name: &str) -> Result<Option<PartialProfile>, SourceError> {
        let Some(entity_id) = self.search_entity_id(name).await? else {
            return Ok(None);
        };

        let response = self
            .fetch_entities(&entity_id, "claims|descriptions|labels")
            .await?;
        let Some(entity) = response.get("entities").and_then(|e| e.get(&entity_id)) else {
            return Err(SourceError::Shape(format!(
                "entity {entity_id} missing from wbgetentities response"
            )));
        };

        let claims = extract_claims(entity);
        let labels = self
            .resolve_labels(
                &[claims.industry_id.clone(), claims.headquarters_id.clone()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>(),
            )
            .await;

        let mut partial = claims.partial;
        let mut labels = labels.into_iter();
        if claims.industry_id.is_some() {
            if let Some(Some(industry)) = labels.next() {
                fill_scalar(&mut partial.industry, &industry);
            }
        }
        if claims.headquarters_id.is_some() {
            if let Some(Some(hq)) = labels.next() {
                fill_scalar(&mut partial.headquarters, &hq);
            }
        }

        if partial.is_empty() {
            Ok(None)
        } else {
            Ok(Some(partial))
        }
    }
}

pub struct ExtractedClaims {
    pub partial: PartialProfile,
    pub industry_id: Option<String>,
    pub headquarters_id: Option<String>,
}

/// Pulls the supported claims out of a wbgetentities entity object.
pub fn extract_claims(entity: &Value) -> ExtractedClaims {
    let mut partial = PartialProfile::default();

    if let Some(label) = entity_field(entity, "labels") {
        fill_scalar(&mut partial.name, &label);
    }
    if let Some(description) = entity_field(entity, "descriptions") {
        fill_scalar(&mut partial.description, &description);
    }

    if let Some(year) = claim_time_year(entity, P_INCEPTION) {
        fill_scalar(&mut partial.founded, &year);
    }
    if let Some(amount) = claim_quantity(entity, P_EMPLOYEES) {
        fill_scalar(&mut partial.employee_count, &amount);
    }
    if let Some(url) = claim_string(entity, P_WEBSITE) {
        fill_scalar(&mut partial.website, &url);
    }

    ExtractedClaims {
        partial,
        industry_id: claim_entity_id(entity, P_INDUSTRY),
        headquarters_id: claim_entity_id(entity, P_HEADQUARTERS),
    }
}

fn entity_field(entity: &Value, field: &str) -> Option<String> {
    entity
        .get(field)?
        .get("en")?
        .get("value")?
        .as_str()
        .map(str::to_string)
}

fn entity_label(response: &Value, id: &str) -> Option<String> {
    response
        .get("entities")?
        .get(id)
        .and_then(|entity| entity_field(entity, "labels"))
}

fn first_claim_value<'a>(entity: &'a Value, property: &str) -> Option<&'a Value> {
    entity
        .get("claims")?
        .get(property)?
        .as_array()?
        .first()?
        .get("mainsnak")?
        .get("datavalue")?
        .get("value")
}

fn claim_string(entity: &Value, property: &str) -> Option<String> {
    first_claim_value(entity, property)?.as_str().map(str::to_string)
}

fn claim_entity_id(entity: &Value, property: &str) -> Option<String> {
    first_claim_value(entity, property)?
        .get("id")?
        .as_str()
        .map(str::to_string)
}

/// Wikidata times look like "+2005-06-18T00:00:00Z"; only the year is kept.
fn claim_time_year(entity: &Value, property: &str) -> Option<String> {
    let time = first_claim_value(entity, property)?
        .get("time")?
        .as_str()?;
    let year: String = time
        .trim_start_matches(['+', '-'])
        .chars()
        .take(4)
        .collect();
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Some(year)
    } else {
        None
    }
}

fn claim_quantity(entity: &Value, property: &str) -> Option<String> {
    let amount = first_claim_value(entity, property)?
        .get("amount")?
        .as_str()?;
    Some(amount.trim_start_matches('+').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn etsy_entity() -> Value {
        json!({
            "labels": {"en": {"language": "en", "value": "Etsy"}},
            "descriptions": {"en": {"language": "en", "value": "American e-commerce company"}},
            "claims": {
                "P571": [{"mainsnak": {"datavalue": {"value": {"time": "+2005-06-18T00:00:00Z", "precision": 11}}}}],
                "P1128": [{"mainsnak": {"datavalue": {"value": {"amount": "+2402", "unit": "1"}}}}],
                "P856": [{"mainsnak": {"datavalue": {"value": "https://www.etsy.com"}}}],
                "P452": [{"mainsnak": {"datavalue": {"value": {"id": "Q484847"}}}}],
                "P159": [{"mainsnak": {"datavalue": {"value": {"id": "Q18419"}}}}]
            }
        })
    }

    #[test]
    fn test_extract_claims_maps_property_table() {
        let claims = extract_claims(&etsy_entity());
        assert_eq!(claims.partial.name.as_deref(), Some("Etsy"));
        assert_eq!(
            claims.partial.description.as_deref(),
            Some("American e-commerce company")
        );
        assert_eq!(claims.partial.founded.as_deref(), Some("2005"));
        assert_eq!(claims.partial.employee_count.as_deref(), Some("2402"));
        assert_eq!(claims.partial.website.as_deref(), Some("https://www.etsy.com"));
        assert_eq!(claims.industry_id.as_deref(), Some("Q484847"));
        assert_eq!(claims.headquarters_id.as_deref(), Some("Q18419"));
    }

    #[test]
    fn test_date_claims_truncate_to_year() {
        let entity = json!({
            "claims": {
                "P571": [{"mainsnak": {"datavalue": {"value": {"time": "+1998-09-04T00:00:00Z"}}}}]
            }
        });
        assert_eq!(claim_time_year(&entity, P_INCEPTION).as_deref(), Some("1998"));
    }

    #[test]
    fn test_malformed_time_is_dropped() {
        let entity = json!({
            "claims": {
                "P571": [{"mainsnak": {"datavalue": {"value": {"time": "+9-01-01"}}}}]
            }
        });
        assert_eq!(claim_time_year(&entity, P_INCEPTION), None);
    }

    #[test]
    fn test_empty_entity_yields_empty_partial() {
        let claims = extract_claims(&json!({}));
        assert!(claims.partial.is_empty());
        assert!(claims.industry_id.is_none());
        assert!(claims.headquarters_id.is_none());
    }

    #[test]
    fn test_entity_label_lookup() {
        let response = json!({
            "entities": {
                "Q484847": {"labels": {"en": {"value": "e-commerce"}}}
            }
        });
        assert_eq!(entity_label(&response, "Q484847").as_deref(), Some("e-commerce"));
        assert_eq!(entity_label(&response, "Q1"), None);
    }
}
