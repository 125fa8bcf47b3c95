//! Knowledge-graph source — SerpAPI-style search with knowledge-panel
//! extraction.
//!
//! Issues four sub-queries in parallel (general, industry, products,
//! culture). Structured knowledge-panel fields are preferred; organic
//! result snippets feed the regex extractors when the panel is sparse.
//! Without an API key the source resolves to nothing, with no network I/O.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::models::company::{Culture, ProfileSource};

use super::{extract, fill_scalar, PartialProfile, SourceAdapter, SourceError};

const SEARCH_URL: &str = "https://serpapi.com/search.json";
/// Snippets from this many organic results feed the regex fallback.
const SNIPPET_LIMIT: usize = 5;

pub struct KnowledgeGraphSource {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl KnowledgeGraphSource {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }

    async fn fetch(&self, api_key: &str, query: &str) -> Result<Value, SourceError> {
        let response = self
            .http
            .get(SEARCH_URL)
            .query(&[("engine", "google"), ("q", query), ("api_key", api_key)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl SourceAdapter for KnowledgeGraphSource {
    fn id(&self) -> ProfileSource {
        ProfileSource::KnowledgeGraph
    }

    async fn try_resolve(&self, name: &str) -> Result<Option<PartialProfile>, SourceError> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("knowledge-graph source disabled, no API key");
            return Ok(None);
        };

        let general_query = format!("{name} company");
        let industry_query = format!("{name} company industry");
        let products_query = format!("{name} products and services");
        let culture_query = format!("{name} company culture values");
        let (general, industry, products, culture) = tokio::join!(
            self.fetch(api_key, &general_query),
            self.fetch(api_key, &industry_query),
            self.fetch(api_key, &products_query),
            self.fetch(api_key, &culture_query),
        );

        // the general query is the backbone; auxiliary query failures only
        // reduce richness
        let general = general?;
        let industry = industry.ok();
        let products = products.ok();
        let culture = culture.ok();

        let partial = build_partial(&general, industry.as_ref(), products.as_ref(), culture.as_ref());
        if partial.is_empty() {
            Ok(None)
        } else {
            Ok(Some(partial))
        }
    }
}

fn build_partial(
    general: &Value,
    industry: Option<&Value>,
    products: Option<&Value>,
    culture: Option<&Value>,
) -> PartialProfile {
    let mut partial = PartialProfile::default();

    if let Some(panel) = general.get("knowledge_graph") {
        fill_scalar(&mut partial.name, panel_str(panel, "title"));
        fill_scalar(&mut partial.description, panel_str(panel, "description"));
        fill_scalar(&mut partial.founded, panel_str(panel, "founded"));
        fill_scalar(&mut partial.headquarters, panel_str(panel, "headquarters"));
        fill_scalar(&mut partial.website, panel_str(panel, "website"));
        fill_scalar(&mut partial.revenue, panel_str(panel, "revenue"));
        for key in ["number_of_employees", "employees"] {
            fill_scalar(&mut partial.employee_count, panel_str(panel, key));
        }
        if let Some(industry) = panel_type_as_industry(panel) {
            fill_scalar(&mut partial.industry, &industry);
        }
        for key in ["ceo", "founders"] {
            if let Some(person) = panel.get(key).and_then(Value::as_str) {
                partial.key_people.push(person.to_string());
            }
        }
    }

    let general_snippets = collect_snippets(general);
    fill_scalar(&mut partial.description, &first_snippet(&general_snippets));
    if partial.industry.is_none() {
        if let Some(found) = extract::extract_industry(&general_snippets.join(" ")) {
            fill_scalar(&mut partial.industry, &found);
        }
    }
    if partial.founded.is_none() {
        if let Some(year) = extract::extract_founded_year(&general_snippets.join(" ")) {
            fill_scalar(&mut partial.founded, &year);
        }
    }

    if let Some(industry_response) = industry {
        if partial.industry.is_none() {
            let panel_industry = industry_response
                .get("knowledge_graph")
                .and_then(panel_type_as_industry);
            if let Some(found) = panel_industry {
                fill_scalar(&mut partial.industry, &found);
            } else if let Some(found) =
                extract::extract_industry(&collect_snippets(industry_response).join(" "))
            {
                fill_scalar(&mut partial.industry, &found);
            }
        }
    }

    if let Some(products_response) = products {
        let text = collect_snippets(products_response).join(" ");
        partial.products = extract::extract_products(&text);
        partial.services = extract::extract_services(&text);
    }

    if let Some(culture_response) = culture {
        let text = collect_snippets(culture_response).join(" ");
        let values = extract::extract_values(&text);
        if !values.is_empty() {
            partial.culture = Some(Culture {
                work_life_balance: String::new(),
                learning_opportunities: String::new(),
                team_environment: String::new(),
                values,
            });
        }
    }

    partial
}

fn panel_str<'a>(panel: &'a Value, key: &str) -> &'a str {
    panel.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Knowledge panels carry a "type" like "Technology company"; the trailing
/// noun is dropped to leave the industry phrase.
fn panel_type_as_industry(panel: &Value) -> Option<String> {
    let kind = panel.get("type").and_then(Value::as_str)?;
    let industry = kind
        .trim_end_matches("company")
        .trim_end_matches("corporation")
        .trim();
    if industry.is_empty() || industry.eq_ignore_ascii_case("public") {
        None
    } else {
        Some(industry.to_string())
    }
}

fn collect_snippets(response: &Value) -> Vec<String> {
    response
        .get("organic_results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .take(SNIPPET_LIMIT)
                .filter_map(|r| r.get("snippet").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn first_snippet(snippets: &[String]) -> String {
    snippets.first().cloned().unwrap_or_default()
}
