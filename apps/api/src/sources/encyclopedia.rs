//! Encyclopedia source — Wikipedia-style article extraction.
//!
//! Search for the best article, pull its intro extract and categories,
//! clean the prose (citations, pronunciation guides, corporate suffixes),
//! then derive fields: industry from category titles, the rest via the
//! shared regex extractors over the cleaned text.

use async_trait::async_trait;
use serde_json::Value;

use crate::models::company::ProfileSource;

use super::{extract, fill_scalar, PartialProfile, SourceAdapter, SourceError};

const API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Nationality adjectives are qualifiers, not industries, in category
/// titles like "American technology companies".
const NATIONALITY_QUALIFIERS: &[&str] = &[
    "american", "british", "indian", "german", "french", "japanese", "chinese", "canadian",
    "australian", "dutch", "swedish", "swiss", "korean", "multinational",
];

pub struct EncyclopediaSource {
    http: reqwest::Client,
}

impl EncyclopediaSource {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn search_title(&self, name: &str) -> Result<Option<String>, SourceError> {
        let response: Value = self
            .http
            .get(API_URL)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", &format!("{name} company")),
                ("srlimit", "1"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .get("query")
            .and_then(|q| q.get("search"))
            .and_then(Value::as_array)
            .and_then(|hits| hits.first())
            .and_then(|hit| hit.get("title"))
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn fetch_page(&self, title: &str) -> Result<Value, SourceError> {
        let response: Value = self
            .http
            .get(API_URL)
            .query(&[
                ("action", "query"),
                ("prop", "extracts|categories"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("cllimit", "20"),
                ("titles", title),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl SourceAdapter for EncyclopediaSource {
    fn id(&self) -> ProfileSource {
        ProfileSource::Encyclopedia
    }

    async fn try_resolve(&self, name: &str) -> Result<Option<PartialProfile>, SourceError> {
        let Some(title) = self.search_title(name).await? else {
            return Ok(None);
        };

        let response = self.fetch_page(&title).await?;
        let Some(page) = first_page(&response) else {
            return Err(SourceError::Shape("no pages in query response".to_string()));
        };

        let partial = build_partial(&title, page);
        if partial.is_empty() {
            Ok(None)
        } else {
            Ok(Some(partial))
        }
    }
}

fn first_page(response: &Value) -> Option<&Value> {
    response
        .get("query")?
        .get("pages")?
        .as_object()?
        .values()
        .next()
}

fn build_partial(title: &str, page: &Value) -> PartialProfile {
    let mut partial = PartialProfile::default();
    fill_scalar(&mut partial.name, title);

    let raw_extract = page.get("extract").and_then(Value::as_str).unwrap_or("");
    let cleaned = extract::clean_article_text(raw_extract);

    if !cleaned.is_empty() {
        let (lead, rest) = split_lead(&cleaned);
        fill_scalar(&mut partial.description, &lead);
        partial.extended_description = rest;

        if let Some(year) = extract::extract_founded_year(&cleaned) {
            fill_scalar(&mut partial.founded, &year);
        }
        if let Some(hq) = extract::extract_headquarters(&cleaned) {
            fill_scalar(&mut partial.headquarters, &hq);
        }
        if let Some(count) = extract::extract_employee_count(&cleaned) {
            fill_scalar(&mut partial.employee_count, &count);
        }
        if let Some(url) = extract::extract_website(&cleaned) {
            fill_scalar(&mut partial.website, &url);
        }
    }

    let categories = category_titles(page);
    if let Some(industry) = industry_from_categories(&categories) {
        fill_scalar(&mut partial.industry, &industry);
    }
    if partial.industry.is_none() {
        if let Some(industry) = extract::extract_industry(&cleaned) {
            fill_scalar(&mut partial.industry, &industry);
        }
    }

    partial
}

/// First two sentences become the description; up to three further
/// sentence groups become the extended description.
fn split_lead(text: &str) -> (String, Vec<String>) {
    let sentences: Vec<&str> = text
        .split_inclusive(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        return (String::new(), Vec::new());
    }
    let lead = sentences.iter().take(2).copied().collect::<Vec<_>>().join(" ");
    let rest = sentences
        .iter()
        .skip(2)
        .take(3)
        .map(|s| s.trim().to_string())
        .collect();
    (lead, rest)
}

fn category_titles(page: &Value) -> Vec<String> {
    page.get("categories")
        .and_then(Value::as_array)
        .map(|cats| {
            cats.iter()
                .filter_map(|c| c.get("title").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Derives an industry from category titles ending in " companies",
/// dropping nationality qualifiers: "American technology companies" →
/// "Technology".
pub fn industry_from_categories(titles: &[String]) -> Option<String> {
    for title in titles {
        let title = title.strip_prefix("Category:").unwrap_or(title).trim();
        let Some(phrase) = title.strip_suffix(" companies") else {
            continue;
        };
        let words: Vec<&str> = phrase
            .split_whitespace()
            .filter(|w| !NATIONALITY_QUALIFIERS.contains(&w.to_lowercase().as_str()))
            .collect();
        if words.is_empty() {
            continue;
        }
        let industry = words.join(" ");
        let mut chars = industry.chars();
        return chars
            .next()
            .map(|first| first.to_uppercase().collect::<String>() + chars.as_str());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn etsy_page() -> Value {
        json!({
            "pageid": 1,
            "extract": "Etsy, Inc. is an American e-commerce company focused on handmade items.[1] The company was founded in 2005 and is headquartered in Brooklyn, New York. It had 2,402 employees in 2023. Sellers list goods in categories. Buyers browse the marketplace.",
            "categories": [
                {"title": "Category:Companies listed on the Nasdaq"},
                {"title": "Category:American e-commerce companies"}
            ]
        })
    }

    #[test]
    fn test_build_partial_extracts_all_fields() {
        let partial = build_partial("Etsy", &etsy_page());
        assert_eq!(partial.name.as_deref(), Some("Etsy"));
        assert!(partial
            .description
            .as_deref()
            .unwrap()
            .starts_with("Etsy is an American e-commerce company"));
        assert_eq!(partial.founded.as_deref(), Some("2005"));
        assert_eq!(
            partial.headquarters.as_deref(),
            Some("Brooklyn, New York")
        );
        assert_eq!(partial.employee_count.as_deref(), Some("2,402"));
        assert_eq!(partial.industry.as_deref(), Some("E-commerce"));
        assert!(!partial.extended_description.is_empty());
    }

    #[test]
    fn test_industry_from_categories_drops_qualifiers() {
        let titles = vec![
            "Category:Companies listed on the Nasdaq".to_string(),
            "Category:American technology companies".to_string(),
        ];
        assert_eq!(
            industry_from_categories(&titles).as_deref(),
            Some("Technology")
        );
    }

    #[test]
    fn test_industry_from_categories_ignores_non_suffix_titles() {
        let titles = vec![
            "Category:Companies established in 2005".to_string(),
            "Category:2005 establishments".to_string(),
        ];
        assert_eq!(industry_from_categories(&titles), None);
    }

    #[test]
    fn test_split_lead_groups_sentences() {
        let (lead, rest) = split_lead(
            "One sentence. Two sentence. Three sentence. Four sentence. Five sentence. Six sentence. Seven.",
        );
        assert_eq!(lead, "One sentence. Two sentence.");
        assert_eq!(rest.len(), 3);
        assert_eq!(rest[0], "Three sentence.");
    }

    #[test]
    fn test_empty_page_yields_empty_partial() {
        let page = json!({"pageid": 2});
        let partial = build_partial("", &page);
        assert!(partial.is_empty());
    }
}
