//! Instant-answer source — DuckDuckGo-style abstract and infobox lookup.
//!
//! Queries `"<name> company"` first and retries with the bare name when no
//! abstract comes back. Structured infobox rows are matched by label; the
//! abstract text feeds the shared regex extractors for anything the infobox
//! missed.

use async_trait::async_trait;
use serde_json::Value;

use crate::models::company::ProfileSource;

use super::{extract, fill_scalar, PartialProfile, SourceAdapter, SourceError};

const API_URL: &str = "https://api.duckduckgo.com/";

pub struct InstantAnswerSource {
    http: reqwest::Client,
}

impl InstantAnswerSource {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn fetch(&self, query: &str) -> Result<Value, SourceError> {
        let response: Value = self
            .http
            .get(API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
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
impl SourceAdapter for InstantAnswerSource {
    fn id(&self) -> ProfileSource {
        ProfileSource::InstantAnswer
    }

    async fn try_resolve(&self, name: &str) -> Result<Option<PartialProfile>, SourceError> {
        let mut response = self.fetch(&format!("{name} company")).await?;
        if abstract_text(&response).is_empty() {
            response = self.fetch(name).await?;
        }

        let partial = build_partial(&response);
        if partial.is_empty() {
            Ok(None)
        } else {
            Ok(Some(partial))
        }
    }
}

fn abstract_text(response: &Value) -> &str {
    response
        .get("AbstractText")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
}

pub fn build_partial(response: &Value) -> PartialProfile {
    let mut partial = PartialProfile::default();

    if let Some(heading) = response.get("Heading").and_then(Value::as_str) {
        fill_scalar(&mut partial.name, heading);
    }

    let text = abstract_text(response);
    fill_scalar(&mut partial.description, text);

    // structured infobox rows first
    for (label, value) in infobox_rows(response) {
        match label.to_lowercase().as_str() {
            "industry" => fill_scalar(&mut partial.industry, &value),
            "founded" => {
                if let Some(year) = extract::extract_year(&value) {
                    fill_scalar(&mut partial.founded, &year);
                } else {
                    fill_scalar(&mut partial.founded, &value);
                }
            }
            "headquarters" => fill_scalar(&mut partial.headquarters, &value),
            "number of employees" | "employees" => {
                fill_scalar(&mut partial.employee_count, &value)
            }
            "revenue" => fill_scalar(&mut partial.revenue, &value),
            "website" | "official website" | "url" => fill_scalar(&mut partial.website, &value),
            "key people" | "founders" | "founder" => {
                partial.key_people.extend(
                    value
                        .split(',')
                        .map(|p| p.trim().to_string())
                        .filter(|p| !p.is_empty()),
                );
            }
            _ => {}
        }
    }

    // regex fallback over the abstract, identical in spirit to the
    // encyclopedia source
    if !text.is_empty() {
        if partial.industry.is_none() {
            if let Some(industry) = extract::extract_industry(text) {
                fill_scalar(&mut partial.industry, &industry);
            }
        }
        if partial.founded.is_none() {
            if let Some(year) = extract::extract_founded_year(text) {
                fill_scalar(&mut partial.founded, &year);
            }
        }
        if partial.headquarters.is_none() {
            if let Some(hq) = extract::extract_headquarters(text) {
                fill_scalar(&mut partial.headquarters, &hq);
            }
        }
        if partial.employee_count.is_none() {
            if let Some(count) = extract::extract_employee_count(text) {
                fill_scalar(&mut partial.employee_count, &count);
            }
        }
    }

    if partial.website.is_none() {
        if let Some(url) = response.get("AbstractURL").and_then(Value::as_str) {
            fill_scalar(&mut partial.website, url);
        }
    }

    partial
}

fn infobox_rows(response: &Value) -> Vec<(String, String)> {
    response
        .get("Infobox")
        .and_then(|i| i.get("content"))
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(|row| {
                    let label = row.get("label")?.as_str()?;
                    let value = row.get("value")?.as_str()?;
                    Some((label.to_string(), value.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infobox_label_lookup() {
        let response = json!({
            "Heading": "Etsy",
            "AbstractText": "Etsy is an American e-commerce company.",
            "AbstractURL": "https://en.wikipedia.org/wiki/Etsy",
            "Infobox": {
                "content": [
                    {"label": "Industry", "value": "E-commerce"},
                    {"label": "Founded", "value": "June 18, 2005"},
                    {"label": "Headquarters", "value": "Brooklyn, New York, U.S."},
                    {"label": "Number of employees", "value": "2,402"},
                    {"label": "Website", "value": "https://www.etsy.com"},
                    {"label": "Key people", "value": "Josh Silverman, Rachel Glaser"}
                ]
            }
        });
        let partial = build_partial(&response);
        assert_eq!(partial.name.as_deref(), Some("Etsy"));
        assert_eq!(partial.industry.as_deref(), Some("E-commerce"));
        assert_eq!(partial.founded.as_deref(), Some("2005"));
        assert_eq!(partial.headquarters.as_deref(), Some("Brooklyn, New York, U.S."));
        assert_eq!(partial.employee_count.as_deref(), Some("2,402"));
        assert_eq!(partial.website.as_deref(), Some("https://www.etsy.com"));
        assert_eq!(partial.key_people, vec!["Josh Silverman", "Rachel Glaser"]);
    }

    #[test]
    fn test_abstract_regex_fallback_without_infobox() {
        let response = json!({
            "Heading": "Acme",
            "AbstractText": "Acme is a German manufacturing company founded in 1955, headquartered in Munich. It has about 3,000 employees."
        });
        let partial = build_partial(&response);
        assert_eq!(partial.industry.as_deref(), Some("Manufacturing"));
        assert_eq!(partial.founded.as_deref(), Some("1955"));
        assert_eq!(partial.headquarters.as_deref(), Some("Munich"));
        assert_eq!(partial.employee_count.as_deref(), Some("3,000"));
    }

    #[test]
    fn test_empty_response_is_empty_partial() {
        assert!(build_partial(&json!({})).is_empty());
        assert!(build_partial(&json!({"AbstractText": ""})).is_empty());
    }
}
