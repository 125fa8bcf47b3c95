//! Regex-based field extraction from free prose.
//!
//! The encyclopedia, instant-answer, and knowledge-graph sources all fall
//! back to scraping fields out of abstract/snippet text. These are pure
//! functions; a failed extraction is `None`, never an error.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static CITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]{0,40}\]").unwrap());
static PRONUNCIATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((?:[^()]*(?:/[^()/]*/|pronounced|listen|IPA)[^()]*)\)").unwrap()
});
// the trailing delimiter is captured and restored because the regex crate
// has no lookahead
static CORPORATE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:,\s*)?\b(?:Inc|Ltd|LLC|Corp|PLC|GmbH|S\.A)\.?(\s|,|\)|\.|$)").unwrap()
});

static INDUSTRY_IS_A: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bis (?:an?|the)(?: [A-Za-z-]+)? (?:multinational |global |leading )?([A-Za-z][A-Za-z /&-]{2,40}?) (?:company|corporation|firm|conglomerate|retailer|provider)\b",
    )
    .unwrap()
});
static INDUSTRY_OPERATES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\boperates in the ([A-Za-z][A-Za-z /&-]{2,40}?) (?:industry|sector|space)\b")
        .unwrap()
});
static INDUSTRY_SPECIALIZES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bspecial(?:izes|ises) in ([A-Za-z][A-Za-z /&,-]{2,60}?)(?:[.;]|$)").unwrap()
});

static FOUNDED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:founded|established|incorporated|formed)\b[^.]{0,40}?\bin (\d{4})\b")
        .unwrap()
});
static HEADQUARTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bheadquarter(?:s|ed)\b(?: is| are)?(?: located)? (?:in|at) ([A-Z][\w .,'-]{2,60}?)(?:[.;]| and | with |$)",
    )
    .unwrap()
});
static EMPLOYEES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:approximately |about |around |over |more than |nearly )?(\d[\d,]{0,14}\+?)\s+(?:employees|staff members|workers)\b",
    )
    .unwrap()
});
static WEBSITE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s()\[\]<>"']+"#).unwrap());

static PRODUCTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:products|offerings) (?:include|includes|such as) ([^.;]{3,200})").unwrap()
});
static SERVICES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bservices (?:include|includes|such as) ([^.;]{3,200})").unwrap()
});
static VALUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bvalues (?:include|are|such as) ([^.;]{3,200})").unwrap()
});

/// Strips citation markers, pronunciation guides, trademark symbols, and
/// corporate-suffix noise from an article lead paragraph.
pub fn clean_article_text(text: &str) -> String {
    let text = CITATION.replace_all(text, "");
    let text = PRONUNCIATION.replace_all(&text, "");
    let text = CORPORATE_SUFFIX.replace_all(&text, "$1");
    let text = text.replace(['®', '™', '©'], "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn extract_industry(text: &str) -> Option<String> {
    for pattern in [&*INDUSTRY_IS_A, &*INDUSTRY_OPERATES, &*INDUSTRY_SPECIALIZES] {
        if let Some(caps) = pattern.captures(text) {
            let phrase = caps.get(1)?.as_str().trim();
            if !phrase.is_empty() {
                return Some(capitalize_first(phrase));
            }
        }
    }
    None
}

/// Four-digit founding year within [1800, current year].
pub fn extract_founded_year(text: &str) -> Option<String> {
    let caps = FOUNDED.captures(text)?;
    valid_year(caps.get(1)?.as_str())
}

/// First standalone four-digit year in `text`, range-validated. Used on
/// infobox values like "June 18, 2005" where no founding verb is present.
pub fn extract_year(text: &str) -> Option<String> {
    static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})\b").unwrap());
    let caps = YEAR.captures(text)?;
    valid_year(caps.get(1)?.as_str())
}

fn valid_year(raw: &str) -> Option<String> {
    let year: i32 = raw.parse().ok()?;
    if (1800..=Utc::now().year()).contains(&year) {
        Some(year.to_string())
    } else {
        None
    }
}

pub fn extract_headquarters(text: &str) -> Option<String> {
    let caps = HEADQUARTERS.captures(text)?;
    let place = caps
        .get(1)?
        .as_str()
        .trim()
        .trim_end_matches([',', '.'])
        .trim();
    if place.is_empty() {
        None
    } else {
        Some(place.to_string())
    }
}

pub fn extract_employee_count(text: &str) -> Option<String> {
    let caps = EMPLOYEES.captures(text)?;
    Some(caps.get(1)?.as_str().to_string())
}

pub fn extract_website(text: &str) -> Option<String> {
    let url = WEBSITE.find(text)?.as_str();
    Some(url.trim_end_matches(['.', ',', ')']).to_string())
}

pub fn extract_products(text: &str) -> Vec<String> {
    PRODUCTS
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| split_list(m.as_str()))
        .unwrap_or_default()
}

pub fn extract_services(text: &str) -> Vec<String> {
    SERVICES
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| split_list(m.as_str()))
        .unwrap_or_default()
}

pub fn extract_values(text: &str) -> Vec<String> {
    VALUES
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| split_list(m.as_str()))
        .unwrap_or_default()
}

/// Splits a prose enumeration ("A, B, and C") into trimmed items, capped
/// so one runaway sentence cannot flood a profile list.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .flat_map(|part| part.split(" and "))
        .map(|item| item.trim().trim_end_matches('.').to_string())
        .filter(|item| !item.is_empty() && item.len() < 60)
        .take(8)
        .collect()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
