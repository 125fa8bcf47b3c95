//! Placeholder generation — deterministic fallbacks synthesized from
//! nothing but the company name.
//!
//! Used in two places: as the last resort of the cascade when every source
//! missed, and by the final normalization pass to backfill single fields
//! that remained empty.

use crate::models::company::normalize_name;

use super::{fill_scalar, PartialProfile};

/// Keyword → industry guesses, checked in order against the normalized
/// name. First hit wins.
const INDUSTRY_KEYWORDS: &[(&[&str], &str)] = &[
    (&["tech", "soft", "data", "digital", "cyber", "cloud", "ai", "labs"], "Technology"),
    (&["bank", "fin", "capital", "pay", "invest", "credit"], "Financial Services"),
    (&["health", "med", "pharma", "bio", "care"], "Healthcare"),
    (&["retail", "shop", "store", "mart", "commerce"], "Retail"),
    (&["consult", "advisory", "partners"], "Consulting"),
    (&["edu", "learn", "school", "academy"], "Education"),
    (&["motor", "auto", "mobility"], "Automotive"),
    (&["food", "restaurant", "kitchen", "brew"], "Food & Beverage"),
    (&["energy", "power", "solar", "petro"], "Energy"),
    (&["media", "studio", "entertainment", "games"], "Media & Entertainment"),
];

/// Guesses an industry from name keywords. `None` when nothing matches —
/// the caller decides between a sentinel and a better source.
pub fn guess_industry(name: &str) -> Option<String> {
    let normalized = normalize_name(name);
    for (keywords, industry) in INDUSTRY_KEYWORDS {
        if keywords.iter().any(|k| normalized.contains(k)) {
            return Some(industry.to_string());
        }
    }
    None
}

/// `https://www.<slug>.com` where the slug is the lowercased alphanumeric
/// name.
pub fn website_guess(name: &str) -> String {
    let slug: String = name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    format!("https://www.{slug}.com")
}

/// Generic templated description for companies no source knows about.
pub fn templated_description(name: &str, industry: Option<&str>) -> String {
    match industry {
        Some(industry) => format!(
            "{name} is a company operating in the {industry} sector. Detailed public information about this company is limited."
        ),
        None => format!(
            "{name} is a company for which detailed public information is limited."
        ),
    }
}

/// Synthesizes a profile fragment entirely from the name. Every other
/// field is backfilled with sentinels by the normalization pass.
pub fn synthesize(name: &str) -> PartialProfile {
    let mut partial = PartialProfile::default();
    fill_scalar(&mut partial.name, name.trim());
    let industry = guess_industry(name);
    if let Some(industry) = &industry {
        fill_scalar(&mut partial.industry, industry);
    }
    fill_scalar(
        &mut partial.description,
        &templated_description(name.trim(), industry.as_deref()),
    );
    fill_scalar(&mut partial.website, &website_guess(name));
    partial
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_industry_keyword_table() {
        assert_eq!(guess_industry("HyperTech Systems").as_deref(), Some("Technology"));
        assert_eq!(guess_industry("First National Bank").as_deref(), Some("Financial Services"));
        assert_eq!(guess_industry("Sunrise Healthcare").as_deref(), Some("Healthcare"));
        assert_eq!(guess_industry("MegaMart").as_deref(), Some("Retail"));
        assert_eq!(guess_industry("Acme"), None);
    }

    #[test]
    fn test_website_guess_slug() {
        assert_eq!(website_guess("Good Company Inc."), "https://www.goodcompanyinc.com");
        assert_eq!(website_guess("Etsy"), "https://www.etsy.com");
    }

    #[test]
    fn test_synthesize_always_has_name_and_description() {
        let partial = synthesize("  Quantumloop  ");
        assert_eq!(partial.name.as_deref(), Some("Quantumloop"));
        assert!(partial.description.as_deref().unwrap().contains("Quantumloop"));
        assert_eq!(partial.website.as_deref(), Some("https://www.quantumloop.com"));
    }

    #[test]
    fn test_synthesize_with_industry_keyword() {
        let partial = synthesize("Brightpay");
        assert_eq!(partial.industry.as_deref(), Some("Financial Services"));
        assert!(partial
            .description
            .as_deref()
            .unwrap()
            .contains("Financial Services sector"));
    }
}
