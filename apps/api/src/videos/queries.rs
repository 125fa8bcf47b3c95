//! Query-variant generation for interview-video search.
//!
//! Variants are ordered most specific first; the engine fetches only the
//! leading three to bound API quota. A generic fallback is always last so
//! a sparse company/title still produces something searchable.

pub const GENERIC_FALLBACK_QUERY: &str = "job interview preparation tips and common questions";

pub fn build_query_variants(company: &str, job_title: &str) -> Vec<String> {
    let company = company.trim();
    let job_title = job_title.trim();

    let mut variants = match (company.is_empty(), job_title.is_empty()) {
        (false, false) => vec![
            format!("{company} {job_title} interview questions and answers"),
            format!("{company} {job_title} interview experience process tips"),
            format!("how to prepare for {job_title} interview at {company}"),
        ],
        (false, true) => vec![
            format!("{company} interview questions and answers"),
            format!("{company} interview experience process tips"),
            format!("how to prepare for an interview at {company}"),
        ],
        (true, false) => vec![
            format!("{job_title} interview questions and answers"),
            format!("{job_title} interview experience and tips"),
            format!("how to prepare for a {job_title} interview"),
        ],
        (true, true) => Vec::new(),
    };

    variants.push(GENERIC_FALLBACK_QUERY.to_string());
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_present_most_specific_first() {
        let variants = build_query_variants("Google", "Software Engineer");
        assert_eq!(
            variants[0],
            "Google Software Engineer interview questions and answers"
        );
        assert!(variants[1].contains("interview experience"));
        assert_eq!(
            variants[2],
            "how to prepare for Software Engineer interview at Google"
        );
        assert_eq!(variants.last().unwrap(), GENERIC_FALLBACK_QUERY);
        assert_eq!(variants.len(), 4);
    }

    #[test]
    fn test_company_only_degrades_gracefully() {
        let variants = build_query_variants("Etsy", "  ");
        assert!(variants[0].starts_with("Etsy"));
        assert!(variants.iter().all(|v| !v.contains("  ")));
        assert_eq!(variants.last().unwrap(), GENERIC_FALLBACK_QUERY);
    }

    #[test]
    fn test_title_only_degrades_gracefully() {
        let variants = build_query_variants("", "Data Analyst");
        assert!(variants[0].starts_with("Data Analyst"));
        assert_eq!(variants.last().unwrap(), GENERIC_FALLBACK_QUERY);
    }

    #[test]
    fn test_both_empty_yields_only_generic() {
        let variants = build_query_variants(" ", "");
        assert_eq!(variants, vec![GENERIC_FALLBACK_QUERY.to_string()]);
    }
}
