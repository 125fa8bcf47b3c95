//! Heuristic relevance scoring for interview-video candidates.
//!
//! The score is a weighted sum over: company/title matches (phrase beats
//! per-word, title beats description), a tiered interview vocabulary, a
//! channel-name affinity bonus, a promotional-content penalty, and a
//! publish-date recency curve. Scores are ephemeral — they exist only to
//! order one result set.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::video::VideoCandidate;

const COMPANY_TITLE_WEIGHT: f64 = 8.0;
const COMPANY_DESC_WEIGHT: f64 = 4.0;
const COMPANY_WORD_TITLE_WEIGHT: f64 = 2.0;
const COMPANY_WORD_DESC_WEIGHT: f64 = 1.0;
const JOB_TITLE_WEIGHT: f64 = 6.0;
const JOB_DESC_WEIGHT: f64 = 3.0;
const JOB_WORD_TITLE_WEIGHT: f64 = 1.5;
const JOB_WORD_DESC_WEIGHT: f64 = 0.5;
const CHANNEL_AFFINITY_BONUS: f64 = 2.0;
const PROMO_PENALTY: f64 = -4.0;

/// Interview vocabulary tiers: (phrases, title weight, description weight).
const KEYWORD_TIERS: &[(&[&str], f64, f64)] = &[
    (
        &[
            "interview experience",
            "interview questions",
            "interview process",
            "interview preparation",
        ],
        5.0,
        2.5,
    ),
    (
        &[
            "interview tips",
            "hiring process",
            "mock interview",
            "how to prepare",
            "interview rounds",
        ],
        3.0,
        1.5,
    ),
    (&["career", "placement", "salary", "offer", "resume"], 1.0, 0.5),
];

const CHANNEL_AFFINITY_TERMS: &[&str] = &[
    "career", "interview", "coding", "tech", "recruit", "placement", "prep", "mentor",
];

const PROMO_TERMS: &[&str] = &[
    "sponsored",
    "promo code",
    "discount",
    "buy now",
    "limited offer",
    "sale ends",
    "giveaway",
];

pub fn score_candidate(
    candidate: &VideoCandidate,
    company: &str,
    job_title: &str,
    now: DateTime<Utc>,
) -> f64 {
    let title = candidate.title.to_lowercase();
    let description = candidate.description.to_lowercase();
    let mut score = 0.0;

    score += phrase_and_word_score(
        &title,
        &description,
        company,
        COMPANY_TITLE_WEIGHT,
        COMPANY_DESC_WEIGHT,
        COMPANY_WORD_TITLE_WEIGHT,
        COMPANY_WORD_DESC_WEIGHT,
    );
    score += phrase_and_word_score(
        &title,
        &description,
        job_title,
        JOB_TITLE_WEIGHT,
        JOB_DESC_WEIGHT,
        JOB_WORD_TITLE_WEIGHT,
        JOB_WORD_DESC_WEIGHT,
    );

    for (phrases, title_weight, desc_weight) in KEYWORD_TIERS {
        for phrase in *phrases {
            if title.contains(phrase) {
                score += title_weight;
            }
            if description.contains(phrase) {
                score += desc_weight;
            }
        }
    }

    let channel = candidate.channel_title.to_lowercase();
    if CHANNEL_AFFINITY_TERMS.iter().any(|t| channel.contains(t)) {
        score += CHANNEL_AFFINITY_BONUS;
    }

    if PROMO_TERMS
        .iter()
        .any(|t| title.contains(t) || description.contains(t))
    {
        score += PROMO_PENALTY;
    }

    score += recency_score(&candidate.published_at, now);
    score
}

fn phrase_and_word_score(
    title: &str,
    description: &str,
    needle: &str,
    phrase_title_weight: f64,
    phrase_desc_weight: f64,
    word_title_weight: f64,
    word_desc_weight: f64,
) -> f64 {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return 0.0;
    }
    let mut score = 0.0;
    if title.contains(&needle) {
        score += phrase_title_weight;
    }
    if description.contains(&needle) {
        score += phrase_desc_weight;
    }
    for word in needle.split_whitespace().filter(|w| w.len() > 2) {
        if title.contains(word) {
            score += word_title_weight;
        }
        if description.contains(word) {
            score += word_desc_weight;
        }
    }
    score
}

/// Full bonus under a year old, partial between one and three years, a
/// penalty past five.
fn recency_score(published_at: &str, now: DateTime<Utc>) -> f64 {
    let Ok(published) = DateTime::parse_from_rfc3339(published_at) else {
        return 0.0;
    };
    let age_days = (now - published.with_timezone(&Utc)).num_days();
    match age_days {
        d if d < 365 => 3.0,
        d if d < 1095 => 1.5,
        d if d > 1825 => -1.0,
        _ => 0.0,
    }
}

/// Scores, sorts descending, deduplicates by video id (first occurrence
/// after sorting is the highest-scored one), and truncates.
pub fn rank(
    candidates: Vec<VideoCandidate>,
    company: &str,
    job_title: &str,
    max_results: usize,
) -> Vec<VideoCandidate> {
    let now = Utc::now();
    let mut scored: Vec<(f64, VideoCandidate)> = candidates
        .into_iter()
        .map(|c| (score_candidate(&c, company, job_title, now), c))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut seen = HashSet::new();
    scored
        .into_iter()
        .filter_map(|(_, c)| seen.insert(c.video_id.clone()).then_some(c))
        .take(max_results)
        .collect()
}
