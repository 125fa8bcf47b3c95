//! Curated source — hand-authored profiles for well-known companies.
//!
//! This table is the single home for company special-casing: it serves as
//! the penultimate cascade fallback and supplies exact overrides during
//! final normalization. Matching is by normalized name token, so
//! "Google LLC" and "google" both land on the same entry.

use async_trait::async_trait;

use crate::models::company::{normalize_name, Culture, InterviewProcess, ProfileSource};

use super::{fill_scalar, PartialProfile, SourceAdapter, SourceError};

pub struct CuratedCompany {
    key: &'static str,
    pub name: &'static str,
    description: &'static str,
    industry: &'static str,
    founded: &'static str,
    headquarters: &'static str,
    employee_count: &'static str,
    revenue: &'static str,
    website: &'static str,
    key_people: &'static [&'static str],
    business_segments: &'static [&'static str],
    products: &'static [&'static str],
    services: &'static [&'static str],
    values: &'static [&'static str],
    work_life_balance: &'static str,
    learning_opportunities: &'static str,
    team_environment: &'static str,
    interview_rounds: &'static [&'static str],
    interview_duration: &'static str,
    interview_tips: &'static [&'static str],
    common_questions: &'static [&'static str],
}

static CURATED: &[CuratedCompany] = &[
    CuratedCompany {
        key: "etsy",
        name: "Etsy",
        description: "Etsy is an American e-commerce company operating a global online marketplace for handmade, vintage, and craft-supply goods. It connects millions of independent sellers with buyers looking for unique items.",
        industry: "E-commerce",
        founded: "2005",
        headquarters: "Brooklyn, New York, United States",
        employee_count: "2,400+",
        revenue: "$2.7 billion (2023)",
        website: "https://www.etsy.com",
        key_people: &["Josh Silverman (CEO)"],
        business_segments: &["Marketplace", "Seller services"],
        products: &["Etsy marketplace", "Etsy Payments", "Etsy Ads"],
        services: &["Online marketplace", "Seller tooling", "Payments processing"],
        values: &["Commit to craft", "Minimize waste", "Embrace differences", "Dig deeper", "Lead with optimism"],
        work_life_balance: "Flexible schedules with remote-friendly teams",
        learning_opportunities: "Internal guilds, learning stipends, and mentorship",
        team_environment: "Small product squads with strong craft culture",
        interview_rounds: &[
            "Recruiter screen",
            "Technical phone interview",
            "Virtual onsite: coding, system design, and values interviews",
        ],
        interview_duration: "3-4 weeks",
        interview_tips: &[
            "Be ready to talk about marketplace dynamics",
            "Show empathy for small sellers in product discussions",
        ],
        common_questions: &[
            "Tell us about a time you advocated for a user.",
            "How would you design a search ranking for handmade goods?",
        ],
    },
    CuratedCompany {
        key: "google",
        name: "Google",
        description: "Google is an American multinational technology company specializing in internet-related services and products, including search, advertising, cloud computing, software, and hardware. It is a subsidiary of Alphabet Inc.",
        industry: "Technology",
        founded: "1998",
        headquarters: "Mountain View, California, United States",
        employee_count: "180,000+",
        revenue: "$305 billion (2023)",
        website: "https://www.google.com",
        key_people: &["Sundar Pichai (CEO)"],
        business_segments: &["Search & Ads", "Google Cloud", "YouTube", "Devices"],
        products: &["Google Search", "Android", "Chrome", "Gmail", "Google Maps"],
        services: &["Online advertising", "Cloud computing", "Productivity tools"],
        values: &["Focus on the user", "Freedom to innovate", "Data-driven decisions"],
        work_life_balance: "Generally good, varies by team",
        learning_opportunities: "Extensive internal courses and 20% project tradition",
        team_environment: "Collaborative, research-friendly engineering culture",
        interview_rounds: &[
            "Recruiter screen",
            "Phone screen with coding",
            "Onsite: 4-5 rounds of coding, system design, and behavioral (Googleyness)",
        ],
        interview_duration: "4-8 weeks",
        interview_tips: &[
            "Practice algorithm questions on a whiteboard or doc, not an IDE",
            "Structure system design answers around requirements and trade-offs",
        ],
        common_questions: &[
            "Design a URL shortener.",
            "Given a stream of data, find the top K frequent elements.",
        ],
    },
    CuratedCompany {
        key: "microsoft",
        name: "Microsoft",
        description: "Microsoft is an American multinational technology corporation producing software, cloud services, devices, and gaming platforms. Its flagship offerings include Windows, Office, Azure, and Xbox.",
        industry: "Technology",
        founded: "1975",
        headquarters: "Redmond, Washington, United States",
        employee_count: "220,000+",
        revenue: "$211 billion (FY2023)",
        website: "https://www.microsoft.com",
        key_people: &["Satya Nadella (Chairman & CEO)"],
        business_segments: &["Productivity and Business Processes", "Intelligent Cloud", "More Personal Computing"],
        products: &["Windows", "Office 365", "Azure", "Xbox", "Surface"],
        services: &["Cloud computing", "Enterprise software", "Gaming services"],
        values: &["Growth mindset", "Customer obsession", "Diversity and inclusion", "One Microsoft"],
        work_life_balance: "Strong emphasis on flexibility and hybrid work",
        learning_opportunities: "LinkedIn Learning access and internal academies",
        team_environment: "Large product orgs with autonomous feature crews",
        interview_rounds: &[
            "Recruiter screen",
            "Online assessment or phone screen",
            "Virtual loop: 4 rounds of coding, design, and behavioral",
            "As-appropriate (AA) interview with a senior leader",
        ],
        interview_duration: "3-6 weeks",
        interview_tips: &[
            "Expect questions framed around the growth mindset",
            "Be explicit about trade-offs in design rounds",
        ],
        common_questions: &[
            "Reverse a linked list in place.",
            "Describe a time you learned from a failure.",
        ],
    },
    CuratedCompany {
        key: "infosys",
        name: "Infosys",
        description: "Infosys is an Indian multinational information technology company providing business consulting, information technology, and outsourcing services. It is one of the largest IT services exporters in India.",
        industry: "IT Services & Consulting",
        founded: "1981",
        headquarters: "Bengaluru, Karnataka, India",
        employee_count: "320,000+",
        revenue: "$18.2 billion (FY2023)",
        website: "https://www.infosys.com",
        key_people: &["Salil Parekh (CEO)", "Nandan Nilekani (Chairman)"],
        business_segments: &["Digital services", "Core IT services", "Products and platforms"],
        products: &["Finacle", "Infosys Nia", "EdgeVerve"],
        services: &["Application development", "Cloud migration", "Business process management", "Consulting"],
        values: &["Client value", "Leadership by example", "Integrity and transparency", "Fairness", "Excellence"],
        work_life_balance: "Structured hours with project-based variation",
        learning_opportunities: "Mysore training campus and Lex learning platform",
        team_environment: "Large delivery teams with defined career ladders",
        interview_rounds: &[
            "Online aptitude and technical test",
            "Technical interview",
            "HR interview",
        ],
        interview_duration: "2-4 weeks",
        interview_tips: &[
            "Brush up on programming fundamentals and SQL",
            "Prepare to discuss training and relocation flexibility",
        ],
        common_questions: &[
            "Explain the difference between an abstract class and an interface.",
            "Write a query to find the second-highest salary.",
        ],
    },
    CuratedCompany {
        key: "amazon",
        name: "Amazon",
        description: "Amazon is an American multinational technology company focused on e-commerce, cloud computing, online advertising, digital streaming, and artificial intelligence. Amazon Web Services is the world's largest cloud provider.",
        industry: "E-commerce & Cloud Computing",
        founded: "1994",
        headquarters: "Seattle, Washington, United States",
        employee_count: "1,500,000+",
        revenue: "$574 billion (2023)",
        website: "https://www.amazon.com",
        key_people: &["Andy Jassy (CEO)", "Jeff Bezos (Executive Chairman)"],
        business_segments: &["North America retail", "International retail", "Amazon Web Services", "Advertising"],
        products: &["Amazon.com", "Kindle", "Echo", "Prime Video"],
        services: &["Online retail", "Cloud computing (AWS)", "Logistics", "Streaming"],
        values: &["Customer obsession", "Ownership", "Invent and simplify", "Bias for action", "Frugality"],
        work_life_balance: "Demanding pace, varies widely by org",
        learning_opportunities: "Career Choice program and heavy internal mobility",
        team_environment: "Two-pizza teams with single-threaded owners",
        interview_rounds: &[
            "Online assessment",
            "Phone screen",
            "Virtual loop: 4-5 rounds including the Bar Raiser",
        ],
        interview_duration: "3-6 weeks",
        interview_tips: &[
            "Prepare STAR stories for every leadership principle",
            "Quantify impact in every behavioral answer",
        ],
        common_questions: &[
            "Tell me about a time you disagreed with your manager.",
            "Design the checkout flow for a high-traffic sale day.",
        ],
    },
];

/// Token match against the curated table: the query must equal the entry
/// key or contain it as a whole word.
pub fn find(name: &str) -> Option<&'static CuratedCompany> {
    let query = normalize_name(name);
    if query.is_empty() {
        return None;
    }
    CURATED
        .iter()
        .find(|c| query == c.key || query.split(' ').any(|token| token == c.key))
}

pub fn to_partial(company: &CuratedCompany) -> PartialProfile {
    let mut partial = PartialProfile::default();
    fill_scalar(&mut partial.name, company.name);
    fill_scalar(&mut partial.description, company.description);
    fill_scalar(&mut partial.industry, company.industry);
    fill_scalar(&mut partial.founded, company.founded);
    fill_scalar(&mut partial.headquarters, company.headquarters);
    fill_scalar(&mut partial.employee_count, company.employee_count);
    fill_scalar(&mut partial.revenue, company.revenue);
    fill_scalar(&mut partial.website, company.website);
    partial.key_people = to_strings(company.key_people);
    partial.business_segments = to_strings(company.business_segments);
    partial.products = to_strings(company.products);
    partial.services = to_strings(company.services);
    partial.culture = Some(Culture {
        work_life_balance: company.work_life_balance.to_string(),
        learning_opportunities: company.learning_opportunities.to_string(),
        team_environment: company.team_environment.to_string(),
        values: to_strings(company.values),
    });
    partial.interview_process = Some(InterviewProcess {
        rounds: to_strings(company.interview_rounds),
        typical_duration: company.interview_duration.to_string(),
        tips: to_strings(company.interview_tips),
        common_questions: to_strings(company.common_questions),
    });
    partial
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub struct CuratedSource;

#[async_trait]
impl SourceAdapter for CuratedSource {
    fn id(&self) -> ProfileSource {
        ProfileSource::Curated
    }

    async fn try_resolve(&self, name: &str) -> Result<Option<PartialProfile>, SourceError> {
        Ok(find(name).map(to_partial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_matches_exact_and_tokenized() {
        assert_eq!(find("Etsy").unwrap().name, "Etsy");
        assert_eq!(find("  google LLC ").unwrap().name, "Google");
        assert_eq!(find("Infosys BPM").unwrap().name, "Infosys");
        assert!(find("Quantumloop").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_find_does_not_match_partial_tokens() {
        // "googler" is not the "google" token
        assert!(find("Googler Consulting").is_none());
    }

    #[test]
    fn test_etsy_entry_content() {
        let partial = to_partial(find("etsy").unwrap());
        assert!(partial.industry.as_deref().unwrap().contains("E-commerce"));
        assert!(partial.founded.as_deref().unwrap().contains("2005"));
        let culture = partial.culture.unwrap();
        assert!(!culture.values.is_empty());
        let interview = partial.interview_process.unwrap();
        assert!(!interview.rounds.is_empty());
    }

    #[test]
    fn test_every_entry_is_complete() {
        for company in CURATED {
            let partial = to_partial(company);
            assert!(partial.description.as_deref().unwrap().len() > 80, "{}", company.name);
            assert!(partial.industry.is_some(), "{}", company.name);
            assert!(partial.founded.is_some(), "{}", company.name);
            assert!(!partial.culture.as_ref().unwrap().values.is_empty(), "{}", company.name);
        }
    }
}
