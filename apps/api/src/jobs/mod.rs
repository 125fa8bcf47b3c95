//! Job-description analysis — LLM extraction of structured job details.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::company::NOT_SPECIFIED;
use prompts::{JOB_EXTRACT_PROMPT_TEMPLATE, JOB_EXTRACT_SYSTEM};

fn not_specified() -> String {
    NOT_SPECIFIED.to_string()
}

/// Structured output of job-description extraction. Scalar fields default
/// to the sentinel when the model omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetails {
    #[serde(default = "not_specified")]
    pub job_title: String,
    #[serde(default = "not_specified")]
    pub company: String,
    #[serde(default = "not_specified")]
    pub location: String,
    #[serde(default = "not_specified")]
    pub experience_required: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default = "not_specified")]
    pub salary_range: String,
    #[serde(default = "not_specified")]
    pub job_type: String,
    #[serde(default = "not_specified")]
    pub summary: String,
}

impl JobDetails {
    /// Blank strings from the model collapse to the sentinel so callers
    /// never see empty scalars.
    fn normalized(mut self) -> Self {
        for field in [
            &mut self.job_title,
            &mut self.company,
            &mut self.location,
            &mut self.experience_required,
            &mut self.salary_range,
            &mut self.job_type,
            &mut self.summary,
        ] {
            if field.trim().is_empty() {
                *field = NOT_SPECIFIED.to_string();
            }
        }
        self
    }
}

/// Extracts structured job details from a raw description via the LLM.
pub async fn extract_job_details(
    job_description: &str,
    llm: &LlmClient,
) -> Result<JobDetails, AppError> {
    let prompt = JOB_EXTRACT_PROMPT_TEMPLATE.replace("{job_description}", job_description);
    let details: JobDetails = llm
        .call_json(&prompt, JOB_EXTRACT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Job extraction failed: {e}")))?;
    Ok(details.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_extraction_deserializes() {
        let json = r#"{
            "job_title": "Senior Rust Engineer",
            "company": "Acme",
            "location": "Remote",
            "experience_required": "5+ years",
            "skills": ["Rust", "PostgreSQL"],
            "responsibilities": ["Own backend services"],
            "qualifications": ["BS in CS"],
            "salary_range": "$160k - $190k",
            "job_type": "Full-time",
            "summary": "Backend role on the core platform team."
        }"#;
        let details: JobDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.company, "Acme");
        assert_eq!(details.skills, vec!["Rust", "PostgreSQL"]);
    }

    #[test]
    fn test_missing_fields_default_to_sentinel() {
        let details: JobDetails = serde_json::from_str(r#"{"job_title": "Engineer"}"#).unwrap();
        assert_eq!(details.company, NOT_SPECIFIED);
        assert_eq!(details.salary_range, NOT_SPECIFIED);
        assert!(details.skills.is_empty());
    }

    #[test]
    fn test_blank_strings_collapse_to_sentinel() {
        let details: JobDetails =
            serde_json::from_str(r#"{"job_title": "Engineer", "company": "  "}"#).unwrap();
        let details = details.normalized();
        assert_eq!(details.company, NOT_SPECIFIED);
        assert_eq!(details.job_title, "Engineer");
    }

    #[test]
    fn test_prompt_template_has_placeholder() {
        assert!(JOB_EXTRACT_PROMPT_TEMPLATE.contains("{job_description}"));
    }
}
