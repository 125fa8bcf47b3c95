// All LLM prompt constants for the Jobs module.

/// System prompt for job-description extraction — enforces JSON-only output.
pub const JOB_EXTRACT_SYSTEM: &str =
    "You are an expert job description analyst helping candidates prepare for placements. \
    Extract structured information from a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Extraction prompt template. Replace `{job_description}` before sending.
pub const JOB_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract structured details from the following job description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "job_title": "Software Engineer II",
  "company": "Acme Corp",
  "location": "Austin, TX (Hybrid)",
  "experience_required": "3-5 years",
  "skills": ["Java", "Spring Boot", "SQL"],
  "responsibilities": ["Build and maintain backend services"],
  "qualifications": ["Bachelor's degree in CS or equivalent"],
  "salary_range": "$120,000 - $150,000",
  "job_type": "Full-time",
  "summary": "One or two sentences summarizing the role."
}

Rules:
- Use the string "Not specified" for any scalar field the description does not state. Never invent values.
- "company" must be the employer's name only, with no suffix like "Inc." or "Ltd.".
- "skills" lists concrete technologies and competencies, most important first.
- Keep "summary" under 60 words.

Job description:
{job_description}
"#;
