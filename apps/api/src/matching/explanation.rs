//! Score Explanation Engine — four-factor explainable breakdown of a match.
//!
//! Score distribution (out of 100):
//! - Skills: 50
//! - Experience: 20
//! - Department: 10
//! - Description: 20
//!
//! Every sub-score is a pure function of its inputs; persistence lookups live
//! in `matching::service`. Wire keys are fixed camelCase — recruiter UI
//! consumers depend on them.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::extractor::extract_skills;
use crate::matching::ontology::SkillOntology;

/// Closed vocabulary of department/domain keywords, matched as lowercase
/// substrings. Static configuration, same pattern as the skill ontology.
pub const DEPARTMENTS: [&str; 16] = [
    "engineering",
    "software",
    "development",
    "frontend",
    "backend",
    "fullstack",
    "data",
    "analytics",
    "marketing",
    "sales",
    "hr",
    "finance",
    "operations",
    "design",
    "product",
    "devops",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsBreakdown {
    pub score: u32,
    pub max: u32,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub match_percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceBreakdown {
    pub score: u32,
    pub max: u32,
    pub candidate_experience: String,
    pub required_experience: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentBreakdown {
    pub score: u32,
    pub max: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_departments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_departments: Option<Vec<String>>,
    pub status: String,
    pub matched: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionBreakdown {
    pub score: u32,
    pub max: u32,
    pub keyword_matches: u32,
    pub total_keywords: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_percentage: Option<u32>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: SkillsBreakdown,
    pub experience: ExperienceBreakdown,
    pub department: DepartmentBreakdown,
    pub description: DescriptionBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreExplanation {
    pub total_score: u32,
    pub breakdown: ScoreBreakdown,
    pub explanation: String,
}

/// Everything the engine needs about one (job, application, resume) triple.
/// The caller resolves records; missing resume fields fall back to the
/// application's stored copy.
#[derive(Debug)]
pub struct ExplanationInputs<'a> {
    pub matched_skills: &'a [String],
    pub missing_skills: &'a [String],
    pub required_skill_count: usize,
    /// Résumé text stored on the application; drives experience parsing.
    pub application_resume_text: &'a str,
    /// Candidate text used for department keyword matching.
    pub department_text: &'a str,
    /// Candidate's extracted canonical skills.
    pub candidate_skills: &'a [String],
    pub job_experience: &'a str,
    pub job_description: &'a str,
}

/// Computes the full four-factor explanation.
pub fn compose(ontology: &SkillOntology, inputs: &ExplanationInputs) -> ScoreExplanation {
    let skills = skills_breakdown(
        inputs.matched_skills,
        inputs.missing_skills,
        inputs.required_skill_count,
    );
    let experience = experience_breakdown(inputs.application_resume_text, inputs.job_experience);
    let department = department_breakdown(inputs.department_text, inputs.job_description);
    let description =
        description_breakdown(ontology, inputs.candidate_skills, inputs.job_description);

    let total_score = skills.score + experience.score + department.score + description.score;
    let explanation = build_narrative(total_score, &skills, &experience, &department, &description);

    ScoreExplanation {
        total_score,
        breakdown: ScoreBreakdown {
            skills,
            experience,
            department,
            description,
        },
        explanation,
    }
}

/// Skills factor (max 50): fraction of required skills matched, reusing the
/// matched/missing lists already stored on the application.
pub fn skills_breakdown(
    matched: &[String],
    missing: &[String],
    required_count: usize,
) -> SkillsBreakdown {
    let match_fraction = if required_count > 0 {
        matched.len() as f64 / required_count as f64
    } else {
        0.0
    };

    SkillsBreakdown {
        score: (match_fraction * 50.0).round() as u32,
        max: 50,
        matched: matched.to_vec(),
        missing: missing.to_vec(),
        match_percentage: (match_fraction * 100.0).round() as u32,
    }
}

fn years_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*\+?\s*(years?|yrs?)").expect("years pattern is valid")
    })
}

fn first_integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("integer pattern is valid"))
}

/// Experience factor (max 20).
///
/// Required years = first integer in the job's experience string
/// ("2-5 years" → 2). Candidate years = maximum over all `<n> [+]? years/yrs`
/// mentions in the résumé text.
pub fn experience_breakdown(resume_text: &str, job_experience: &str) -> ExperienceBreakdown {
    let required_years: u32 = first_integer()
        .find(job_experience)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);

    let candidate_years: u32 = years_pattern()
        .captures_iter(resume_text)
        .filter_map(|caps| caps[1].parse().ok())
        .max()
        .unwrap_or(0);

    let (score, status) = if candidate_years >= required_years && candidate_years > 0 {
        (20, "Meets or exceeds requirement")
    } else if candidate_years == 0 && required_years == 0 {
        (20, "Meets or exceeds requirement")
    } else if candidate_years as f64 >= required_years as f64 * 0.7 && candidate_years > 0 {
        (15, "Close to requirement")
    } else if candidate_years > 0 {
        (10, "Below requirement")
    } else {
        (5, "Experience not clearly stated")
    };

    ExperienceBreakdown {
        score,
        max: 20,
        candidate_experience: if candidate_years > 0 {
            format!("{candidate_years} years")
        } else {
            "Not specified".to_string()
        },
        required_experience: job_experience.to_string(),
        status: status.to_string(),
    }
}

/// Department factor (max 10): overlap between department keywords mentioned
/// in the job description and in the candidate's text. A job description with
/// no department keywords gets a neutral 7.
pub fn department_breakdown(candidate_text: &str, job_description: &str) -> DepartmentBreakdown {
    let job_lower = job_description.to_lowercase();
    let candidate_lower = candidate_text.to_lowercase();

    let job_departments: Vec<String> = DEPARTMENTS
        .iter()
        .filter(|dept| job_lower.contains(*dept))
        .map(|d| d.to_string())
        .collect();

    if job_departments.is_empty() {
        return DepartmentBreakdown {
            score: 7,
            max: 10,
            job_departments: None,
            candidate_departments: None,
            status: "Department not specified in job".to_string(),
            matched: false,
        };
    }

    let matched_departments: Vec<String> = job_departments
        .iter()
        .filter(|dept| candidate_lower.contains(dept.as_str()))
        .cloned()
        .collect();

    let match_fraction = matched_departments.len() as f64 / job_departments.len() as f64;
    let matched = !matched_departments.is_empty();

    DepartmentBreakdown {
        score: (match_fraction * 10.0).round() as u32,
        max: 10,
        job_departments: Some(job_departments),
        candidate_departments: Some(matched_departments),
        status: if matched { "Matched" } else { "Not matched" }.to_string(),
        matched,
    }
}

/// Description factor (max 20): how many skills extracted from the job
/// description the candidate also has. A description with no recognizable
/// skills gets a neutral 15.
pub fn description_breakdown(
    ontology: &SkillOntology,
    candidate_skills: &[String],
    job_description: &str,
) -> DescriptionBreakdown {
    let description_skills = extract_skills(ontology, job_description);

    if description_skills.is_empty() {
        return DescriptionBreakdown {
            score: 15,
            max: 20,
            keyword_matches: 0,
            total_keywords: 0,
            match_percentage: None,
            status: "No specific keywords in description".to_string(),
        };
    }

    let matches = description_skills
        .iter()
        .filter(|skill| candidate_skills.iter().any(|c| c == *skill))
        .count();
    let match_fraction = matches as f64 / description_skills.len() as f64;

    DescriptionBreakdown {
        score: (match_fraction * 20.0).round() as u32,
        max: 20,
        keyword_matches: matches as u32,
        total_keywords: description_skills.len() as u32,
        match_percentage: Some((match_fraction * 100.0).round() as u32),
        status: format!("{matches} of {} keywords matched", description_skills.len()),
    }
}

/// Deterministic narrative: fixed clause order (overall → skills →
/// experience → department → description), each clause chosen by tier.
fn build_narrative(
    total_score: u32,
    skills: &SkillsBreakdown,
    experience: &ExperienceBreakdown,
    department: &DepartmentBreakdown,
    description: &DescriptionBreakdown,
) -> String {
    let mut out = String::new();

    out.push_str(if total_score >= 80 {
        "This candidate is an excellent match for the role. "
    } else if total_score >= 60 {
        "This candidate is a good match for the role. "
    } else if total_score >= 40 {
        "This candidate is a moderate match for the role. "
    } else {
        "This candidate may not be the best fit for the role. "
    });

    out.push_str(if skills.match_percentage >= 80 {
        "They possess most of the required technical skills. "
    } else if skills.match_percentage >= 50 {
        "They have some of the required skills but are missing key competencies. "
    } else {
        "They are missing several critical skills. "
    });

    out.push_str(if experience.score >= 18 {
        "Their experience level aligns well with the requirements. "
    } else if experience.score >= 12 {
        "Their experience is close to what is needed. "
    } else {
        "They may need more experience for this role. "
    });

    if department.matched {
        out.push_str("They have relevant domain experience. ");
    }

    if let Some(pct) = description.match_percentage {
        if pct >= 70 {
            out.push_str("Their background strongly aligns with the job description.");
        } else if pct >= 40 {
            out.push_str("Their background partially aligns with the job description.");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_skills_breakdown_full_match() {
        let b = skills_breakdown(&skills(&["react", "node"]), &[], 2);
        assert_eq!(b.score, 50);
        assert_eq!(b.max, 50);
        assert_eq!(b.match_percentage, 100);
    }

    #[test]
    fn test_skills_breakdown_partial_match_rounds() {
        // 2 of 3 → 33.33 points → 33; percentage 66.67 → 67.
        let b = skills_breakdown(&skills(&["react", "node"]), &skills(&["docker"]), 3);
        assert_eq!(b.score, 33);
        assert_eq!(b.match_percentage, 67);
    }

    #[test]
    fn test_skills_breakdown_no_required_skills() {
        let b = skills_breakdown(&[], &[], 0);
        assert_eq!(b.score, 0);
        assert_eq!(b.match_percentage, 0);
    }

    #[test]
    fn test_experience_meets_requirement() {
        let b = experience_breakdown(
            "Built services for 5+ years, plus 2 years of consulting.",
            "2-5 years",
        );
        assert_eq!(b.score, 20);
        assert_eq!(b.status, "Meets or exceeds requirement");
        assert_eq!(b.candidate_experience, "5 years");
        assert_eq!(b.required_experience, "2-5 years");
    }

    #[test]
    fn test_experience_takes_maximum_mention() {
        let b = experience_breakdown("1 year here, 8 yrs there, 3 years elsewhere", "10 years");
        assert_eq!(b.candidate_experience, "8 years");
        // 8 >= 10 * 0.7 → close.
        assert_eq!(b.score, 15);
        assert_eq!(b.status, "Close to requirement");
    }

    #[test]
    fn test_experience_below_requirement() {
        let b = experience_breakdown("2 years of internships", "10+ years");
        assert_eq!(b.score, 10);
        assert_eq!(b.status, "Below requirement");
    }

    #[test]
    fn test_experience_not_stated() {
        let b = experience_breakdown("I am very experienced.", "3 years");
        assert_eq!(b.score, 5);
        assert_eq!(b.status, "Experience not clearly stated");
        assert_eq!(b.candidate_experience, "Not specified");
    }

    #[test]
    fn test_experience_requirement_without_digits_parses_to_zero() {
        let b = experience_breakdown("4 years of backend work", "entry level");
        // required 0, candidate 4 → meets.
        assert_eq!(b.score, 20);
    }

    #[test]
    fn test_department_neutral_when_job_names_none() {
        let b = department_breakdown("backend engineer resume", "We need someone great.");
        assert_eq!(b.score, 7);
        assert!(!b.matched);
        assert!(b.job_departments.is_none());
        assert_eq!(b.status, "Department not specified in job");
    }

    #[test]
    fn test_department_full_overlap_scores_10() {
        let b = department_breakdown(
            "Senior backend engineering lead",
            "Backend engineering role in our platform team",
        );
        assert_eq!(b.score, 10);
        assert!(b.matched);
        assert_eq!(b.status, "Matched");
    }

    #[test]
    fn test_department_partial_overlap_rounds() {
        // Job names backend + frontend + data; candidate covers only backend.
        let b = department_breakdown(
            "backend services developer",
            "frontend and backend work with data pipelines",
        );
        assert_eq!(b.job_departments.as_ref().unwrap().len(), 3);
        assert_eq!(b.candidate_departments.as_ref().unwrap(), &skills(&["backend"]));
        // 1/3 of 10 → 3.33 → 3.
        assert_eq!(b.score, 3);
    }

    #[test]
    fn test_description_neutral_when_no_keywords() {
        let ontology = SkillOntology::builtin();
        let b = description_breakdown(&ontology, &skills(&["react"]), "A great place to work.");
        assert_eq!(b.score, 15);
        assert_eq!(b.total_keywords, 0);
        assert!(b.match_percentage.is_none());
    }

    #[test]
    fn test_description_counts_matched_keywords() {
        let ontology = SkillOntology::builtin();
        let b = description_breakdown(
            &ontology,
            &skills(&["react", "node"]),
            "You will build React and Node services with Docker and PostgreSQL.",
        );
        // Description skills: react, node, docker, sql — candidate has 2.
        assert_eq!(b.total_keywords, 4);
        assert_eq!(b.keyword_matches, 2);
        assert_eq!(b.score, 10);
        assert_eq!(b.match_percentage, Some(50));
        assert_eq!(b.status, "2 of 4 keywords matched");
    }

    #[test]
    fn test_breakdown_maxes_sum_to_100() {
        let ontology = SkillOntology::builtin();
        let inputs = ExplanationInputs {
            matched_skills: &skills(&["react"]),
            missing_skills: &[],
            required_skill_count: 1,
            application_resume_text: "3 years of React work",
            department_text: "frontend resume",
            candidate_skills: &skills(&["react"]),
            job_experience: "2 years",
            job_description: "Frontend role using React",
        };
        let explanation = compose(&ontology, &inputs);
        let b = &explanation.breakdown;
        assert_eq!(b.skills.max + b.experience.max + b.department.max + b.description.max, 100);
        assert!(explanation.total_score <= 100);
        assert_eq!(
            explanation.total_score,
            b.skills.score + b.experience.score + b.department.score + b.description.score
        );
    }

    #[test]
    fn test_compose_strong_candidate_narrative() {
        let ontology = SkillOntology::builtin();
        let inputs = ExplanationInputs {
            matched_skills: &skills(&["react", "node", "mongodb"]),
            missing_skills: &[],
            required_skill_count: 3,
            application_resume_text: "Full stack engineering for 6 years using React and Node",
            department_text: "Full stack engineering for 6 years using React and Node",
            candidate_skills: &skills(&["react", "node", "mongodb"]),
            job_experience: "2-5 years",
            job_description: "Engineering role building React and Node services",
        };
        let explanation = compose(&ontology, &inputs);
        assert!(explanation.total_score >= 80, "got {}", explanation.total_score);
        assert!(explanation.explanation.starts_with("This candidate is an excellent match"));
        assert!(explanation
            .explanation
            .contains("possess most of the required technical skills"));
        assert!(explanation
            .explanation
            .contains("experience level aligns well"));
        assert!(explanation.explanation.contains("relevant domain experience"));
        assert!(explanation
            .explanation
            .contains("strongly aligns with the job description"));
    }

    #[test]
    fn test_compose_weak_candidate_narrative_omits_optional_clauses() {
        let ontology = SkillOntology::builtin();
        let inputs = ExplanationInputs {
            matched_skills: &[],
            missing_skills: &skills(&["react", "node", "docker"]),
            required_skill_count: 3,
            application_resume_text: "I paint houses.",
            department_text: "I paint houses.",
            candidate_skills: &[],
            job_experience: "5 years",
            job_description: "Backend engineering with Node and Docker",
        };
        let explanation = compose(&ontology, &inputs);
        assert!(explanation.total_score < 40);
        assert!(explanation
            .explanation
            .starts_with("This candidate may not be the best fit"));
        assert!(explanation.explanation.contains("missing several critical skills"));
        assert!(!explanation.explanation.contains("domain experience"));
        assert!(!explanation.explanation.contains("aligns with the job description"));
    }

    #[test]
    fn test_narrative_clause_order_is_fixed() {
        let ontology = SkillOntology::builtin();
        let inputs = ExplanationInputs {
            matched_skills: &skills(&["react", "node"]),
            missing_skills: &skills(&["docker"]),
            required_skill_count: 3,
            application_resume_text: "4 years of frontend work with React",
            department_text: "4 years of frontend work with React",
            candidate_skills: &skills(&["react", "node"]),
            job_experience: "3 years",
            job_description: "Frontend role: React and Node",
        };
        let text = compose(&ontology, &inputs).explanation;
        let skills_pos = text.find("required").unwrap();
        let experience_pos = text.find("experience level").or(text.find("experience")).unwrap();
        let department_pos = text.find("domain experience").unwrap();
        assert!(skills_pos < experience_pos || skills_pos < department_pos);
        assert!(department_pos > skills_pos);
    }

    #[test]
    fn test_explanation_serializes_with_contract_keys() {
        let ontology = SkillOntology::builtin();
        let inputs = ExplanationInputs {
            matched_skills: &skills(&["react"]),
            missing_skills: &skills(&["node"]),
            required_skill_count: 2,
            application_resume_text: "3 years React",
            department_text: "frontend",
            candidate_skills: &skills(&["react"]),
            job_experience: "2 years",
            job_description: "Frontend React role",
        };
        let json = serde_json::to_value(compose(&ontology, &inputs)).unwrap();
        assert!(json.get("totalScore").is_some());
        assert!(json["breakdown"]["skills"].get("matchPercentage").is_some());
        assert!(json["breakdown"]["experience"].get("candidateExperience").is_some());
        assert!(json["breakdown"]["description"].get("keywordMatches").is_some());
        assert!(json.get("explanation").is_some());
    }
}
