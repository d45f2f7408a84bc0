//! Match Scorer — weighted 0–100 score of candidate skills against a job's
//! required-skill list.
//!
//! The recruiter's input order is load-bearing: the first `ceil(n/2)` skills
//! form the core group (70% of the weight), the remainder the secondary group
//! (30%). When every skill lands in the core group, the score is a plain
//! percentage of core skills matched. Recruiters are expected to list the
//! most important skills first; the split itself is never validated.

use serde::{Deserialize, Serialize};

use crate::matching::ontology::SkillOntology;

const CORE_WEIGHT: f64 = 70.0;
const SECONDARY_WEIGHT: f64 = 30.0;

/// Score plus the explainable matched/missing partition.
///
/// `matched_skills` and `missing_skills` partition the canonicalized job
/// skills: every job skill appears in exactly one list, in original order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub score: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl MatchOutcome {
    pub fn zero() -> Self {
        Self {
            score: 0,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
        }
    }
}

/// Scores a candidate's canonical skill set against the job's required
/// skills (free text, recruiter order preserved).
///
/// An empty job list is normal input and yields the zero outcome.
pub fn score_match(
    ontology: &SkillOntology,
    candidate_skills: &[String],
    job_skills: &[String],
) -> MatchOutcome {
    if job_skills.is_empty() {
        return MatchOutcome::zero();
    }

    let canonical_job_skills: Vec<String> = job_skills
        .iter()
        .map(|skill| ontology.canonicalize(skill))
        .collect();

    // Core = first ceil(n/2) skills; an odd count gives core the extra one.
    let core_count = canonical_job_skills.len().div_ceil(2);
    let (core, secondary) = canonical_job_skills.split_at(core_count);

    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();

    let mut tally = |group: &[String]| -> usize {
        let mut matches = 0;
        for skill in group {
            if candidate_skills.iter().any(|c| c == skill) {
                matches += 1;
                matched_skills.push(skill.clone());
            } else {
                missing_skills.push(skill.clone());
            }
        }
        matches
    };

    let core_matches = tally(core);
    let secondary_matches = tally(secondary);

    let core_fraction = core_matches as f64 / core.len() as f64;
    let final_score = if secondary.is_empty() {
        // All skills are core: plain percentage, not scaled by 70%.
        core_fraction * 100.0
    } else {
        let secondary_fraction = secondary_matches as f64 / secondary.len() as f64;
        core_fraction * CORE_WEIGHT + secondary_fraction * SECONDARY_WEIGHT
    };

    MatchOutcome {
        score: final_score.round() as u32,
        matched_skills,
        missing_skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_job_skills_is_zero_outcome() {
        let ontology = SkillOntology::builtin();
        let outcome = score_match(&ontology, &skills(&["react"]), &[]);
        assert_eq!(outcome.score, 0);
        assert!(outcome.matched_skills.is_empty());
        assert!(outcome.missing_skills.is_empty());
    }

    #[test]
    fn test_all_skills_matched_scores_100() {
        let ontology = SkillOntology::builtin();
        let candidate = skills(&["react", "node", "mongodb", "python"]);
        let outcome = score_match(&ontology, &candidate, &skills(&["React", "Node", "MongoDB"]));
        assert_eq!(outcome.score, 100);
        assert_eq!(outcome.matched_skills, skills(&["react", "node", "mongodb"]));
        assert!(outcome.missing_skills.is_empty());
    }

    #[test]
    fn test_core_only_match_scores_70() {
        // 5 skills: core = React, Node, Python; secondary = Java, Docker.
        let ontology = SkillOntology::builtin();
        let candidate = skills(&["react", "node", "mongodb", "python"]);
        let outcome = score_match(
            &ontology,
            &candidate,
            &skills(&["React", "Node", "Python", "Java", "Docker"]),
        );
        assert_eq!(outcome.score, 70);
        assert_eq!(outcome.matched_skills, skills(&["react", "node", "python"]));
        assert_eq!(outcome.missing_skills, skills(&["java", "docker"]));
    }

    #[test]
    fn test_synonyms_canonicalize_before_matching() {
        let ontology = SkillOntology::builtin();
        // Candidate extracted from "I use JS and ExpressJS."
        let candidate = skills(&["javascript", "express"]);
        let outcome = score_match(&ontology, &candidate, &skills(&["JavaScript", "Express"]));
        assert_eq!(outcome.score, 100);
    }

    #[test]
    fn test_no_overlap_scores_0() {
        let ontology = SkillOntology::builtin();
        let outcome = score_match(
            &ontology,
            &skills(&["python"]),
            &skills(&["React", "Node", "Docker"]),
        );
        assert_eq!(outcome.score, 0);
        assert!(outcome.matched_skills.is_empty());
        assert_eq!(outcome.missing_skills.len(), 3);
    }

    #[test]
    fn test_single_skill_job_is_not_scaled_by_core_weight() {
        let ontology = SkillOntology::builtin();
        let hit = score_match(&ontology, &skills(&["react"]), &skills(&["React"]));
        assert_eq!(hit.score, 100);
        let miss = score_match(&ontology, &skills(&["python"]), &skills(&["React"]));
        assert_eq!(miss.score, 0);
    }

    #[test]
    fn test_partition_sizes_even_and_odd() {
        let ontology = SkillOntology::builtin();
        // 4 skills → 2/2: matching exactly the core half yields 70.
        let even = score_match(
            &ontology,
            &skills(&["react", "node"]),
            &skills(&["react", "node", "java", "docker"]),
        );
        assert_eq!(even.score, 70);
        // 3 skills → core 2, secondary 1: matching the secondary yields 30.
        let odd = score_match(
            &ontology,
            &skills(&["docker"]),
            &skills(&["react", "node", "docker"]),
        );
        assert_eq!(odd.score, 30);
    }

    #[test]
    fn test_half_scores_round_up() {
        let ontology = SkillOntology::builtin();
        // Core 1/2 → 35.0; secondary 1/4 → 7.5; total 42.5 rounds to 43.
        let outcome = score_match(
            &ontology,
            &skills(&["react", "java"]),
            &skills(&["react", "node", "java", "docker", "sql", "git"]),
        );
        assert_eq!(outcome.score, 43);
    }

    #[test]
    fn test_matched_and_missing_partition_job_skills() {
        let ontology = SkillOntology::builtin();
        let job = skills(&["React.js", "NodeJS", "Rust", "Docker"]);
        let outcome = score_match(&ontology, &skills(&["react", "docker"]), &job);

        let mut combined = outcome.matched_skills.clone();
        combined.extend(outcome.missing_skills.clone());
        combined.sort();

        let mut canonical: Vec<String> = job.iter().map(|s| ontology.canonicalize(s)).collect();
        canonical.sort();
        assert_eq!(combined, canonical);

        for skill in &outcome.matched_skills {
            assert!(!outcome.missing_skills.contains(skill));
        }
    }

    #[test]
    fn test_unknown_job_skill_kept_as_lowercase_raw() {
        let ontology = SkillOntology::builtin();
        let outcome = score_match(&ontology, &[], &skills(&["Haskell"]));
        assert_eq!(outcome.missing_skills, skills(&["haskell"]));
    }

    #[test]
    fn test_match_outcome_serializes_with_camel_case_keys() {
        let outcome = MatchOutcome {
            score: 70,
            matched_skills: skills(&["react"]),
            missing_skills: skills(&["docker"]),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["score"], 70);
        assert_eq!(json["matchedSkills"][0], "react");
        assert_eq!(json["missingSkills"][0], "docker");
    }
}
