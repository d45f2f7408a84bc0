//! Skill Extractor — detects canonical skills present in free text.
//!
//! Pure and deterministic: the same text against the same ontology always
//! yields the same set. Empty or unusable input returns an empty set, never
//! an error.

use std::collections::BTreeSet;

use crate::matching::ontology::SkillOntology;

/// Normalizes free text for matching: lowercase, strip everything except
/// letters, digits, whitespace, `.` and `+` (preserves "c++", "node.js"),
/// collapse whitespace runs to single spaces.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for ch in text.chars() {
        let mapped = match ch {
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            '.' | '+' => Some(ch),
            _ => None,
        };
        match mapped {
            Some(c) => {
                out.push(c);
                last_was_space = false;
            }
            None => {
                if !last_was_space {
                    out.push(' ');
                    last_was_space = true;
                }
            }
        }
    }
    out.trim_end().to_string()
}

/// Extracts the set of canonical skills whose aliases appear in `text` as
/// whole words.
///
/// Whole-word semantics: the normalized text is tokenized on whitespace and
/// each token (with sentence punctuation trimmed) is probed against the alias
/// map, so "javascript" never matches the "java" alias and "react.js" matches
/// the "react.js" alias rather than its "js" suffix. Multi-word aliases are
/// matched against contiguous token windows.
pub fn extract_skills(ontology: &SkillOntology, text: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    if text.trim().is_empty() {
        return found;
    }

    let normalized = normalize(text);
    let tokens: Vec<&str> = normalized
        .split_whitespace()
        .map(|t| t.trim_matches('.'))
        .filter(|t| !t.is_empty())
        .collect();

    for token in &tokens {
        if let Some(canonical) = ontology.lookup_token(token) {
            found.insert(canonical.to_string());
        }
    }

    for (words, canonical) in ontology.multi_word_aliases() {
        if found.contains(canonical) {
            continue;
        }
        let hit = tokens
            .windows(words.len())
            .any(|window| window.iter().zip(words).all(|(t, w)| *t == w.as_str()));
        if hit {
            found.insert(canonical.to_string());
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::ontology::OntologyEntry;

    fn set(skills: &[&str]) -> BTreeSet<String> {
        skills.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_strips_punctuation_and_collapses_whitespace() {
        assert_eq!(
            normalize("Hello,   World! (Rust)   dev"),
            "hello world rust dev"
        );
    }

    #[test]
    fn test_normalize_preserves_dots_and_plus() {
        assert_eq!(normalize("C++ & Node.js!"), "c++ node.js");
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let ontology = SkillOntology::builtin();
        assert!(extract_skills(&ontology, "").is_empty());
        assert!(extract_skills(&ontology, "   \n\t ").is_empty());
    }

    #[test]
    fn test_full_stack_resume_extraction() {
        // The canonical sample résumé: c++ is absent from the built-in table,
        // and "react.js"/"node.js" must resolve as whole tokens — in
        // particular the ".js" suffix must not register as javascript.
        let ontology = SkillOntology::builtin();
        let text = "I am a Full Stack Developer with experience in React.js, \
                    Node.js, and MongoDB. I also know Python and some C++.";
        assert_eq!(
            extract_skills(&ontology, text),
            set(&["react", "node", "mongodb", "python"])
        );
    }

    #[test]
    fn test_javascript_does_not_match_java() {
        let ontology = SkillOntology::builtin();
        let skills = extract_skills(&ontology, "Senior JavaScript engineer");
        assert!(skills.contains("javascript"));
        assert!(!skills.contains("java"));
    }

    #[test]
    fn test_java_matches_as_whole_word() {
        let ontology = SkillOntology::builtin();
        assert_eq!(
            extract_skills(&ontology, "5 years of Java and Spring"),
            set(&["java"])
        );
    }

    #[test]
    fn test_metacharacter_alias_matches() {
        // The built-in table has no c++, so exercise the invariant with an
        // ontology that does.
        let ontology = SkillOntology::new(vec![OntologyEntry {
            canonical: "cpp".to_string(),
            aliases: vec!["c++".to_string()],
        }]);
        assert_eq!(
            extract_skills(&ontology, "I write embedded C++ daily."),
            set(&["cpp"])
        );
        // And it must stay a whole-word match.
        assert!(extract_skills(&ontology, "my cat c++x is odd").is_empty());
    }

    #[test]
    fn test_short_aliases_resolve() {
        let ontology = SkillOntology::builtin();
        assert_eq!(
            extract_skills(&ontology, "I use JS and ExpressJS."),
            set(&["express", "javascript"])
        );
    }

    #[test]
    fn test_multi_word_alias_amazon_web_services() {
        let ontology = SkillOntology::builtin();
        assert_eq!(
            extract_skills(&ontology, "Deployed on Amazon Web Services infrastructure"),
            set(&["aws"])
        );
        // Partial phrase must not match.
        assert!(extract_skills(&ontology, "amazon warehouse services").is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let ontology = SkillOntology::builtin();
        let text = "React, Python, Docker, Kubernetes and PostgreSQL.";
        let first = extract_skills(&ontology, text);
        let second = extract_skills(&ontology, text);
        assert_eq!(first, second);
        assert_eq!(first, set(&["react", "python", "docker", "sql"]));
    }

    #[test]
    fn test_result_is_subset_of_canonical_names() {
        let ontology = SkillOntology::builtin();
        let text = "js react node mongo express py java html css sql git aws docker rust go";
        let skills = extract_skills(&ontology, text);
        for skill in &skills {
            assert!(
                ontology.canonical_names().any(|c| c == skill),
                "{skill} is not a canonical name"
            );
        }
    }

    #[test]
    fn test_duplicate_mentions_extract_once() {
        let ontology = SkillOntology::builtin();
        assert_eq!(
            extract_skills(&ontology, "python python Python PY pandas"),
            set(&["python"])
        );
    }

    #[test]
    fn test_trailing_sentence_dot_is_trimmed() {
        let ontology = SkillOntology::builtin();
        assert_eq!(extract_skills(&ontology, "I know MongoDB."), set(&["mongodb"]));
    }
}
