//! Skill Ontology — canonical skill names and the alias variants that resolve to them.
//!
//! Loaded once at startup and shared via `Arc<SkillOntology>` in `AppState`.
//! Immutable for the process lifetime: extraction and canonicalization must see
//! the same table, otherwise the same résumé could canonicalize differently
//! across requests.

use std::collections::HashMap;

/// One canonical skill and its textual variants.
///
/// Invariant: canonical names are globally unique within an ontology.
/// Aliases are stored lowercase and may contain `.` and `+` ("node.js", "c++").
#[derive(Debug, Clone)]
pub struct OntologyEntry {
    pub canonical: String,
    pub aliases: Vec<String>,
}

/// Immutable alias → canonical lookup structure.
///
/// Single-token aliases live in a hash map probed per token; multi-word
/// aliases ("amazon web services") are kept separately and matched against
/// token windows by the extractor.
#[derive(Debug)]
pub struct SkillOntology {
    entries: Vec<OntologyEntry>,
    single_word: HashMap<String, usize>,
    multi_word: Vec<(Vec<String>, usize)>,
}

impl SkillOntology {
    pub fn new(entries: Vec<OntologyEntry>) -> Self {
        let mut single_word = HashMap::new();
        let mut multi_word = Vec::new();

        for (idx, entry) in entries.iter().enumerate() {
            for alias in &entry.aliases {
                let words: Vec<String> = alias.split_whitespace().map(str::to_string).collect();
                match words.len() {
                    0 => continue,
                    1 => {
                        single_word.insert(words[0].clone(), idx);
                    }
                    _ => multi_word.push((words, idx)),
                }
            }
            // The canonical name itself always resolves.
            if !entry.canonical.contains(' ') {
                single_word.entry(entry.canonical.clone()).or_insert(idx);
            }
        }

        Self {
            entries,
            single_word,
            multi_word,
        }
    }

    /// The built-in skill table used in production.
    pub fn builtin() -> Self {
        let table: &[(&str, &[&str])] = &[
            ("javascript", &["js", "javascript", "ecmascript", "es6"]),
            ("react", &["react", "reactjs", "react.js", "react.native"]),
            ("node", &["node", "nodejs", "node.js"]),
            ("mongodb", &["mongo", "mongodb", "mongoose", "nosql"]),
            ("express", &["express", "expressjs", "express.js"]),
            ("python", &["python", "py", "pandas", "numpy"]),
            ("java", &["java", "spring", "springboot"]),
            ("html", &["html", "html5"]),
            (
                "css",
                &["css", "css3", "scss", "sass", "tailwind", "bootstrap"],
            ),
            ("sql", &["sql", "mysql", "postgresql", "postgres"]),
            ("git", &["git", "github", "gitlab"]),
            ("aws", &["aws", "amazon web services", "ec2", "s3", "lambda"]),
            ("docker", &["docker", "kubernetes", "k8s"]),
        ];

        Self::new(
            table
                .iter()
                .map(|(canonical, aliases)| OntologyEntry {
                    canonical: canonical.to_string(),
                    aliases: aliases.iter().map(|a| a.to_string()).collect(),
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[OntologyEntry] {
        &self.entries
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.canonical.as_str())
    }

    /// Resolves a single normalized token to its canonical skill, if any.
    pub fn lookup_token(&self, token: &str) -> Option<&str> {
        self.single_word
            .get(token)
            .map(|&idx| self.entries[idx].canonical.as_str())
    }

    /// Multi-word aliases as (words, canonical) pairs for window matching.
    pub fn multi_word_aliases(&self) -> impl Iterator<Item = (&[String], &str)> {
        self.multi_word
            .iter()
            .map(|(words, idx)| (words.as_slice(), self.entries[*idx].canonical.as_str()))
    }

    /// Maps a recruiter-entered skill to its canonical form.
    ///
    /// Matches against canonical names and full alias strings
    /// (case-insensitive); unknown skills fall back to lowercase raw text.
    pub fn canonicalize(&self, raw: &str) -> String {
        let lowered = raw.trim().to_lowercase();
        for entry in &self.entries {
            if entry.canonical == lowered || entry.aliases.iter().any(|a| *a == lowered) {
                return entry.canonical.clone();
            }
        }
        lowered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_has_thirteen_canonical_skills() {
        let ontology = SkillOntology::builtin();
        assert_eq!(ontology.entries().len(), 13);
    }

    #[test]
    fn test_builtin_canonical_names_are_unique() {
        let ontology = SkillOntology::builtin();
        let names: HashSet<&str> = ontology.canonical_names().collect();
        assert_eq!(names.len(), ontology.entries().len());
    }

    #[test]
    fn test_canonicalize_alias_resolves() {
        let ontology = SkillOntology::builtin();
        assert_eq!(ontology.canonicalize("ReactJS"), "react");
        assert_eq!(ontology.canonicalize("Node.js"), "node");
        assert_eq!(ontology.canonicalize("JS"), "javascript");
    }

    #[test]
    fn test_canonicalize_canonical_name_is_identity() {
        let ontology = SkillOntology::builtin();
        assert_eq!(ontology.canonicalize("react"), "react");
        assert_eq!(ontology.canonicalize("MongoDB"), "mongodb");
    }

    #[test]
    fn test_canonicalize_unknown_falls_back_to_lowercase() {
        let ontology = SkillOntology::builtin();
        assert_eq!(ontology.canonicalize("Haskell"), "haskell");
        assert_eq!(ontology.canonicalize("  Elixir "), "elixir");
    }

    #[test]
    fn test_lookup_token_single_word_alias() {
        let ontology = SkillOntology::builtin();
        assert_eq!(ontology.lookup_token("kubernetes"), Some("docker"));
        assert_eq!(ontology.lookup_token("react.js"), Some("react"));
        assert_eq!(ontology.lookup_token("fortran"), None);
    }

    #[test]
    fn test_multi_word_alias_is_indexed_separately() {
        let ontology = SkillOntology::builtin();
        let multi: Vec<_> = ontology.multi_word_aliases().collect();
        assert!(multi
            .iter()
            .any(|(words, canonical)| words.join(" ") == "amazon web services"
                && *canonical == "aws"));
        // Multi-word aliases must not pollute the token map.
        assert_eq!(ontology.lookup_token("amazon"), None);
    }

    #[test]
    fn test_custom_ontology_for_tests() {
        let ontology = SkillOntology::new(vec![OntologyEntry {
            canonical: "cpp".to_string(),
            aliases: vec!["c++".to_string(), "cpp".to_string()],
        }]);
        assert_eq!(ontology.lookup_token("c++"), Some("cpp"));
        assert_eq!(ontology.canonicalize("C++"), "cpp");
    }
}
