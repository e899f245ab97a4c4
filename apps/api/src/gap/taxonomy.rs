//! Skill taxonomy: learning difficulty, typical hours and category per skill.
//!
//! Loaded once at startup (built-in table or a JSON file) and shared read-only
//! through `AppState` as an `Arc<dyn TaxonomyLookup>`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Failed to read skill taxonomy '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid skill taxonomy JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Skill taxonomy is empty")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillInfo {
    pub difficulty: Difficulty,
    pub avg_learning_hours: u32,
    pub category: String,
}

/// Read-only skill lookup. Names are matched case-insensitively.
pub trait TaxonomyLookup: Send + Sync {
    fn lookup(&self, skill: &str) -> Option<SkillInfo>;

    /// Known skills mentioned in `text` as whole words, in order of first mention.
    fn mentioned_in(&self, text: &str) -> Vec<String>;
}

#[derive(Debug, Clone)]
struct TaxonomyEntry {
    /// Spelling used in reports.
    display_name: String,
    info: SkillInfo,
}

#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    /// Keyed by lowercased skill name.
    entries: BTreeMap<String, TaxonomyEntry>,
}

impl SkillTaxonomy {
    /// `path` set: the JSON file at `path`; otherwise the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self, TaxonomyError> {
        let taxonomy = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::builtin(),
        };
        info!("Skill taxonomy loaded ({} skills)", taxonomy.len());
        Ok(taxonomy)
    }

    pub fn from_file(path: &Path) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses `{"Skill Name": {"difficulty": "...", "avg_learning_hours": N, "category": "..."}}`.
    pub fn from_json_str(raw: &str) -> Result<Self, TaxonomyError> {
        let table: BTreeMap<String, SkillInfo> = serde_json::from_str(raw)?;
        let taxonomy = Self::from_entries(table);
        if taxonomy.entries.is_empty() {
            return Err(TaxonomyError::Empty);
        }
        Ok(taxonomy)
    }

    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_SKILLS.iter().map(|(name, difficulty, hours, category)| {
            (
                name.to_string(),
                SkillInfo {
                    difficulty: *difficulty,
                    avg_learning_hours: *hours,
                    category: category.to_string(),
                },
            )
        }))
    }

    fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, SkillInfo)>,
    {
        let entries = entries
            .into_iter()
            .map(|(name, info)| (name.trim().to_string(), info))
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, info)| {
                (
                    name.to_lowercase(),
                    TaxonomyEntry {
                        display_name: name,
                        info,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl TaxonomyLookup for SkillTaxonomy {
    fn lookup(&self, skill: &str) -> Option<SkillInfo> {
        self.entries
            .get(&skill.trim().to_lowercase())
            .map(|entry| entry.info.clone())
    }

    fn mentioned_in(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        let mut found: Vec<(usize, &str)> = self
            .entries
            .iter()
            .filter_map(|(key, entry)| {
                first_word_match(&haystack, key).map(|pos| (pos, entry.display_name.as_str()))
            })
            .collect();
        found.sort();
        found.into_iter().map(|(_, name)| name.to_string()).collect()
    }
}

/// Byte offset of the first occurrence of `needle` not embedded in a longer word.
fn first_word_match(haystack: &str, needle: &str) -> Option<usize> {
    haystack.match_indices(needle).map(|(pos, _)| pos).find(|&pos| {
        let before = haystack[..pos].chars().next_back();
        let after = haystack[pos + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

const BUILTIN_SKILLS: &[(&str, Difficulty, u32, &str)] = &[
    ("Python", Difficulty::Beginner, 60, "Programming"),
    ("Java", Difficulty::Intermediate, 100, "Programming"),
    ("JavaScript", Difficulty::Beginner, 60, "Programming"),
    ("TypeScript", Difficulty::Intermediate, 40, "Programming"),
    ("C++", Difficulty::Advanced, 150, "Programming"),
    ("Rust", Difficulty::Advanced, 150, "Programming"),
    ("Golang", Difficulty::Intermediate, 80, "Programming"),
    ("HTML", Difficulty::Beginner, 20, "Web Development"),
    ("CSS", Difficulty::Beginner, 30, "Web Development"),
    ("React", Difficulty::Intermediate, 60, "Web Development"),
    ("Node.js", Difficulty::Intermediate, 50, "Web Development"),
    ("Django", Difficulty::Intermediate, 50, "Web Development"),
    ("REST APIs", Difficulty::Beginner, 25, "Web Development"),
    ("SQL", Difficulty::Beginner, 40, "Databases"),
    ("PostgreSQL", Difficulty::Intermediate, 50, "Databases"),
    ("MongoDB", Difficulty::Beginner, 30, "Databases"),
    ("Redis", Difficulty::Intermediate, 25, "Databases"),
    ("Docker", Difficulty::Intermediate, 30, "Cloud & DevOps"),
    ("Kubernetes", Difficulty::Advanced, 80, "Cloud & DevOps"),
    ("AWS", Difficulty::Intermediate, 90, "Cloud & DevOps"),
    ("Terraform", Difficulty::Intermediate, 45, "Cloud & DevOps"),
    ("CI/CD", Difficulty::Intermediate, 30, "Cloud & DevOps"),
    ("Git", Difficulty::Beginner, 15, "Cloud & DevOps"),
    ("Linux", Difficulty::Intermediate, 50, "Cloud & DevOps"),
    ("Machine Learning", Difficulty::Advanced, 200, "Data & AI"),
    ("Deep Learning", Difficulty::Advanced, 180, "Data & AI"),
    ("Pandas", Difficulty::Beginner, 30, "Data & AI"),
    ("TensorFlow", Difficulty::Advanced, 100, "Data & AI"),
    ("PyTorch", Difficulty::Advanced, 100, "Data & AI"),
    ("Statistics", Difficulty::Intermediate, 120, "Data & AI"),
    ("Power BI", Difficulty::Beginner, 30, "Data & AI"),
    ("Excel", Difficulty::Beginner, 20, "Data & AI"),
    ("Communication", Difficulty::Beginner, 30, "Soft Skills"),
    ("Leadership", Difficulty::Intermediate, 60, "Soft Skills"),
    ("Project Management", Difficulty::Intermediate, 80, "Soft Skills"),
    ("Agile", Difficulty::Beginner, 20, "Soft Skills"),
];

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        let taxonomy = SkillTaxonomy::builtin();
        let info = taxonomy.lookup("  kubernetes ").unwrap();
        assert_eq!(info.difficulty, Difficulty::Advanced);
        assert_eq!(info.category, "Cloud & DevOps");
        assert_eq!(taxonomy.lookup("PYTHON"), taxonomy.lookup("python"));
        assert!(taxonomy.lookup("Underwater Basket Weaving").is_none());
    }

    #[test]
    fn test_mentioned_in_respects_word_boundaries() {
        let taxonomy = SkillTaxonomy::builtin();
        let found =
            taxonomy.mentioned_in("We use JavaScript, Node.js and C++ on Linux; CI/CD via GitHub.");
        assert_eq!(found, vec!["JavaScript", "Node.js", "C++", "Linux", "CI/CD"]);
        // "java" inside "javascript" and "git" inside "github" do not count
        assert!(!found.contains(&"Java".to_string()));
        assert!(!found.contains(&"Git".to_string()));
    }

    #[test]
    fn test_mentioned_in_orders_by_first_mention() {
        let taxonomy = SkillTaxonomy::builtin();
        let found = taxonomy.mentioned_in("docker first, then SQL, then docker again, python last");
        assert_eq!(found, vec!["Docker", "SQL", "Python"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Elixir": {{"difficulty": "advanced", "avg_learning_hours": 90, "category": "Programming"}}}}"#
        )
        .unwrap();

        let taxonomy = SkillTaxonomy::load(Some(file.path())).unwrap();
        assert_eq!(taxonomy.len(), 1);
        assert_eq!(taxonomy.lookup("elixir").unwrap().avg_learning_hours, 90);
        assert_eq!(taxonomy.mentioned_in("Elixir/OTP services"), vec!["Elixir"]);
    }

    #[test]
    fn test_load_without_path_uses_builtin() {
        let taxonomy = SkillTaxonomy::load(None).unwrap();
        assert_eq!(taxonomy.len(), BUILTIN_SKILLS.len());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = SkillTaxonomy::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, TaxonomyError::Io { .. }));
    }

    #[test]
    fn test_bad_difficulty_is_decode_error() {
        let err = SkillTaxonomy::from_json_str(
            r#"{"Rust": {"difficulty": "legendary", "avg_learning_hours": 1, "category": "x"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TaxonomyError::Decode(_)));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            SkillTaxonomy::from_json_str("{}"),
            Err(TaxonomyError::Empty)
        ));
    }

    #[test]
    fn test_difficulty_orders_easiest_first() {
        assert!(Difficulty::Beginner < Difficulty::Intermediate);
        assert!(Difficulty::Intermediate < Difficulty::Advanced);
    }
}
