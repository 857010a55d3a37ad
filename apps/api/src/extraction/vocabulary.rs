//! The closed list of skill names the extractor recognises.
//!
//! Loaded once at startup and shared read-only behind an `Arc`.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

/// Built-in vocabulary used when no `SKILL_VOCABULARY_PATH` is configured.
/// Terms must survive text normalization (no `+` or `#`), otherwise they can never match.
const BUILTIN_SKILLS: &[&str] = &[
    // Programming languages
    "Python", "JavaScript", "Java", "Go", "Rust", "TypeScript", "PHP", "Ruby", "Swift",
    "Kotlin", "Scala", "R", "MATLAB",
    // Web
    "React", "Angular", "Vue.js", "Node.js", "Express", "Django", "Flask", "Spring", "Laravel",
    "Ruby on Rails", "ASP.NET", "HTML", "CSS", "SASS",
    // Databases
    "PostgreSQL", "MySQL", "MongoDB", "Redis", "Elasticsearch", "SQLite", "Oracle",
    "SQL Server", "Cassandra", "DynamoDB",
    // Cloud & DevOps
    "AWS", "GCP", "Azure", "Docker", "Kubernetes", "Jenkins", "GitLab CI", "Terraform",
    "Ansible", "Chef", "Puppet", "Vagrant",
    // Data & ML
    "TensorFlow", "PyTorch", "Scikit-learn", "Pandas", "NumPy", "Jupyter", "Apache Spark",
    "Hadoop", "Kafka", "Airflow",
    // Tools
    "Git", "GitHub", "GitLab", "Jira", "Confluence", "Slack", "Figma", "Photoshop",
    "Illustrator", "Sketch",
];

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("skill vocabulary is empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl SkillVocabulary {
    /// Builds a vocabulary, trimming terms and dropping case-insensitive duplicates
    /// (first spelling wins). Order is preserved and drives extraction output order.
    pub fn new<I, S>(terms: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
            .collect();

        if terms.is_empty() {
            return Err(VocabularyError::Empty);
        }
        Ok(Self { terms })
    }

    pub fn builtin() -> Self {
        Self {
            terms: BUILTIN_SKILLS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parses a newline-delimited list. Blank lines and `#` comments are ignored.
    pub fn parse(contents: &str) -> Result<Self, VocabularyError> {
        Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| VocabularyError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&contents)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}
