//! LaTeX answer grading.
//!
//! Answers are compared after normalization (whitespace removed, lower-cased,
//! `$` delimiters stripped), then against a curated table of known
//! rewritings. There is no LaTeX parsing: a pair that is mathematically equal
//! but absent from the table is graded incorrect.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

const BUNDLED_TABLE: &str = include_str!("../data/equivalences.json");

/// How a correct answer was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Normalized forms are identical.
    Exact,
    /// Both forms belong to the same curated equivalence group.
    Group,
}

/// Result of grading a submitted answer against the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCheck {
    pub is_correct: bool,
    pub matched_by: Option<MatchKind>,
    /// Normalized submitted answer (for display).
    pub user_normalized: String,
    /// Normalized target answer (for display).
    pub target_normalized: String,
}

/// Set of LaTeX strings treated as interchangeable answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquivalenceGroup(pub Vec<String>);

#[derive(Debug, Deserialize)]
struct TableFile {
    groups: Vec<EquivalenceGroup>,
}

/// Curated equivalence groups, indexed by normalized member.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceTable {
    groups: Vec<EquivalenceGroup>,
    index: HashMap<String, Vec<usize>>,
}

impl EquivalenceTable {
    /// A table with no groups; only normalized matches succeed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_TABLE)
    }

    /// Load a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse `{"groups": [["x^2", "x^{2}"], ...]}`.
    pub fn from_json(content: &str) -> Result<Self> {
        let file: TableFile = serde_json::from_str(content)?;
        Self::from_groups(file.groups)
    }

    /// Build a table, rejecting groups that collapse to a single normalized form.
    pub fn from_groups(groups: Vec<EquivalenceGroup>) -> Result<Self> {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, group) in groups.iter().enumerate() {
            let members: HashSet<String> = group.0.iter().map(|m| normalize(m)).collect();
            if members.len() < 2 {
                return Err(ConfigError::DegenerateGroup { index: i });
            }
            for member in members {
                index.entry(member).or_default().push(i);
            }
        }

        tracing::debug!(groups = groups.len(), "loaded equivalence table");
        Ok(Self { groups, index })
    }

    pub fn groups(&self) -> &[EquivalenceGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether two normalized strings share a group.
    fn same_group(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(a_groups), Some(b_groups)) => a_groups.iter().any(|g| b_groups.contains(g)),
            _ => false,
        }
    }
}

/// Canonical form of a LaTeX snippet: no whitespace, lower-case, no
/// surrounding `$` delimiters.
pub fn normalize(s: &str) -> String {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    compact.to_lowercase().trim_matches('$').to_string()
}

/// Grade a submitted answer against the target.
pub fn check_answer(user: &str, target: &str, table: &EquivalenceTable) -> AnswerCheck {
    let user_normalized = normalize(user);
    let target_normalized = normalize(target);

    // Delimiters are already stripped, so `x^2` and `$x^2$` land here too.
    let matched_by = if user_normalized == target_normalized {
        Some(MatchKind::Exact)
    } else if table.same_group(&user_normalized, &target_normalized) {
        Some(MatchKind::Group)
    } else {
        None
    };

    AnswerCheck {
        is_correct: matched_by.is_some(),
        matched_by,
        user_normalized,
        target_normalized,
    }
}

/// Whether the submitted answer denotes the target formula.
pub fn is_equivalent(user: &str, target: &str, table: &EquivalenceTable) -> bool {
    check_answer(user, target, table).is_correct
}
