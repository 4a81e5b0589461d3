use crate::defaults::{default_spec_pattern, DEFAULT_EXCLUDE_SPEC_PATTERN, DEFAULT_SPEC_FILE_EXTENSION};
use crate::testing_type::TestingType;
use serde::{Deserialize, Serialize};

/// One glob or a list of globs, as written in project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternList {
    One(String),
    Many(Vec<String>),
}

impl PatternList {
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(pattern) => vec![pattern.clone()],
            Self::Many(patterns) => patterns.clone(),
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(pattern) => Some(pattern.as_str()),
            Self::Many(patterns) => patterns.first().map(String::as_str),
        }
    }
}

impl Default for PatternList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<&str> for PatternList {
    fn from(pattern: &str) -> Self {
        Self::One(pattern.to_string())
    }
}

impl From<Vec<String>> for PatternList {
    fn from(patterns: Vec<String>) -> Self {
        Self::Many(patterns)
    }
}

/// Include and exclude globs in effect for one testing type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecPatternSet {
    pub spec_pattern: Vec<String>,
    pub exclude_spec_pattern: Vec<String>,
}

/// Spec-related project settings for the active testing type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_pattern: Option<PatternList>,
    #[serde(default = "default_exclude_spec_pattern")]
    pub exclude_spec_pattern: PatternList,
    /// Extension used for new spec files (`js`, `ts`, ...).
    #[serde(default = "default_spec_file_extension")]
    pub spec_file_extension: String,
}

fn default_exclude_spec_pattern() -> PatternList {
    PatternList::One(DEFAULT_EXCLUDE_SPEC_PATTERN.to_string())
}

fn default_spec_file_extension() -> String {
    DEFAULT_SPEC_FILE_EXTENSION.to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            spec_pattern: None,
            exclude_spec_pattern: default_exclude_spec_pattern(),
            spec_file_extension: default_spec_file_extension(),
        }
    }
}

impl ProjectConfig {
    #[must_use]
    pub fn with_spec_pattern(mut self, pattern: impl Into<PatternList>) -> Self {
        self.spec_pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_exclude_spec_pattern(mut self, pattern: impl Into<PatternList>) -> Self {
        self.exclude_spec_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn with_spec_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.spec_file_extension = extension.into();
        self
    }

    /// First configured spec pattern, ignoring blank entries.
    #[must_use]
    pub fn active_spec_pattern(&self) -> Option<&str> {
        self.spec_pattern
            .as_ref()
            .and_then(PatternList::first)
            .filter(|p| !p.trim().is_empty())
    }

    /// Patterns in effect for `testing_type`; the built-in pattern fills in when
    /// none is configured.
    #[must_use]
    pub fn spec_patterns(&self, testing_type: TestingType) -> SpecPatternSet {
        let spec_pattern = self
            .spec_pattern
            .as_ref()
            .map(PatternList::to_vec)
            .filter(|patterns| !patterns.is_empty())
            .unwrap_or_else(|| vec![default_spec_pattern(testing_type).to_string()]);

        SpecPatternSet {
            spec_pattern,
            exclude_spec_pattern: self.exclude_spec_pattern.to_vec(),
        }
    }
}
