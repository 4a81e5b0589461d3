use serde::Serialize;

/// Filename proposed for a new spec.
///
/// `Default` means nothing could be inferred from the project's specs or pattern
/// (or inference failed) and the fixed template path is offered instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "path", rename_all = "snake_case")]
pub enum SpecFileSuggestion {
    Inferred(String),
    Default(String),
}

impl SpecFileSuggestion {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Inferred(path) | Self::Default(path) => path,
        }
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}
