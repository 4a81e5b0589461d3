use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpecError>;

#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Invalid glob pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Cannot build example path from {pattern:?}: {source}")]
    InvalidExamplePattern {
        pattern: String,
        #[source]
        source: Box<regex_syntax::Error>,
    },

    #[error("Example pattern {0:?} matches no string")]
    UnsatisfiablePattern(String),
}
