use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProjectError>;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Cannot start spec watcher without current project")]
    NoCurrentProject,

    #[error("No testing type selected")]
    NoTestingType,

    #[error("Walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Watcher error: {0}")]
    WatcherError(#[from] notify::Error),

    #[error("Pattern error: {0}")]
    PatternError(#[from] spec_patterns::SpecError),

    #[error("Config error: {0}")]
    ConfigError(#[source] anyhow::Error),

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("{0}")]
    Other(String),
}
