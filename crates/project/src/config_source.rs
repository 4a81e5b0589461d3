use async_trait::async_trait;
use spec_patterns::ProjectConfig;
use std::sync::Arc;

/// Where the resolved project configuration comes from.
///
/// Implementations may read files or ask another process; callers treat any
/// error as "configuration unavailable".
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn full_initial_config(&self) -> anyhow::Result<ProjectConfig>;
}

#[async_trait]
impl ConfigSource for ProjectConfig {
    async fn full_initial_config(&self) -> anyhow::Result<ProjectConfig> {
        Ok(self.clone())
    }
}

#[async_trait]
impl<T: ConfigSource + ?Sized> ConfigSource for Arc<T> {
    async fn full_initial_config(&self) -> anyhow::Result<ProjectConfig> {
        (**self).full_initial_config().await
    }
}
