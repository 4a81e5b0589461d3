use crate::config_source::ConfigSource;
use crate::discovery::{find_specs, SpecQuery};
use crate::error::{ProjectError, Result};
use crate::suggestion::SpecFileSuggestion;
use crate::watcher::{SpecList, SpecWatcher, WatcherConfig};
use spec_paths::longest_common_prefix;
use spec_patterns::{
    default_spec_file_name, default_spec_pattern, example_from_glob, ProjectConfig,
    SpecDescriptor, SpecPatternMatcher, SpecPatternSet, TestingType, DEFAULT_SPEC_FILE_EXTENSION,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

/// Spec state of the currently open project.
///
/// Owns the last discovered spec list and, while running, the spec watcher that
/// keeps it fresh.
pub struct ProjectSpecs {
    project_root: Option<PathBuf>,
    testing_type: Option<TestingType>,
    config: Arc<dyn ConfigSource>,
    watcher_config: WatcherConfig,
    specs_tx: watch::Sender<SpecList>,
    watcher: Option<SpecWatcher>,
}

impl ProjectSpecs {
    pub fn new(config: impl ConfigSource + 'static) -> Self {
        let (specs_tx, _) = watch::channel(SpecList::default());
        Self {
            project_root: None,
            testing_type: None,
            config: Arc::new(config),
            watcher_config: WatcherConfig::default(),
            specs_tx,
            watcher: None,
        }
    }

    #[must_use]
    pub fn with_watcher_config(mut self, config: WatcherConfig) -> Self {
        self.watcher_config = config;
        self
    }

    pub fn set_current_project(&mut self, root: Option<PathBuf>) {
        self.project_root = root;
    }

    pub fn set_testing_type(&mut self, testing_type: Option<TestingType>) {
        self.testing_type = testing_type;
    }

    #[must_use]
    pub fn current_project(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    #[must_use]
    pub const fn testing_type(&self) -> Option<TestingType> {
        self.testing_type
    }

    #[must_use]
    pub fn specs(&self) -> SpecList {
        self.specs_tx.borrow().clone()
    }

    /// Receiver notified each time the spec list is replaced.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SpecList> {
        self.specs_tx.subscribe()
    }

    pub fn set_specs(&self, specs: Vec<SpecDescriptor>) {
        self.specs_tx.send_replace(Arc::new(specs));
    }

    #[must_use]
    pub const fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    async fn load_config(&self) -> Result<ProjectConfig> {
        self.config
            .full_initial_config()
            .await
            .map_err(ProjectError::ConfigError)
    }

    /// Include/exclude globs in effect for the active testing type.
    pub async fn spec_patterns(&self) -> Result<SpecPatternSet> {
        let testing_type = self.testing_type.ok_or(ProjectError::NoTestingType)?;
        Ok(self.load_config().await?.spec_patterns(testing_type))
    }

    /// Discovery query for the current project and testing type.
    pub async fn spec_query(&self) -> Result<SpecQuery> {
        let root = self
            .project_root
            .clone()
            .ok_or(ProjectError::NoCurrentProject)?;
        let testing_type = self.testing_type.ok_or(ProjectError::NoTestingType)?;
        let config = self.load_config().await?;
        Ok(SpecQuery::for_testing_type(root, testing_type, &config))
    }

    /// Discover specs for the current project and make them the known list.
    pub async fn find_specs(&self) -> Result<SpecList> {
        let query = self.spec_query().await?;
        let specs = Arc::new(find_specs(&query).await?);
        self.specs_tx.send_replace(specs.clone());
        Ok(specs)
    }

    /// Replace any running watcher with one for `query`.
    ///
    /// Each watcher pass re-reads the config source, so pattern edits apply to
    /// the next pass without restarting.
    ///
    /// Calling this without a current project is a caller bug and yields
    /// [`ProjectError::NoCurrentProject`].
    pub async fn start_spec_watcher(&mut self, query: SpecQuery) -> Result<()> {
        self.stop_spec_watcher().await;

        if self.project_root.is_none() {
            return Err(ProjectError::NoCurrentProject);
        }

        log::info!(
            "Watching {} for {} specs",
            query.project_root.display(),
            query.testing_type
        );
        let watcher = SpecWatcher::start(
            query,
            self.watcher_config.clone(),
            Some(self.config.clone()),
            self.specs_tx.clone(),
        )?;
        self.watcher = Some(watcher);
        Ok(())
    }

    /// Stop the spec watcher if one is running. Safe to call repeatedly.
    pub async fn stop_spec_watcher(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.close().await;
        }
    }

    /// Ask the running watcher for an immediate discovery pass.
    pub async fn refresh_specs(&self) -> Result<()> {
        match &self.watcher {
            Some(watcher) => watcher.refresh().await,
            None => self.find_specs().await.map(|_| ()),
        }
    }

    /// Path to offer when the user creates a new spec.
    ///
    /// `None` until a project and testing type are set. Inference failures are
    /// logged and produce [`SpecFileSuggestion::Default`].
    pub async fn default_spec_file_name(&self) -> Option<SpecFileSuggestion> {
        self.project_root.as_ref()?;
        let testing_type = self.testing_type?;

        let config = match self.load_config().await {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Using default spec file name: {err}");
                return Some(SpecFileSuggestion::Default(default_spec_file_name(
                    testing_type,
                    DEFAULT_SPEC_FILE_EXTENSION,
                )));
            }
        };
        let default_path = default_spec_file_name(testing_type, &config.spec_file_extension);

        let suggestion = match self.infer_spec_file_name(testing_type, &config) {
            Ok(Some(path)) => SpecFileSuggestion::Inferred(path),
            Ok(None) => SpecFileSuggestion::Default(default_path),
            Err(err) => {
                log::warn!("Using default spec file name: {err}");
                SpecFileSuggestion::Default(default_path)
            }
        };
        Some(suggestion)
    }

    fn infer_spec_file_name(
        &self,
        testing_type: TestingType,
        config: &ProjectConfig,
    ) -> Result<Option<String>> {
        let Some(active) = config.active_spec_pattern() else {
            return Ok(None);
        };
        if active == default_spec_pattern(testing_type) {
            return Ok(None);
        }

        let specs = self.specs();
        let relatives: Vec<&str> = specs.iter().map(|spec| spec.relative.as_str()).collect();
        let prefix = longest_common_prefix(&relatives);
        if !prefix.is_empty() {
            return Ok(Some(prefix));
        }

        Ok(example_from_glob(
            active,
            testing_type,
            Some(&config.spec_file_extension),
        )?)
    }

    /// Whether `path` (absolute or project-relative) is a spec under the current
    /// patterns. Exclusion wins over inclusion.
    pub async fn matches_spec_pattern(&self, path: impl AsRef<Path>) -> bool {
        let Some(root) = self.project_root.as_deref() else {
            return false;
        };
        if self.testing_type.is_none() {
            return false;
        }

        let patterns = match self.spec_patterns().await {
            Ok(patterns) => patterns,
            Err(err) => {
                log::warn!("Cannot check spec pattern: {err}");
                return false;
            }
        };

        let path = path.as_ref();
        let relative = path.strip_prefix(root).unwrap_or(path);
        SpecPatternMatcher::new(&patterns).matches(&relative.to_string_lossy())
    }

    /// Stop background work before the project is closed.
    pub async fn shutdown(mut self) {
        self.stop_spec_watcher().await;
    }
}
