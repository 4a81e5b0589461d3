use crate::config_source::ConfigSource;
use crate::discovery::{find_specs, SpecQuery};
use crate::error::Result;
use crate::ProjectError;
use log::{debug, error, info, warn};
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use spec_paths::normalize_for_platform;
use spec_patterns::{GlobList, SpecDescriptor, NODE_MODULES_PATTERN};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time;

/// Last discovered spec list; replaced as a whole after every pass.
pub type SpecList = Arc<Vec<SpecDescriptor>>;

#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Quiet period after the last filesystem event before specs are rediscovered.
    pub debounce: Duration,
    pub notify_poll_interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(250),
            notify_poll_interval: Duration::from_secs(2),
        }
    }
}

enum WatcherCommand {
    Refresh,
    Shutdown,
}

/// Keeps a spec list current while files under the project root change.
///
/// Bursts of filesystem events collapse into one discovery pass. With a config
/// source, every pass re-reads it and re-resolves the spec patterns, so edited
/// patterns apply without a restart; the project root and testing type stay
/// those of the starting query. Dropping the watcher stops it;
/// [`SpecWatcher::close`] also waits for the loop to finish.
pub struct SpecWatcher {
    command_tx: mpsc::Sender<WatcherCommand>,
    task: Option<JoinHandle<()>>,
    fs_watcher: Option<RecommendedWatcher>,
}

impl SpecWatcher {
    /// Start watching `query.project_root`. Must be called inside a Tokio runtime.
    pub fn start(
        query: SpecQuery,
        config: WatcherConfig,
        config_source: Option<Arc<dyn ConfigSource>>,
        specs_tx: watch::Sender<SpecList>,
    ) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel(1024);
        let (command_tx, command_rx) = mpsc::channel(16);

        let fs_watcher =
            create_fs_watcher(&query.project_root, event_tx, config.notify_poll_interval)?;
        let task = spawn_discovery_loop(
            DiscoveryContext {
                query,
                config_source,
                specs_tx,
            },
            config.debounce,
            event_rx,
            command_rx,
        );

        Ok(Self {
            command_tx,
            task: Some(task),
            fs_watcher: Some(fs_watcher),
        })
    }

    /// Run a discovery pass now instead of waiting for a filesystem event.
    pub async fn refresh(&self) -> Result<()> {
        self.command_tx
            .send(WatcherCommand::Refresh)
            .await
            .map_err(|e| ProjectError::Other(format!("failed to send refresh: {e}")))?;
        Ok(())
    }

    /// Stop watching and wait for the loop to exit. Never fails.
    pub async fn close(mut self) {
        drop(self.fs_watcher.take());
        let _ = self.command_tx.send(WatcherCommand::Shutdown).await;
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                debug!("Spec watcher task ended abnormally: {err}");
            }
        }
    }
}

impl Drop for SpecWatcher {
    fn drop(&mut self) {
        let _ = self.command_tx.try_send(WatcherCommand::Shutdown);
    }
}

fn create_fs_watcher(
    root: &Path,
    sender: mpsc::Sender<notify::Result<Event>>,
    poll_interval: Duration,
) -> Result<RecommendedWatcher> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = sender.blocking_send(res);
        },
        NotifyConfig::default().with_poll_interval(poll_interval),
    )?;
    watcher.watch(root, RecursiveMode::Recursive)?;
    Ok(watcher)
}

struct DiscoveryContext {
    query: SpecQuery,
    config_source: Option<Arc<dyn ConfigSource>>,
    specs_tx: watch::Sender<SpecList>,
}

impl DiscoveryContext {
    /// Event paths matching these never schedule a pass.
    fn ignored(&self) -> GlobList {
        let mut ignored = self.query.exclude_spec_pattern.clone();
        ignored.push(NODE_MODULES_PATTERN.to_string());
        GlobList::lenient(&ignored)
    }

    async fn reload_query(&mut self) {
        let Some(source) = &self.config_source else {
            return;
        };
        match source.full_initial_config().await {
            Ok(config) => {
                self.query = SpecQuery::for_testing_type(
                    self.query.project_root.clone(),
                    self.query.testing_type,
                    &config,
                );
            }
            Err(err) => warn!("Keeping previous spec patterns: {err}"),
        }
    }

    async fn run(&mut self) {
        self.reload_query().await;
        let started = Instant::now();
        match find_specs(&self.query).await {
            Ok(specs) => {
                info!(
                    "Rediscovered {} specs in {}ms",
                    specs.len(),
                    started.elapsed().as_millis()
                );
                self.specs_tx.send_replace(Arc::new(specs));
            }
            Err(err) => error!("Spec discovery failed: {err}"),
        }
    }
}

fn spawn_discovery_loop(
    mut context: DiscoveryContext,
    debounce: Duration,
    mut event_rx: mpsc::Receiver<notify::Result<Event>>,
    mut command_rx: mpsc::Receiver<WatcherCommand>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ignored = context.ignored();
        let mut state = DebounceState::new(debounce);

        loop {
            let next_deadline = state.next_deadline();

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    handle_event(&context.query.project_root, &ignored, event, &mut state);
                }
                cmd = command_rx.recv() => {
                    match cmd {
                        Some(WatcherCommand::Refresh) => state.force_run(),
                        Some(WatcherCommand::Shutdown) | None => break,
                    }
                }
                () = async {
                    if let Some(deadline) = next_deadline {
                        time::sleep_until(deadline).await;
                    }
                }, if next_deadline.is_some() => {
                    state.reset();
                    context.run().await;
                    ignored = context.ignored();
                }
            }
        }

        debug!("Spec watcher for {} stopped", context.query.project_root.display());
    })
}

fn handle_event(
    root: &Path,
    ignored: &GlobList,
    event: notify::Result<Event>,
    state: &mut DebounceState,
) -> bool {
    match event {
        Ok(evt) => {
            if matches!(evt.kind, EventKind::Access(_)) {
                return false;
            }
            let relevant = evt.paths.is_empty()
                || evt
                    .paths
                    .iter()
                    .any(|path| is_relevant_path(root, ignored, path));
            if relevant {
                state.record_event();
            }
            relevant
        }
        Err(err) => {
            warn!("Watcher error: {err}");
            false
        }
    }
}

fn is_relevant_path(root: &Path, ignored: &GlobList, path: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return true;
    };
    if relative
        .components()
        .next()
        .is_some_and(|first| first.as_os_str() == ".git")
    {
        return false;
    }
    let relative = normalize_for_platform(&relative.to_string_lossy());
    !ignored.is_match(&relative)
}

/// Single pending deadline; `None` means nothing is scheduled.
struct DebounceState {
    debounce: Duration,
    deadline: Option<time::Instant>,
}

impl DebounceState {
    const fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            deadline: None,
        }
    }

    /// Every event pushes the deadline out by a full debounce interval.
    fn record_event(&mut self) {
        self.deadline = Some(time::Instant::now() + self.debounce);
    }

    fn force_run(&mut self) {
        self.deadline = Some(time::Instant::now());
    }

    const fn next_deadline(&self) -> Option<time::Instant> {
        self.deadline
    }

    fn reset(&mut self) {
        self.deadline = None;
    }
}
