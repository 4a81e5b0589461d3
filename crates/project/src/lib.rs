//! # Spec Project
//!
//! Project-level spec state: discovery on disk, the watcher that keeps the spec
//! list fresh, and the default filename offered for a new spec.
//!
//! ## Flow
//!
//! ```text
//! ConfigSource ──> SpecQuery ──> find_specs ──> watch::Sender<SpecList>
//!                                   ▲
//!                      SpecWatcher ─┘  (notify events, debounced)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use spec_patterns::{ProjectConfig, TestingType};
//! use spec_project::ProjectSpecs;
//!
//! # async fn run() -> spec_project::Result<()> {
//! let mut project = ProjectSpecs::new(ProjectConfig::default());
//! project.set_current_project(Some("/path/to/project".into()));
//! project.set_testing_type(Some(TestingType::E2e));
//!
//! let query = project.spec_query().await?;
//! project.start_spec_watcher(query).await?;
//! let mut updates = project.subscribe();
//! updates.changed().await.ok();
//! println!("{} specs", updates.borrow().len());
//! project.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod config_source;
mod discovery;
mod error;
mod project;
mod suggestion;
mod watcher;

pub use config_source::ConfigSource;
pub use discovery::{files_by_glob, find_specs, GlobOptions, SpecQuery};
pub use error::{ProjectError, Result};
pub use project::ProjectSpecs;
pub use suggestion::SpecFileSuggestion;
pub use watcher::{SpecList, SpecWatcher, WatcherConfig};
