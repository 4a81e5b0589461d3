use crate::error::Result;
use spec_paths::{normalize_for_platform, PathStyle};
use spec_patterns::{
    matched_specs, GlobList, ProjectConfig, SpecDescriptor, TestingType, DEFAULT_E2E_SPEC_PATTERN,
    NODE_MODULES_PATTERN,
};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// How [`files_by_glob`] reports and filters its results.
#[derive(Debug, Clone, Default)]
pub struct GlobOptions {
    /// Return absolute paths instead of root-relative ones.
    pub absolute: bool,
    /// Globs whose matches are dropped.
    pub ignore: Vec<String>,
}

/// Files under `root` matching any of `patterns`, sorted.
///
/// Patterns are matched against `/`-separated root-relative paths. `node_modules`
/// is never entered.
pub async fn files_by_glob(
    root: &Path,
    patterns: &[String],
    options: GlobOptions,
) -> Result<Vec<PathBuf>> {
    let include = GlobList::new(patterns)?;
    let mut ignore_patterns = options.ignore;
    ignore_patterns.push(NODE_MODULES_PATTERN.to_string());
    let ignore = GlobList::lenient(&ignore_patterns);

    let root = root.to_path_buf();
    let absolute = options.absolute;
    tokio::task::spawn_blocking(move || walk_matching(&root, &include, &ignore, absolute)).await?
}

fn walk_matching(
    root: &Path,
    include: &GlobList,
    ignore: &GlobList,
    absolute: bool,
) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    let walker = WalkDir::new(root).follow_links(true).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !SKIPPED_DIRS.iter().any(|skip| entry.file_name() == *skip)
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                log::debug!("Skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative = normalize_for_platform(&relative.to_string_lossy());
        if !include.is_match(&relative) || ignore.is_match(&relative) {
            continue;
        }

        found.push(if absolute {
            entry.path().to_path_buf()
        } else {
            PathBuf::from(relative)
        });
    }

    found.sort();
    Ok(found)
}

/// Everything one discovery pass needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecQuery {
    pub project_root: PathBuf,
    pub testing_type: TestingType,
    pub spec_pattern: Vec<String>,
    pub exclude_spec_pattern: Vec<String>,
    /// Extra globs to skip, e.g. e2e specs while listing component specs.
    pub additional_ignore_pattern: Vec<String>,
}

impl SpecQuery {
    /// Query for the patterns `config` resolves to under `testing_type`.
    pub fn for_testing_type(
        project_root: impl Into<PathBuf>,
        testing_type: TestingType,
        config: &ProjectConfig,
    ) -> Self {
        let patterns = config.spec_patterns(testing_type);
        let additional_ignore_pattern = match testing_type {
            TestingType::Component => vec![DEFAULT_E2E_SPEC_PATTERN.to_string()],
            TestingType::E2e => Vec::new(),
        };

        Self {
            project_root: project_root.into(),
            testing_type,
            spec_pattern: patterns.spec_pattern,
            exclude_spec_pattern: patterns.exclude_spec_pattern,
            additional_ignore_pattern,
        }
    }

    /// Exclude and additional ignore globs together.
    #[must_use]
    pub fn ignore_patterns(&self) -> Vec<String> {
        self.exclude_spec_pattern
            .iter()
            .chain(&self.additional_ignore_pattern)
            .cloned()
            .collect()
    }
}

/// Expand the query's spec patterns on disk and describe every match.
pub async fn find_specs(query: &SpecQuery) -> Result<Vec<SpecDescriptor>> {
    let files = files_by_glob(
        &query.project_root,
        &query.spec_pattern,
        GlobOptions {
            absolute: true,
            ignore: query.ignore_patterns(),
        },
    )
    .await?;

    let absolute: Vec<String> = files
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    let root = query.project_root.to_string_lossy();

    let specs = matched_specs(&root, query.testing_type, &absolute, PathStyle::native());
    log::debug!(
        "Found {} {} specs under {}",
        specs.len(),
        query.testing_type,
        query.project_root.display()
    );
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "describe('x', () => {})").unwrap();
    }

    #[tokio::test]
    async fn relative_results_are_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "cypress/e2e/b.cy.js");
        touch(dir.path(), "cypress/e2e/a.cy.js");
        touch(dir.path(), "cypress/e2e/readme.md");
        touch(dir.path(), "node_modules/pkg/cypress/e2e/c.cy.js");

        let files = files_by_glob(
            dir.path(),
            &["**/*.cy.js".to_string()],
            GlobOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("cypress/e2e/a.cy.js"),
                PathBuf::from("cypress/e2e/b.cy.js")
            ]
        );
    }

    #[tokio::test]
    async fn ignore_patterns_drop_matches() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "cypress/e2e/keep.cy.js");
        touch(dir.path(), "cypress/e2e/drop.cy.js");

        let files = files_by_glob(
            dir.path(),
            &["cypress/e2e/*.cy.js".to_string()],
            GlobOptions {
                absolute: true,
                ignore: vec!["**/drop.cy.js".to_string()],
            },
        )
        .await
        .unwrap();

        assert_eq!(files, vec![dir.path().join("cypress/e2e/keep.cy.js")]);
    }

    #[tokio::test]
    async fn invalid_spec_pattern_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = files_by_glob(dir.path(), &["a/{b".to_string()], GlobOptions::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let result =
            files_by_glob(&missing, &["**/*".to_string()], GlobOptions::default()).await;
        assert!(result.is_err());
    }

    #[test]
    fn component_queries_ignore_e2e_specs() {
        let query = SpecQuery::for_testing_type("/p", TestingType::Component, &ProjectConfig::default());
        assert_eq!(query.spec_pattern, vec!["**/*.cy.{js,jsx,ts,tsx}"]);
        assert_eq!(
            query.ignore_patterns(),
            vec!["*.hot-update.js".to_string(), DEFAULT_E2E_SPEC_PATTERN.to_string()]
        );

        let e2e = SpecQuery::for_testing_type("/p", TestingType::E2e, &ProjectConfig::default());
        assert!(e2e.additional_ignore_pattern.is_empty());
    }
}
