use crate::config::SpecPatternSet;
use crate::error::{Result, SpecError};
use globset::{GlobBuilder, GlobMatcher};

/// Strip `./` prefixes and use forward slashes so globs and paths line up.
#[must_use]
pub fn normalize_match_path(raw: &str) -> String {
    let mut value = raw.trim().replace('\\', "/");
    while let Some(rest) = value.strip_prefix("./") {
        value = rest.to_string();
    }
    value
}

#[derive(Debug, Clone)]
struct CompiledGlob {
    matcher: GlobMatcher,
    /// Slash-free patterns are matched against the file name alone.
    basename_only: bool,
}

impl CompiledGlob {
    fn compile(pattern: &str) -> Result<Self> {
        let normalized = normalize_match_path(pattern);
        let matcher = GlobBuilder::new(&normalized)
            .literal_separator(true)
            .case_insensitive(false)
            .build()
            .map_err(|source| SpecError::InvalidGlob {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();
        Ok(Self {
            matcher,
            basename_only: !normalized.contains('/'),
        })
    }

    fn is_match(&self, path: &str) -> bool {
        if self.basename_only {
            let base = path.rsplit('/').next().unwrap_or(path);
            return self.matcher.is_match(base);
        }
        self.matcher.is_match(path)
    }
}

/// An ordered list of compiled globs; matches when any entry does.
#[derive(Debug, Clone, Default)]
pub struct GlobList {
    globs: Vec<CompiledGlob>,
}

impl GlobList {
    /// Compile every pattern, failing on the first invalid one.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let globs = patterns
            .iter()
            .map(|p| CompiledGlob::compile(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { globs })
    }

    /// Compile what can be compiled; invalid patterns are logged and skipped.
    pub fn lenient<S: AsRef<str>>(patterns: &[S]) -> Self {
        let globs = patterns
            .iter()
            .filter_map(|p| match CompiledGlob::compile(p.as_ref()) {
                Ok(glob) => Some(glob),
                Err(err) => {
                    log::warn!("Skipping spec pattern: {err}");
                    None
                }
            })
            .collect();
        Self { globs }
    }

    /// `path` must already be normalized with [`normalize_match_path`].
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.globs.iter().any(|glob| glob.is_match(path))
    }
}

/// Decides whether a path is a spec under the configured include/exclude globs.
///
/// Exclusion always wins over inclusion. Matching is case-sensitive and wildcards
/// match dotfiles.
#[derive(Debug, Clone, Default)]
pub struct SpecPatternMatcher {
    include: GlobList,
    exclude: GlobList,
}

impl SpecPatternMatcher {
    pub fn new(patterns: &SpecPatternSet) -> Self {
        Self {
            include: GlobList::lenient(&patterns.spec_pattern),
            exclude: GlobList::lenient(&patterns.exclude_spec_pattern),
        }
    }

    /// Like [`SpecPatternMatcher::new`] but rejects invalid globs.
    pub fn try_new(patterns: &SpecPatternSet) -> Result<Self> {
        Ok(Self {
            include: GlobList::new(&patterns.spec_pattern)?,
            exclude: GlobList::new(&patterns.exclude_spec_pattern)?,
        })
    }

    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude.is_match(&normalize_match_path(path))
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize_match_path(path);
        if self.exclude.is_match(&path) {
            return false;
        }
        self.include.is_match(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(include: &[&str], exclude: &[&str]) -> SpecPatternSet {
        SpecPatternSet {
            spec_pattern: include.iter().map(|s| s.to_string()).collect(),
            exclude_spec_pattern: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn include_pattern_matches_specs() {
        let matcher = SpecPatternMatcher::new(&set(&["cypress/e2e/**/*.cy.{js,ts}"], &[]));
        assert!(matcher.matches("cypress/e2e/login.cy.ts"));
        assert!(matcher.matches("cypress/e2e/admin/users.cy.js"));
        assert!(!matcher.matches("cypress/e2e/login.ts"));
        assert!(!matcher.matches("src/login.cy.ts"));
    }

    #[test]
    fn exclusion_wins() {
        let matcher = SpecPatternMatcher::new(&set(
            &["cypress/e2e/**/*.cy.js"],
            &["cypress/e2e/skip/**"],
        ));
        assert!(matcher.matches("cypress/e2e/run.cy.js"));
        assert!(!matcher.matches("cypress/e2e/skip/run.cy.js"));
        assert!(matcher.is_excluded("cypress/e2e/skip/run.cy.js"));
    }

    #[test]
    fn slash_free_patterns_match_basenames() {
        let matcher = SpecPatternMatcher::new(&set(&["**/*.js"], &["*.hot-update.js"]));
        assert!(matcher.matches("cypress/e2e/main.js"));
        assert!(!matcher.matches("cypress/e2e/main.hot-update.js"));
        let basename_include = SpecPatternMatcher::new(&set(&["*.cy.js"], &[]));
        assert!(basename_include.matches("deep/nested/a.cy.js"));
    }

    #[test]
    fn star_does_not_cross_directories() {
        let matcher = SpecPatternMatcher::new(&set(&["cypress/*.cy.js"], &[]));
        assert!(matcher.matches("cypress/a.cy.js"));
        assert!(!matcher.matches("cypress/e2e/a.cy.js"));
    }

    #[test]
    fn dotfiles_are_matched_and_case_matters() {
        let matcher = SpecPatternMatcher::new(&set(&["specs/*.js"], &[]));
        assert!(matcher.matches("specs/.hidden.js"));
        assert!(!matcher.matches("SPECS/a.js"));
    }

    #[test]
    fn paths_are_normalized() {
        let matcher = SpecPatternMatcher::new(&set(&["./cypress/e2e/*.cy.js"], &[]));
        assert!(matcher.matches(r"cypress\e2e\a.cy.js"));
        assert!(matcher.matches("./cypress/e2e/a.cy.js"));
    }

    #[test]
    fn invalid_patterns() {
        assert!(SpecPatternMatcher::try_new(&set(&["a/{b"], &[])).is_err());
        let lenient = SpecPatternMatcher::new(&set(&["a/{b", "*.cy.js"], &[]));
        assert!(lenient.matches("x/y.cy.js"));
    }

    #[test]
    fn empty_include_matches_nothing() {
        let matcher = SpecPatternMatcher::new(&set(&[], &[]));
        assert!(!matcher.matches("cypress/e2e/a.cy.js"));
    }
}
