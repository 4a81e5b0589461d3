use crate::testing_type::TestingType;

pub const DEFAULT_E2E_SPEC_PATTERN: &str = "cypress/e2e/**/*.cy.{js,jsx,ts,tsx}";
pub const DEFAULT_COMPONENT_SPEC_PATTERN: &str = "**/*.cy.{js,jsx,ts,tsx}";
pub const DEFAULT_EXCLUDE_SPEC_PATTERN: &str = "*.hot-update.js";
pub const DEFAULT_SPEC_FILE_EXTENSION: &str = "js";

/// Always ignored by discovery and the watcher.
pub const NODE_MODULES_PATTERN: &str = "**/node_modules/**";

/// Built-in spec pattern for `testing_type`.
#[must_use]
pub const fn default_spec_pattern(testing_type: TestingType) -> &'static str {
    match testing_type {
        TestingType::E2e => DEFAULT_E2E_SPEC_PATTERN,
        TestingType::Component => DEFAULT_COMPONENT_SPEC_PATTERN,
    }
}

/// Suggested path for a new spec when nothing better can be inferred.
#[must_use]
pub fn default_spec_file_name(testing_type: TestingType, extension: &str) -> String {
    format!("cypress/{testing_type}/filename.cy.{extension}")
}
