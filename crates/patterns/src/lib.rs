//! # Spec Patterns
//!
//! Pure spec bookkeeping: what a spec looks like, which paths are specs, and where
//! a new spec should go.
//!
//! ## Pieces
//!
//! ```text
//! absolute paths ──> matched_specs ──> SpecDescriptor[]
//!
//! SpecPatternSet ──> SpecPatternMatcher::matches(path)   (exclude first)
//!
//! spec glob ──> example_from_glob ──> "cypress/e2e/filename.cy.js"
//! ```
//!
//! ## Example
//!
//! ```
//! use spec_patterns::{example_from_glob, TestingType};
//!
//! let example = example_from_glob("cypress/e2e/**/*.cy.{js,ts}", TestingType::E2e, Some("ts"))
//!     .unwrap();
//! assert_eq!(example.as_deref(), Some("cypress/e2e/filename.cy.ts"));
//! ```

mod braces;
mod config;
mod defaults;
mod descriptor;
mod error;
mod glob_example;
mod membership;
mod testing_type;

pub use braces::expand_braces;
pub use config::{PatternList, ProjectConfig, SpecPatternSet};
pub use defaults::{
    default_spec_file_name, default_spec_pattern, DEFAULT_COMPONENT_SPEC_PATTERN,
    DEFAULT_E2E_SPEC_PATTERN, DEFAULT_EXCLUDE_SPEC_PATTERN, DEFAULT_SPEC_FILE_EXTENSION,
    NODE_MODULES_PATTERN,
};
pub use descriptor::{matched_specs, transform_spec, SpecDescriptor, SPEC_SUFFIXES};
pub use error::{Result, SpecError};
pub use glob_example::{
    example_from_glob, generate_match, is_glob, ANY_ROOT_PLACEHOLDER, EXTENSION_PLACEHOLDER,
    FILENAME_PLACEHOLDER,
};
pub use membership::{normalize_match_path, GlobList, SpecPatternMatcher};
pub use testing_type::{SpecType, TestingType};
