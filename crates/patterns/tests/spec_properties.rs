//! Properties that hold across descriptors, membership and example generation

use spec_paths::PathStyle;
use spec_patterns::{
    example_from_glob, matched_specs, SpecPatternMatcher, SpecPatternSet, TestingType,
};

const PROJECT: &str = "/home/dev/shop";

fn sample_paths() -> Vec<String> {
    [
        "cypress/e2e/login.cy.ts",
        "cypress/e2e/cart/add-item.spec.js",
        "cypress/e2e/cart/remove-item-test.jsx",
        "cypress/e2e/legacy/old-spec.coffee",
        "cypress/e2e/helpers/util.js",
        "cypress/e2e/weird.test",
    ]
    .iter()
    .map(|rel| format!("{PROJECT}/{rel}"))
    .collect()
}

#[test]
fn base_name_is_file_name_plus_spec_extension() {
    let specs = matched_specs(PROJECT, TestingType::E2e, &sample_paths(), PathStyle::POSIX);
    assert_eq!(specs.len(), 6);

    for spec in &specs {
        if spec.spec_file_extension.ends_with(&spec.file_extension) {
            assert_eq!(
                format!("{}{}", spec.file_name, spec.spec_file_extension),
                spec.base_name,
                "{spec:?}"
            );
        }
    }
}

#[test]
fn non_compound_specs_keep_plain_extension() {
    let specs = matched_specs(PROJECT, TestingType::E2e, &sample_paths(), PathStyle::POSIX);
    let util = specs
        .iter()
        .find(|s| s.base_name == "util.js")
        .expect("util.js present");
    assert_eq!(util.spec_file_extension, util.file_extension);
    assert_eq!(util.file_name, "util");
}

#[test]
fn descriptors_are_relative_to_project_and_common_root() {
    let specs = matched_specs(PROJECT, TestingType::E2e, &sample_paths(), PathStyle::POSIX);
    let cart = specs
        .iter()
        .find(|s| s.base_name == "add-item.spec.js")
        .expect("cart spec present");
    assert_eq!(cart.relative, "cypress/e2e/cart/add-item.spec.js");
    assert_eq!(cart.name, "cypress/e2e/cart/add-item.spec.js");
    assert_eq!(cart.relative_to_common_root, "cart/add-item.spec.js");
}

#[test]
fn exclusion_precedes_inclusion_for_every_path() {
    let patterns = SpecPatternSet {
        spec_pattern: vec!["cypress/e2e/**/*".to_string()],
        exclude_spec_pattern: vec!["**/helpers/**".to_string(), "*.coffee".to_string()],
    };
    let matcher = SpecPatternMatcher::new(&patterns);

    for path in sample_paths() {
        let rel = path.trim_start_matches(&format!("{PROJECT}/")).to_string();
        let excluded = matcher.is_excluded(&rel);
        assert_eq!(matcher.matches(&rel), !excluded, "{rel}");
    }
    assert!(!matcher.matches("cypress/e2e/helpers/util.js"));
    assert!(!matcher.matches("cypress/e2e/legacy/old-spec.coffee"));
}

#[test]
fn example_from_default_like_glob() {
    let example = example_from_glob("cypress/e2e/**/*.cy.js", TestingType::E2e, Some("js"))
        .expect("valid glob")
        .expect("candidate");
    assert!(example.ends_with(".cy.js"));
    let dir = example.rsplit_once('/').map(|(dir, _)| dir).unwrap_or_default();
    assert!(dir.contains("e2e"));
}

#[test]
fn example_from_glob_matches_its_glob() {
    let globs = [
        "cypress/e2e/**/*.cy.{js,ts}",
        "tests/*/specs/*.spec.ts",
        "src/**/*.test.jsx",
    ];
    for glob in globs {
        let example = example_from_glob(glob, TestingType::E2e, None)
            .unwrap()
            .unwrap();
        let matcher = SpecPatternMatcher::new(&SpecPatternSet {
            spec_pattern: vec![glob.to_string()],
            exclude_spec_pattern: vec![],
        });
        assert!(matcher.matches(&example), "{example} should match {glob}");
    }
}
