use crate::testing_type::{SpecType, TestingType};
use serde::{Deserialize, Serialize};
use spec_paths::{common_root, relative_path, PathStyle};

/// Suffixes that mark a file as a spec, tried in this order in front of the real
/// file extension.
pub const SPEC_SUFFIXES: [&str; 5] = [".spec", ".test", "-spec", "-test", ".cy"];

/// A spec file as shown to users: names, extensions and paths derived from its
/// absolute location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecDescriptor {
    pub absolute: String,
    pub relative: String,
    pub base_name: String,
    pub file_name: String,
    pub file_extension: String,
    pub spec_file_extension: String,
    pub name: String,
    pub relative_to_common_root: String,
    pub spec_type: SpecType,
}

/// Build descriptors for every absolute path found under `project_root`.
///
/// The common root is computed once for the whole batch.
pub fn matched_specs<S: AsRef<str>>(
    project_root: &str,
    testing_type: TestingType,
    absolute_paths: &[S],
    style: PathStyle,
) -> Vec<SpecDescriptor> {
    let posix: Vec<String> = absolute_paths
        .iter()
        .map(|p| style.to_posix(p.as_ref()))
        .collect();
    let root = common_root(&posix);

    absolute_paths
        .iter()
        .map(|absolute| {
            transform_spec(project_root, absolute.as_ref(), testing_type, &root, style)
        })
        .collect()
}

/// Build the descriptor of one spec.
///
/// `common_root` is expected in `/` form. Paths outside `project_root` are kept;
/// their `relative` form simply starts with `..`.
pub fn transform_spec(
    project_root: &str,
    absolute: &str,
    testing_type: TestingType,
    common_root: &str,
    style: PathStyle,
) -> SpecDescriptor {
    let (absolute, project_root) = if style.is_posix() {
        (absolute.to_string(), project_root.to_string())
    } else {
        (style.to_posix(absolute), style.to_posix(project_root))
    };

    let relative = relative_path(&project_root, &absolute);
    let base_name = absolute.rsplit('/').next().unwrap_or_default().to_string();
    let file_extension = extname(&base_name).to_string();

    let spec_file_extension = SPEC_SUFFIXES
        .iter()
        .map(|suffix| format!("{suffix}{file_extension}"))
        .find(|candidate| absolute.ends_with(candidate.as_str()))
        .unwrap_or_else(|| file_extension.clone());

    let file_name = base_name
        .strip_suffix(spec_file_extension.as_str())
        .unwrap_or(&base_name)
        .to_string();

    let name = spec_name(&absolute, &project_root);
    let relative_to_common_root = strip_common_root(&absolute, common_root);

    SpecDescriptor {
        relative,
        base_name,
        file_name,
        file_extension,
        spec_file_extension,
        name,
        relative_to_common_root,
        spec_type: testing_type.spec_type(),
        absolute,
    }
}

/// Extension of a file name including its dot; dotfiles have none.
fn extname(base_name: &str) -> &str {
    match base_name.rfind('.') {
        Some(idx) if idx > 0 => &base_name[idx..],
        _ => "",
    }
}

fn spec_name(absolute: &str, project_root: &str) -> String {
    let tail = if project_root.is_empty() {
        absolute
    } else {
        absolute
            .rfind(project_root)
            .map_or(absolute, |idx| &absolute[idx + project_root.len()..])
    };
    tail.strip_prefix('/').unwrap_or(tail).to_string()
}

fn strip_common_root(absolute: &str, common_root: &str) -> String {
    let stripped = if common_root.is_empty() {
        absolute.to_string()
    } else {
        absolute.replacen(common_root, "", 1)
    };
    stripped
        .strip_prefix(['/', '\\'])
        .map(str::to_string)
        .unwrap_or(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn describes_a_cy_spec() {
        let spec = transform_spec(
            "/project",
            "/project/cypress/e2e/auth/login.cy.ts",
            TestingType::E2e,
            "/project/cypress/e2e",
            PathStyle::POSIX,
        );

        assert_eq!(
            spec,
            SpecDescriptor {
                absolute: "/project/cypress/e2e/auth/login.cy.ts".into(),
                relative: "cypress/e2e/auth/login.cy.ts".into(),
                base_name: "login.cy.ts".into(),
                file_name: "login".into(),
                file_extension: ".ts".into(),
                spec_file_extension: ".cy.ts".into(),
                name: "cypress/e2e/auth/login.cy.ts".into(),
                relative_to_common_root: "auth/login.cy.ts".into(),
                spec_type: SpecType::Integration,
            }
        );
    }

    #[test]
    fn suffixes_are_tried_in_order() {
        let cases = [
            ("button.spec.jsx", ".spec.jsx", "button"),
            ("button.test.js", ".test.js", "button"),
            ("button-spec.ts", "-spec.ts", "button"),
            ("button-test.ts", "-test.ts", "button"),
            ("button.cy.tsx", ".cy.tsx", "button"),
        ];
        for (file, suffix, stem) in cases {
            let spec = transform_spec(
                "/p",
                &format!("/p/src/{file}"),
                TestingType::Component,
                "/p/src",
                PathStyle::POSIX,
            );
            assert_eq!(spec.spec_file_extension, suffix, "{file}");
            assert_eq!(spec.file_name, stem, "{file}");
            assert_eq!(spec.spec_type, SpecType::Component);
        }
    }

    #[test]
    fn plain_files_use_their_extension() {
        let spec = transform_spec("/p", "/p/src/widget.js", TestingType::E2e, "/p", PathStyle::POSIX);
        assert_eq!(spec.spec_file_extension, ".js");
        assert_eq!(spec.file_extension, ".js");
        assert_eq!(spec.file_name, "widget");
        assert_eq!(spec.relative_to_common_root, "src/widget.js");
    }

    #[test]
    fn windows_paths_are_normalized_first() {
        let spec = transform_spec(
            r"C:\work\app",
            r"C:\work\app\cypress\e2e\home.cy.js",
            TestingType::E2e,
            "C:/work/app/cypress/e2e",
            PathStyle::WINDOWS,
        );
        assert_eq!(spec.absolute, "C:/work/app/cypress/e2e/home.cy.js");
        assert_eq!(spec.relative, "cypress/e2e/home.cy.js");
        assert_eq!(spec.name, "cypress/e2e/home.cy.js");
        assert_eq!(spec.relative_to_common_root, "home.cy.js");
    }

    #[test]
    fn specs_outside_the_root_are_accepted() {
        let spec = transform_spec(
            "/work/app",
            "/work/shared/flows.cy.js",
            TestingType::E2e,
            "/work/shared",
            PathStyle::POSIX,
        );
        assert_eq!(spec.relative, "../shared/flows.cy.js");
        assert_eq!(spec.name, "work/shared/flows.cy.js");
    }

    #[test]
    fn matched_specs_share_one_common_root() {
        let specs = matched_specs(
            "/p",
            TestingType::E2e,
            &["/p/cypress/e2e/a.cy.js", "/p/cypress/e2e/nested/b.cy.js"],
            PathStyle::POSIX,
        );
        let rels: Vec<_> = specs.iter().map(|s| s.relative_to_common_root.as_str()).collect();
        assert_eq!(rels, vec!["a.cy.js", "nested/b.cy.js"]);
    }

    #[test]
    fn single_match_uses_parent_as_common_root() {
        let specs = matched_specs("/p", TestingType::E2e, &["/p/cypress/e2e/a.cy.js"], PathStyle::POSIX);
        assert_eq!(specs[0].relative_to_common_root, "a.cy.js");
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let spec = transform_spec("/p", "/p/a.cy.js", TestingType::E2e, "/p", PathStyle::POSIX);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["specFileExtension"], ".cy.js");
        assert_eq!(json["relativeToCommonRoot"], "a.cy.js");
        assert_eq!(json["specType"], "integration");
    }
}
