//! Brace expansion for glob patterns (`{a,b}`, nested groups, `{1..3}` ranges).

/// Expand every brace group in `pattern`, left to right.
///
/// Expansions are produced lazily, so taking the first few items of a huge
/// `{1..N}` range is cheap. Unbalanced braces and single-item groups are kept
/// literally.
pub fn expand_braces(pattern: &str) -> impl Iterator<Item = String> {
    expand(pattern)
}

type Expansions = Box<dyn Iterator<Item = String>>;

fn expand(pattern: &str) -> Expansions {
    let Some((open, close)) = first_group(pattern) else {
        return Box::new(std::iter::once(pattern.to_string()));
    };

    let prefix = pattern[..open].to_string();
    let body = &pattern[open + 1..close];
    let suffix = pattern[close + 1..].to_string();

    let alternatives: Expansions = match split_alternatives(body) {
        Some(parts) => Box::new(parts.into_iter()),
        None => match expand_range(body) {
            Some(items) => items,
            None => {
                // Literal group: keep it and continue expanding after it.
                let head = format!("{prefix}{{{body}}}");
                return Box::new(expand(&suffix).map(move |rest| format!("{head}{rest}")));
            }
        },
    };

    Box::new(alternatives.flat_map(move |alternative| {
        let suffix = suffix.clone();
        expand(&format!("{prefix}{alternative}"))
            .flat_map(move |head| expand(&suffix).map(move |tail| format!("{head}{tail}")))
    }))
}

/// Byte offsets of the first balanced, unescaped `{ ... }` group.
fn first_group(pattern: &str) -> Option<(usize, usize)> {
    let bytes = pattern.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'{' => {
                let mut depth = 0usize;
                let mut j = i;
                while j < bytes.len() {
                    match bytes[j] {
                        b'\\' => j += 1,
                        b'{' => depth += 1,
                        b'}' => {
                            depth -= 1;
                            if depth == 0 {
                                return Some((i, j));
                            }
                        }
                        _ => {}
                    }
                    j += 1;
                }
                return None;
            }
            _ => i += 1,
        }
    }
    None
}

/// Split a group body on top-level commas; `None` when there is no comma.
fn split_alternatives(body: &str) -> Option<Vec<String>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut escaped = false;
    for (idx, ch) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(body[start..idx].to_string());
                start = idx + 1;
            }
            _ => {}
        }
    }
    if parts.is_empty() {
        return None;
    }
    parts.push(body[start..].to_string());
    Some(parts)
}

/// Lazily expand `a..b` numeric or single-letter ranges.
fn expand_range(body: &str) -> Option<Expansions> {
    let (from, to) = body.split_once("..")?;

    if let (Ok(a), Ok(b)) = (from.parse::<i64>(), to.parse::<i64>()) {
        let items: Expansions = if a <= b {
            Box::new((a..=b).map(|n| n.to_string()))
        } else {
            Box::new((b..=a).rev().map(|n| n.to_string()))
        };
        return Some(items);
    }

    let mut from_chars = from.chars();
    let mut to_chars = to.chars();
    match (from_chars.next(), from_chars.next(), to_chars.next(), to_chars.next()) {
        (Some(a), None, Some(b), None) if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
            let (lo, hi) = (a.min(b) as u8, a.max(b) as u8);
            let mut items: Vec<String> = (lo..=hi).map(|c| char::from(c).to_string()).collect();
            if a > b {
                items.reverse();
            }
            Some(Box::new(items.into_iter()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_all(pattern: &str) -> Vec<String> {
        expand_braces(pattern).collect()
    }

    #[test]
    fn no_braces_is_identity() {
        assert_eq!(expand_all("cypress/e2e/a.cy.js"), vec!["cypress/e2e/a.cy.js"]);
    }

    #[test]
    fn expands_alternatives_in_order() {
        assert_eq!(
            expand_all("src/a.cy.{js,jsx,ts,tsx}"),
            vec!["src/a.cy.js", "src/a.cy.jsx", "src/a.cy.ts", "src/a.cy.tsx"]
        );
    }

    #[test]
    fn expands_multiple_groups_as_product() {
        assert_eq!(
            expand_all("{unit,e2e}/a.{js,ts}"),
            vec!["unit/a.js", "unit/a.ts", "e2e/a.js", "e2e/a.ts"]
        );
    }

    #[test]
    fn expands_nested_groups() {
        assert_eq!(expand_all("a.{js,{ts,tsx}}"), vec!["a.js", "a.ts", "a.tsx"]);
    }

    #[test]
    fn expands_ranges() {
        assert_eq!(expand_all("spec{1..3}.js"), vec!["spec1.js", "spec2.js", "spec3.js"]);
        assert_eq!(expand_all("{c..a}"), vec!["c", "b", "a"]);
    }

    #[test]
    fn single_item_and_unbalanced_groups_stay_literal() {
        assert_eq!(expand_all("a{b}c"), vec!["a{b}c"]);
        assert_eq!(expand_all("a{b,c"), vec!["a{b,c"]);
        assert_eq!(expand_all("{x}.{js,ts}"), vec!["{x}.js", "{x}.ts"]);
    }

    #[test]
    fn huge_ranges_expand_lazily() {
        let mut items = expand_braces("spec{0..9223372036854775807}.cy.{js,ts}");
        assert_eq!(items.next().as_deref(), Some("spec0.cy.js"));
        assert_eq!(items.next().as_deref(), Some("spec0.cy.ts"));
        assert_eq!(items.next().as_deref(), Some("spec1.cy.js"));

        let descending: Vec<String> = expand_braces("n{9223372036854775807..-9223372036854775808}")
            .take(2)
            .collect();
        assert_eq!(descending, vec!["n9223372036854775807", "n9223372036854775806"]);
    }
}
