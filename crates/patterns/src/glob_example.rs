//! Turning a spec glob into a concrete example path.
//!
//! Used to suggest where a new spec should go when a project configures its own
//! pattern. Wildcards are replaced by fixed placeholder tokens, braces are
//! expanded, and whatever glob syntax remains is treated as a regular expression
//! from which one matching string is produced.

use crate::braces::expand_braces;
use crate::error::{Result, SpecError};
use crate::testing_type::TestingType;
use globset::GlobBuilder;
use regex_syntax::hir::{Class, Hir, HirKind};

/// Directory used when a pattern may live under any root directory.
pub const ANY_ROOT_PLACEHOLDER: &str = "src";
/// Stands in for wildcards in the file stem.
pub const FILENAME_PLACEHOLDER: &str = "filename";
/// Stands in for wildcards between the stem and the real extension.
pub const EXTENSION_PLACEHOLDER: &str = "cy";

/// Brace expansions considered when looking for the preferred extension.
const MAX_EXAMPLE_CANDIDATES: usize = 1024;

/// Whether `pattern` uses any glob syntax at all.
#[must_use]
pub fn is_glob(pattern: &str) -> bool {
    pattern.starts_with('!') || pattern.contains(['*', '?', '[', '{', '('])
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GlobParts<'a> {
    /// Directory part including its trailing `/`, or empty.
    dirname: &'a str,
    /// Basename up to its first dot.
    filename: &'a str,
    /// Everything from the first dot of the basename on, dot included.
    extname: String,
    /// Last dot-separated piece of the basename.
    ext: &'a str,
}

fn parse_glob(pattern: &str) -> GlobParts<'_> {
    let split = top_level_positions(pattern, '/').last().map(|idx| idx + 1);
    let (dirname, basename) = match split {
        Some(idx) => pattern.split_at(idx),
        None => ("", pattern),
    };

    let dots = top_level_positions(basename, '.');
    match (dots.first(), dots.last()) {
        (Some(&first), Some(&last)) => GlobParts {
            dirname,
            filename: &basename[..first],
            extname: basename[first..].to_string(),
            ext: &basename[last + 1..],
        },
        _ => GlobParts {
            dirname,
            filename: basename,
            extname: String::new(),
            ext: "",
        },
    }
}

/// Byte offsets of `needle` outside `{}` / `[]` groups.
fn top_level_positions(s: &str, needle: char) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut braces = 0usize;
    let mut brackets = false;
    for (idx, ch) in s.char_indices() {
        match ch {
            '{' if !brackets => braces += 1,
            '}' if !brackets => braces = braces.saturating_sub(1),
            '[' => brackets = true,
            ']' => brackets = false,
            c if c == needle && braces == 0 && !brackets => positions.push(idx),
            _ => {}
        }
    }
    positions
}

/// Build a plausible path matching `glob`.
///
/// Returns the input untouched when it is not a glob and `Ok(None)` when no
/// candidate survives. A leading `**` directory becomes [`ANY_ROOT_PLACEHOLDER`],
/// other directory wildcards become the testing type tag, stem wildcards become
/// [`FILENAME_PLACEHOLDER`] and extension wildcards [`EXTENSION_PLACEHOLDER`].
/// With `preferred_extension`, the first brace expansion whose basename ends in
/// that extension wins.
pub fn example_from_glob(
    glob: &str,
    testing_type: TestingType,
    preferred_extension: Option<&str>,
) -> Result<Option<String>> {
    if !is_glob(glob) {
        return Ok(Some(glob.to_string()));
    }

    let parts = parse_glob(glob);

    let dirname = if parts.dirname.starts_with("**") {
        parts.dirname.replacen("**", ANY_ROOT_PLACEHOLDER, 1)
    } else {
        parts.dirname.to_string()
    };
    let dirname = dirname
        .split('/')
        .filter(|segment| *segment != "**")
        .map(|segment| segment.replace('*', testing_type.as_str()))
        .collect::<Vec<_>>()
        .join("/");

    let filename = parts.filename.replace('*', FILENAME_PLACEHOLDER);
    let middle = parts
        .extname
        .strip_suffix(parts.ext)
        .unwrap_or(&parts.extname)
        .replace('*', EXTENSION_PLACEHOLDER);
    let middle = middle.trim_start_matches('.').trim_end_matches('.');

    let basename = [filename.as_str(), middle, parts.ext]
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(".");

    let candidates: Vec<String> = expand_braces(&format!("{dirname}{basename}"))
        .take(MAX_EXAMPLE_CANDIDATES)
        .collect();
    let mut chosen = candidates.first().cloned();

    if let Some(ext) = preferred_extension.filter(|ext| !ext.is_empty()) {
        let wanted = format!("*.{ext}");
        let matcher = GlobBuilder::new(&wanted)
            .literal_separator(true)
            .build()
            .map_err(|source| SpecError::InvalidGlob {
                pattern: wanted.clone(),
                source,
            })?
            .compile_matcher();
        if let Some(preferred) = candidates
            .iter()
            .find(|candidate| matcher.is_match(candidate.rsplit('/').next().unwrap_or_default()))
        {
            chosen = Some(preferred.clone());
        }
    }

    let Some(chosen) = chosen.filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    generate_match(&chosen.replace('.', "\\.")).map(Some)
}

/// Produce one string matched by the regular expression `pattern`.
///
/// Deterministic: the first alternative, the minimum repetition count and the
/// most readable member of each class are used.
pub fn generate_match(pattern: &str) -> Result<String> {
    let hir = regex_syntax::Parser::new()
        .parse(pattern)
        .map_err(|source| SpecError::InvalidExamplePattern {
            pattern: pattern.to_string(),
            source: Box::new(source),
        })?;

    let mut out = String::new();
    emit(&hir, &mut out).ok_or_else(|| SpecError::UnsatisfiablePattern(pattern.to_string()))?;
    Ok(out)
}

fn emit(hir: &Hir, out: &mut String) -> Option<()> {
    match hir.kind() {
        HirKind::Empty | HirKind::Look(_) => {}
        HirKind::Literal(literal) => out.push_str(&String::from_utf8_lossy(&literal.0)),
        HirKind::Class(Class::Unicode(class)) => {
            let ranges: Vec<(char, char)> =
                class.ranges().iter().map(|r| (r.start(), r.end())).collect();
            out.push(pick_char(&ranges)?);
        }
        HirKind::Class(Class::Bytes(class)) => {
            let ranges: Vec<(char, char)> = class
                .ranges()
                .iter()
                .map(|r| (char::from(r.start()), char::from(r.end())))
                .collect();
            out.push(pick_char(&ranges)?);
        }
        HirKind::Repetition(rep) => {
            for _ in 0..rep.min {
                emit(&rep.sub, out)?;
            }
        }
        HirKind::Capture(capture) => emit(&capture.sub, out)?,
        HirKind::Concat(items) => {
            for item in items {
                emit(item, out)?;
            }
        }
        HirKind::Alternation(items) => emit(items.first()?, out)?,
    }
    Some(())
}

fn pick_char(ranges: &[(char, char)]) -> Option<char> {
    let contains = |c: char| ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi);
    ('a'..='z')
        .chain('0'..='9')
        .chain('A'..='Z')
        .chain(['-', '_'])
        .find(|&c| contains(c))
        .or_else(|| {
            ranges
                .iter()
                .map(|&(lo, _)| lo)
                .find(|c| !c.is_control())
        })
        .or_else(|| ranges.first().map(|&(lo, _)| lo))
}
