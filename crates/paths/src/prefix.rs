use std::path::MAIN_SEPARATOR;

fn path_parts(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).collect()
}

/// Deepest shared directory prefix of `paths`, joined with the platform separator.
///
/// See [`longest_common_prefix_with_separator`].
#[must_use]
pub fn longest_common_prefix<S: AsRef<str>>(paths: &[S]) -> String {
    longest_common_prefix_with_separator(paths, MAIN_SEPARATOR)
}

/// Deepest shared directory prefix of `paths`.
///
/// A single path yields its containing directory. For several paths the first one
/// is the candidate; every other path is compared segment by segment from the
/// right, and each mismatch shrinks the prefix bound to that index. Paths of
/// different depth therefore still share their leading directories.
#[must_use]
pub fn longest_common_prefix_with_separator<S: AsRef<str>>(paths: &[S], separator: char) -> String {
    let Some(first) = paths.first().map(AsRef::as_ref).filter(|p| !p.is_empty()) else {
        return String::new();
    };

    let candidate = path_parts(first);
    let sep = separator.to_string();

    if paths.len() == 1 {
        return candidate[..candidate.len() - 1].join(&sep);
    }

    let mut end = candidate.len();
    for other in &paths[1..] {
        let parts = path_parts(other.as_ref());
        for i in (0..end).rev() {
            if parts.get(i) != Some(&candidate[i]) {
                end = i;
            }
        }
        if end == 0 {
            return String::new();
        }
    }

    candidate[..end].join(&sep)
}

/// Directory under which every path in `paths` lives.
///
/// One path: its parent directory. Several paths: the shared leading directory
/// segments, `"/"` when only the filesystem root is shared and `""` when nothing
/// is. Paths must already use `/` separators.
#[must_use]
pub fn common_root<S: AsRef<str>>(paths: &[S]) -> String {
    match paths {
        [] => String::new(),
        [only] => {
            let only = only.as_ref();
            match only.rfind('/') {
                Some(0) => "/".to_string(),
                Some(idx) => only[..idx].to_string(),
                None => String::new(),
            }
        }
        [first, rest @ ..] => {
            let dirs = |p: &str| -> Vec<String> {
                let mut segments: Vec<String> = p.split('/').map(str::to_string).collect();
                segments.pop();
                segments
            };

            let mut shared = dirs(first.as_ref());
            for path in rest {
                let segments = dirs(path.as_ref());
                let same = shared
                    .iter()
                    .zip(&segments)
                    .take_while(|(a, b)| a == b)
                    .count();
                shared.truncate(same);
                if shared.is_empty() {
                    return String::new();
                }
            }

            match shared.as_slice() {
                [root] if root.is_empty() => "/".to_string(),
                _ => shared.join("/"),
            }
        }
    }
}
