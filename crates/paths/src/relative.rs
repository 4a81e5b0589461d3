fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

fn is_drive(segment: &str) -> bool {
    segment.len() == 2 && segment.ends_with(':')
}

/// Relative path from directory `from` to `to`, both `/`-separated.
///
/// Walks up with `..` when `to` lies outside `from`; equal paths give `""`.
/// Paths on different Windows drives have no relative form, so `to` is returned
/// as is.
#[must_use]
pub fn relative_path(from: &str, to: &str) -> String {
    let from_parts = segments(from);
    let to_parts = segments(to);

    if let (Some(a), Some(b)) = (from_parts.first(), to_parts.first()) {
        if (is_drive(a) || is_drive(b)) && !a.eq_ignore_ascii_case(b) {
            return to.to_string();
        }
    }

    let shared = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out: Vec<&str> = Vec::with_capacity(from_parts.len() + to_parts.len() - 2 * shared);
    out.extend(std::iter::repeat("..").take(from_parts.len() - shared));
    out.extend_from_slice(&to_parts[shared..]);
    out.join("/")
}
