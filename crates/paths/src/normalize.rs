use std::path::MAIN_SEPARATOR;

/// Separator convention of the host that produced a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStyle {
    pub separator: char,
}

impl PathStyle {
    pub const POSIX: Self = Self { separator: '/' };
    pub const WINDOWS: Self = Self { separator: '\\' };

    /// Style of the platform this binary runs on.
    #[must_use]
    pub const fn native() -> Self {
        Self {
            separator: MAIN_SEPARATOR,
        }
    }

    #[must_use]
    pub const fn is_posix(self) -> bool {
        self.separator == '/'
    }

    #[must_use]
    pub fn to_posix(self, path: &str) -> String {
        to_posix(path, self.separator)
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::native()
    }
}

/// Rewrite `path` so that every `separator` becomes `/`.
///
/// A no-op when the separator already is `/`.
#[must_use]
pub fn to_posix(path: &str, separator: char) -> String {
    if separator == '/' {
        return path.to_string();
    }
    path.replace(separator, "/")
}

/// [`to_posix`] with the separator of the current platform.
#[must_use]
pub fn normalize_for_platform(path: &str) -> String {
    to_posix(path, MAIN_SEPARATOR)
}
