//! # Spec Paths
//!
//! String-level path arithmetic shared by spec discovery and filename inference.
//!
//! Everything here works on `&str` rather than [`std::path::Path`]: spec paths are
//! compared, prefixed and stripped as text after being normalized to forward
//! slashes, so results are identical on every host.
//!
//! ## Example
//!
//! ```
//! use spec_paths::{longest_common_prefix_with_separator, to_posix};
//!
//! let posix = to_posix(r"C:\work\app\cypress\e2e\login.cy.js", '\\');
//! assert_eq!(posix, "C:/work/app/cypress/e2e/login.cy.js");
//!
//! let lcp = longest_common_prefix_with_separator(
//!     &["cypress/e2e/a.cy.js", "cypress/e2e/nested/b.cy.js"],
//!     '/',
//! );
//! assert_eq!(lcp, "cypress/e2e");
//! ```

mod normalize;
mod prefix;
mod relative;

pub use normalize::{normalize_for_platform, to_posix, PathStyle};
pub use prefix::{common_root, longest_common_prefix, longest_common_prefix_with_separator};
pub use relative::relative_path;
