//! Lexical path helpers.
//!
//! Entry paths are strings relative to the project root. Everything here is
//! pure string/segment algebra: nothing touches the disk. Separators are
//! always normalized to `/`.

use std::path::Path;

use path_clean::PathClean;

/// The degenerate source root: entries share no directory.
pub const CURRENT_DIR: &str = ".";

/// Replace backslashes with forward slashes.
pub fn to_slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// Lexically normalize a path: trim, forward slashes, no `.` segments,
/// `..` folded where possible.
///
/// An empty path normalizes to `.`.
pub fn normalize(path: &str) -> String {
    let slashed = to_slash(path.trim());
    let cleaned = Path::new(&slashed).clean();
    to_slash(&cleaned.to_string_lossy())
}

/// Non-empty segments of a normalized path, `.` excluded.
pub fn segments(path: &str) -> Vec<String> {
    normalize(path)
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != CURRENT_DIR)
        .map(str::to_string)
        .collect()
}

/// Directory segments of a file path (the file name itself dropped).
///
/// `"src/sub/a.ts"` gives `["src", "sub"]`, `"a.ts"` gives `[]`.
pub fn directory_parts(path: &str) -> Vec<String> {
    let mut parts = segments(path);
    parts.pop();
    parts
}

/// Directory of a file path joined with `/`, or `.` when it has none.
pub fn directory_of(path: &str) -> String {
    join_or_current(&directory_parts(path))
}

/// Segments of `to` relative to the directory `from`.
///
/// Both are interpreted relative to the same root. Walking up is expressed
/// with `..` segments.
pub fn relative_segments(from: &str, to: &str) -> Vec<String> {
    let from = segments(from);
    let to = segments(to);
    let shared = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    std::iter::repeat_n("..".to_string(), from.len() - shared)
        .chain(to[shared..].iter().cloned())
        .collect()
}

/// Infer the longest directory prefix shared by every path.
///
/// The first path's directory is the initial candidate; each further path
/// truncates it at the first mismatching segment. A mismatch on the very
/// first segment (or a first path without a directory) yields `.`.
///
/// # Example
///
/// ```
/// use pkgwiz_entry::find_source_root;
///
/// assert_eq!(find_source_root(["src/a/x.ts", "src/b/y.ts"]), "src");
/// assert_eq!(find_source_root(["src/a.ts", "lib/b.ts"]), ".");
/// ```
pub fn find_source_root<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut paths = paths.into_iter();
    let Some(first) = paths.next() else {
        return CURRENT_DIR.to_string();
    };

    let mut common = directory_parts(first.as_ref());
    if common.is_empty() {
        return CURRENT_DIR.to_string();
    }

    for path in paths {
        let parts = directory_parts(path.as_ref());
        let shared = common
            .iter()
            .zip(&parts)
            .take_while(|(a, b)| a == b)
            .count();
        if shared == 0 {
            return CURRENT_DIR.to_string();
        }
        common.truncate(shared);
    }

    common.join("/")
}

fn join_or_current(parts: &[String]) -> String {
    if parts.is_empty() {
        CURRENT_DIR.to_string()
    } else {
        parts.join("/")
    }
}
