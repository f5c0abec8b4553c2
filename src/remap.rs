//! Placement of runfiles inside the executable zip.

/// Top-level folder holding every runtime file in the archive
pub const RUNFILES_ROOT: &str = "runfiles";

const EXTERNAL_PREFIX: &str = "external/";

/// Compute the path inside the zip where a runfile with the given short path
/// should be stored.
///
/// With the legacy layout, files from external repositories sit directly under
/// the runfiles root (`external/foo/bar` becomes `runfiles/foo/bar`). Otherwise
/// the short path is resolved relative to the workspace directory, which folds
/// `ws/../external/foo` into `external/foo`.
pub fn compute_archive_path(short_path: &str, workspace_name: &str, legacy_layout: bool) -> String {
    let relative = match short_path.strip_prefix(EXTERNAL_PREFIX) {
        Some(rest) if legacy_layout => rest.to_string(),
        _ => normalize(&format!("{workspace_name}/{short_path}")),
    };

    format!("{RUNFILES_ROOT}/{relative}")
}

/// Lexically normalize a `/`-separated path.
///
/// Empty and `.` segments are dropped and `..` cancels the preceding segment.
/// Leading `..` segments of a relative path are kept; after a root they are
/// dropped. A path ending in a separator, `.` or a cancelling `..` keeps a
/// trailing `/` (`ws/pkg/..` is `ws/`). Nothing touches the filesystem.
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    let mut trailing_separator = false;

    for segment in path.split('/') {
        trailing_separator = matches!(segment, "" | "." | "..");
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            normal => parts.push(normal),
        }
    }

    let mut joined = parts.join("/");
    if trailing_separator && parts.last().is_some_and(|&last| last != "..") {
        joined.push('/');
    }

    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
