//! Minimal runfiles lookup, enough to find tools bundled with this binary.

use crate::error::Error;
use crate::result::Result;
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Maps a runfiles path such as `bazel_tools/tools/zip/zipper/zipper` to a
/// location on disk
pub trait ToolResolver {
    fn rlocation(&self, path: &str) -> Option<PathBuf>;
}

#[derive(Debug)]
enum Mode {
    Manifest(HashMap<String, PathBuf>),
    Directory(PathBuf),
}

#[derive(Debug)]
pub struct Runfiles {
    mode: Mode,
}

impl Runfiles {
    /// Locate the runfiles of the running binary, preferring the environment
    /// set up by the build system over paths derived from `argv0`
    pub fn create(argv0: &Path) -> Result<Self> {
        let manifest_file = env::var_os("RUNFILES_MANIFEST_FILE").map(PathBuf::from);
        let runfiles_dir = env::var_os("RUNFILES_DIR").map(PathBuf::from);
        Self::discover(argv0, manifest_file, runfiles_dir)
    }

    fn discover(
        argv0: &Path,
        manifest_file: Option<PathBuf>,
        runfiles_dir: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(path) = manifest_file.filter(|p| p.is_file()) {
            return Self::from_manifest_file(&path);
        }
        if let Some(dir) = runfiles_dir.filter(|p| p.is_dir()) {
            return Ok(Self::from_directory(dir));
        }

        let with_suffix = |suffix: &str| {
            let mut path = OsString::from(argv0.as_os_str());
            path.push(suffix);
            PathBuf::from(path)
        };

        let sibling_manifest = with_suffix(".runfiles_manifest");
        if sibling_manifest.is_file() {
            return Self::from_manifest_file(&sibling_manifest);
        }

        let dir = with_suffix(".runfiles");
        let nested_manifest = dir.join("MANIFEST");
        if nested_manifest.is_file() {
            return Self::from_manifest_file(&nested_manifest);
        }
        if dir.is_dir() {
            return Ok(Self::from_directory(dir));
        }

        Err(Error::Runfiles(format!(
            "no runfiles manifest or directory found for {}",
            argv0.display()
        )))
    }

    pub fn from_directory<P: Into<PathBuf>>(dir: P) -> Self {
        let dir = dir.into();
        log::debug!("using runfiles directory {}", dir.display());
        Self {
            mode: Mode::Directory(dir),
        }
    }

    pub fn from_manifest_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io("cannot read runfiles manifest", path, e))?;
        log::debug!("using runfiles manifest {}", path.display());
        Ok(Self::from_manifest_str(&content))
    }

    /// Build a lookup table from `rlocation disk_path` lines
    pub fn from_manifest_str(content: &str) -> Self {
        let entries = content
            .lines()
            .filter(|line| !line.is_empty())
            .map(parse_manifest_line)
            .collect();

        Self {
            mode: Mode::Manifest(entries),
        }
    }
}

fn parse_manifest_line(line: &str) -> (String, PathBuf) {
    // A leading space marks a line whose key and value use escapes
    match line.strip_prefix(' ') {
        Some(escaped) => {
            let (key, value) = escaped.split_once(' ').unwrap_or((escaped, ""));
            let key = unescape(key, true);
            let value = unescape(value, false);
            (key, PathBuf::from(value))
        }
        None => {
            let (key, value) = line.split_once(' ').unwrap_or((line, ""));
            (key.to_string(), PathBuf::from(value))
        }
    }
}

fn unescape(raw: &str, decode_space: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') if decode_space => out.push(' '),
            Some('n') => out.push('\n'),
            Some('b') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

impl ToolResolver for Runfiles {
    fn rlocation(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return Some(PathBuf::from(path));
        }

        match &self.mode {
            Mode::Manifest(entries) => entries.get(path).cloned(),
            Mode::Directory(dir) => Some(dir.join(path)),
        }
    }
}
