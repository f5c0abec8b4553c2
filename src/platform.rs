use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// Get the current platform
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Get platform identifier as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Unix => "unix",
        }
    }

    /// Suffixes tried in order when probing for an executable. An empty
    /// suffix means the path is used as is.
    pub fn executable_suffixes(&self) -> &'static [&'static str] {
        match self {
            Platform::Windows => &[".exe", ".bat", ".cmd"],
            Platform::Unix => &[""],
        }
    }

    /// Return the first existing executable for `path`
    pub fn find_executable(&self, path: &Path) -> Option<PathBuf> {
        self.executable_suffixes()
            .iter()
            .map(|suffix| {
                let mut candidate = path.as_os_str().to_owned();
                candidate.push(suffix);
                PathBuf::from(candidate)
            })
            .find(|candidate| candidate.exists())
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
