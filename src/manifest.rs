use crate::config::BuildConfig;
use crate::error::Error;
use crate::input::FileEntry;
use crate::remap::{RUNFILES_ROOT, compute_archive_path};
use crate::result::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One `zip_path=source_path` line of the zipper manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub zip_path: String,

    /// Empty for entries the zipper creates as empty files
    pub source: Vec<u8>,
}

impl ManifestEntry {
    pub fn new<Z: Into<String>, S: Into<Vec<u8>>>(zip_path: Z, source: S) -> Self {
        Self {
            zip_path: zip_path.into(),
            source: source.into(),
        }
    }

    /// An empty file, used for the `__init__.py` package markers
    pub fn empty<Z: Into<String>>(zip_path: Z) -> Self {
        Self::new(zip_path, Vec::new())
    }
}

/// Ordered input for the zipper's `@manifest` argument
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Lay out the archive: entry point and package markers first, then the
    /// runfiles in input order, then the repo mapping
    pub fn build(config: &BuildConfig, files: &[FileEntry]) -> Self {
        let remap = |short_path: &str| {
            compute_archive_path(
                short_path,
                &config.workspace_name,
                config.legacy_external_runfiles,
            )
        };

        let mut entries = Vec::with_capacity(files.len() + 4);
        entries.push(ManifestEntry::new("__main__.py", config.main_file.as_str()));
        entries.push(ManifestEntry::empty("__init__.py"));
        entries.push(ManifestEntry::empty(remap("__init__.py")));

        entries.extend(files.iter().map(|file| {
            ManifestEntry::new(remap(&file.short_path), file.disk_path.as_slice())
        }));

        if let Some(repo_mapping) = &config.repo_mapping_manifest {
            entries.push(ManifestEntry::new(
                format!("{RUNFILES_ROOT}/_repo_mapping"),
                repo_mapping.as_str(),
            ));
        }

        Self { entries }
    }

    /// Render the manifest; every line ends in `\n` on every platform and
    /// sources are copied through unchanged
    pub fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in &self.entries {
            out.extend_from_slice(entry.zip_path.as_bytes());
            out.push(b'=');
            out.extend_from_slice(&entry.source);
            out.push(b'\n');
        }
        out
    }

    /// Parse rendered manifest text, splitting each line on its first `=`
    #[cfg(test)]
    pub fn parse(content: &[u8]) -> Result<Self> {
        let entries = content
            .split(|&b| b == b'\n')
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(index, line)| -> Result<ManifestEntry> {
                let parse_error = || Error::Parse {
                    line: index + 1,
                    content: String::from_utf8_lossy(line).into_owned(),
                };
                let eq = line.iter().position(|&b| b == b'=').ok_or_else(parse_error)?;
                let zip_path = std::str::from_utf8(&line[..eq]).map_err(|_| parse_error())?;
                Ok(ManifestEntry::new(zip_path, &line[eq + 1..]))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// Write the manifest as raw bytes
    pub fn write(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).map_err(|e| Error::io("cannot create manifest file", path, e))?;
        let mut writer = BufWriter::new(file);

        writer
            .write_all(&self.render())
            .and_then(|_| writer.flush())
            .map_err(|e| Error::io("cannot write manifest file", path, e))?;

        log::debug!(
            "wrote {} manifest entries to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }
}
