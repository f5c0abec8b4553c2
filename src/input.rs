use crate::error::Error;
use crate::result::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A runfile listed in the input manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the workspace runfiles directory
    pub short_path: String,

    /// Current location of the file on disk, copied through to the zipper
    /// manifest byte for byte
    pub disk_path: Vec<u8>,
}

impl FileEntry {
    /// Parse a `short_path=disk_path` line; `line_number` is 1-based and only
    /// used for diagnostics
    pub fn parse(line: &[u8], line_number: usize) -> Result<Self> {
        let parse_error = || Error::Parse {
            line: line_number,
            content: String::from_utf8_lossy(line).into_owned(),
        };

        let eq = line.iter().position(|&b| b == b'=').ok_or_else(parse_error)?;
        let (short_path, disk_path) = (&line[..eq], &line[eq + 1..]);
        if short_path.is_empty() {
            return Err(parse_error());
        }

        let short_path = std::str::from_utf8(short_path).map_err(|_| Error::InvalidUtf8 {
            line: line_number,
            content: String::from_utf8_lossy(line).into_owned(),
        })?;

        Ok(Self {
            short_path: short_path.to_string(),
            disk_path: disk_path.to_vec(),
        })
    }
}

/// Parse the whole input manifest; blank lines are skipped
pub fn parse_entries(content: &[u8]) -> Result<Vec<FileEntry>> {
    content
        .split(|&b| b == b'\n')
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(index, line)| FileEntry::parse(line, index + 1))
        .collect()
}

/// Read the list of runfiles to package
pub fn read_input_manifest(path: &Path) -> Result<Vec<FileEntry>> {
    let mut content = Vec::new();
    File::open(path)
        .map_err(|e| Error::io("cannot open input files manifest", path, e))?
        .read_to_end(&mut content)
        .map_err(|e| Error::io("cannot read input files manifest", path, e))?;

    let entries = parse_entries(&content)?;
    log::debug!("read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}
