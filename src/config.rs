use std::path::PathBuf;

/// Resolved build options, fixed once arguments have been validated
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Archive produced by the zipper
    pub output: PathBuf,

    /// Workspace name used when remapping runfiles paths
    pub workspace_name: String,

    /// Disk path written verbatim as the `__main__.py` source
    pub main_file: String,

    /// Optional repo mapping file
    pub repo_mapping_manifest: Option<String>,

    /// Strip `external/` instead of normalizing through the workspace
    pub legacy_external_runfiles: bool,

    /// List of `short_path=disk_path` lines
    pub input_files_manifest: PathBuf,
}

impl BuildConfig {
    /// Location of the zipper manifest, `<output>.manifest.txt`
    pub fn manifest_path(&self) -> PathBuf {
        let mut path = self.output.clone().into_os_string();
        path.push(".manifest.txt");
        PathBuf::from(path)
    }
}
