use crate::config::BuildConfig;
use crate::error::Error;
use crate::result::Result;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments for the zip manifest generator
///
/// Required values are kept optional here; `into_config` reports the missing
/// ones so that every usage problem ends in the same exit path.
#[derive(Debug, Default)]
pub struct Args {
    /// Enable verbose output
    pub verbose: bool,

    /// Destination archive
    pub output: Option<PathBuf>,

    /// Workspace name used when remapping runfiles paths
    pub workspace_name: Option<String>,

    /// Entry point written as `__main__.py`
    pub main_file: Option<String>,

    /// Repo mapping file placed at `runfiles/_repo_mapping`
    pub repo_mapping_manifest: Option<String>,

    /// Place external repositories directly under the runfiles root
    pub legacy_external_runfiles: bool,

    /// List of `short_path=disk_path` lines
    pub input_files_manifest: Option<PathBuf>,
}

fn command() -> Command {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about("Generate a zipper manifest for an executable Python zip and run the zipper")
        .args_override_self(true)
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("PATH")
                .help("Destination archive path")
        )
        .arg(
            Arg::new("workspace-name")
                .long("workspace-name")
                .value_name("NAME")
                .help("Workspace name used to compute runfiles paths")
        )
        .arg(
            Arg::new("main-file")
                .long("main-file")
                .value_name("PATH")
                .help("File stored as __main__.py at the archive root")
        )
        .arg(
            Arg::new("repo-mapping-manifest")
                .long("repo-mapping-manifest")
                .value_name("PATH")
                .help("Repo mapping file stored as runfiles/_repo_mapping")
        )
        .arg(
            Arg::new("legacy-external-runfiles")
                .long("legacy-external-runfiles")
                .action(ArgAction::SetTrue)
                .help("Strip the external/ prefix instead of normalizing through the workspace")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output")
        )
        .arg(
            Arg::new("input_files_manifest")
                .value_name("INPUT_FILES_MANIFEST")
                .help("File listing short_path=disk_path entries")
        )
}

impl Args {
    /// Parse the process arguments
    pub fn parse() -> Result<Self> {
        Self::parse_from(std::env::args_os())
    }

    pub fn parse_from<I, T>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match command().try_get_matches_from(iter) {
            Ok(matches) => matches,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => return Err(e.into()),
        };

        let string = |id: &str| {
            matches
                .get_one::<String>(id)
                .filter(|value| !value.is_empty())
                .cloned()
        };

        Ok(Self {
            verbose: matches.get_flag("verbose"),
            output: string("output").map(PathBuf::from),
            workspace_name: string("workspace-name"),
            main_file: string("main-file"),
            repo_mapping_manifest: string("repo-mapping-manifest"),
            legacy_external_runfiles: matches.get_flag("legacy-external-runfiles"),
            input_files_manifest: string("input_files_manifest").map(PathBuf::from),
        })
    }

    /// Check required values and produce the build configuration
    pub fn into_config(self) -> Result<BuildConfig> {
        let input_files_manifest = self
            .input_files_manifest
            .ok_or_else(|| Error::usage("no input files manifest specified"))?;
        let output = self
            .output
            .ok_or_else(|| Error::usage("--output is required"))?;
        let workspace_name = self
            .workspace_name
            .ok_or_else(|| Error::usage("--workspace-name is required"))?;
        let main_file = self
            .main_file
            .ok_or_else(|| Error::usage("--main-file is required"))?;

        Ok(BuildConfig {
            output,
            workspace_name,
            main_file,
            repo_mapping_manifest: self.repo_mapping_manifest,
            legacy_external_runfiles: self.legacy_external_runfiles,
            input_files_manifest,
        })
    }
}
