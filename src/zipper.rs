use crate::cmd;
use crate::error::Error;
use crate::platform::Platform;
use crate::result::Result;
use crate::runfiles::ToolResolver;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Runfiles locations of the zipper, in lookup order. The second is where
/// the binary lands on hosts that materialize the `tools/zip:zipper` alias
/// under its real package.
pub const ZIPPER_CANDIDATES: &[&str] = &[
    "bazel_tools/tools/zip/zipper/zipper",
    "bazel_tools/third_party/ijar/zipper",
];

/// Return the first candidate that resolves to an existing executable
pub fn find_tool(
    resolver: &dyn ToolResolver,
    platform: Platform,
    candidates: &[&str],
) -> Result<PathBuf> {
    candidates
        .iter()
        .find_map(|candidate| {
            let found = resolver
                .rlocation(candidate)
                .and_then(|path| platform.find_executable(&path));
            if found.is_none() {
                log::debug!("{candidate} not found in runfiles");
            }
            found
        })
        .ok_or_else(|| Error::ToolNotFound {
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        })
}

/// Run `zipper cC <output> @<manifest>` to create the archive
pub fn create_archive(
    resolver: &dyn ToolResolver,
    output: &Path,
    manifest_path: &Path,
) -> Result<()> {
    let platform = Platform::current();
    let zipper = find_tool(resolver, platform, ZIPPER_CANDIDATES)?;
    log::info!("using zipper {} ({platform})", zipper.display());

    let mut manifest_arg = OsString::from("@");
    manifest_arg.push(manifest_path);

    cmd::execute(
        &zipper,
        &[OsString::from("cC"), output.as_os_str().to_owned(), manifest_arg],
    )
}
