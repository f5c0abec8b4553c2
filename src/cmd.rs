use crate::error::Error;
use crate::result::Result;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Run a program to completion with inherited stdio, failing on a non-zero
/// exit status
pub fn execute<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> Result<()> {
    log::debug!(
        "executing: {} {}",
        program.display(),
        args.iter()
            .map(|arg| arg.as_ref().to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| Error::io("cannot execute", program, e))?;

    if !status.success() {
        return Err(Error::CommandFailed {
            program: program.display().to_string(),
            status: describe(status),
        });
    }

    Ok(())
}

fn describe(status: ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit code {code}");
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("signal {signal}");
        }
    }

    status.to_string()
}
