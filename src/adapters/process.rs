use crate::domain::ports::ProcessControl;
use crate::utils::error::Result;
use std::process::Command;

/// Restarts by replacing the current process image with the original
/// invocation, argument vector preserved. In-process state (connections,
/// buffers) is discarded; already-completed entries are skipped on resume
/// via the existence check.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecRestart;

impl ProcessControl for ExecRestart {
    #[cfg(unix)]
    fn restart(&self) -> Result<()> {
        use std::os::unix::process::CommandExt;

        let mut args = std::env::args_os();
        let argv0 = args.next().unwrap_or_default();
        let exe = std::env::current_exe()?;

        tracing::warn!("Kicking: re-executing {}", exe.display());
        // exec only returns on failure.
        let err = Command::new(exe).arg0(argv0).args(args).exec();
        Err(err.into())
    }

    #[cfg(not(unix))]
    fn restart(&self) -> Result<()> {
        // No exec on this platform; run a fresh copy to completion and exit
        // with its status, which preserves fresh-launch exit semantics.
        let exe = std::env::current_exe()?;
        let args: Vec<_> = std::env::args_os().skip(1).collect();

        tracing::warn!("Kicking: relaunching {}", exe.display());
        let status = Command::new(exe).args(args).status()?;
        std::process::exit(status.code().unwrap_or(0));
    }
}
