//! Launcher for the overridehosts shim.
//!
//! Builds the `OVERRIDEHOSTS` value from the environment and the command line,
//! picks the shim build for the running C library, and replaces itself with
//! the target command under `LD_PRELOAD`.

pub mod error;
pub mod mappings;
pub mod preload;

use std::convert::Infallible;
use std::ffi::OsString;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use overridehosts_core::config::{
    LD_PRELOAD_ENV, OVERRIDES_ENV, PRELOAD_LIBRARY_ENV, non_empty_var,
};

pub use error::LaunchError;
pub use preload::Runtime;

/// Launcher inputs read from the process environment.
#[derive(Debug, Clone, Default)]
pub struct LaunchEnv {
    pub overrides: Option<String>,
    pub library: Option<OsString>,
    pub ld_preload: Option<OsString>,
}

impl LaunchEnv {
    pub fn capture() -> Self {
        Self {
            overrides: non_empty_var(OVERRIDES_ENV),
            library: std::env::var_os(PRELOAD_LIBRARY_ENV),
            ld_preload: std::env::var_os(LD_PRELOAD_ENV),
        }
    }
}

/// Everything needed to exec the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub overrides: OsString,
    pub library: PathBuf,
    pub ld_preload: OsString,
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl LaunchPlan {
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env(OVERRIDES_ENV, &self.overrides)
            .env(LD_PRELOAD_ENV, &self.ld_preload);
        cmd
    }

    /// Replace the current process with the target. Returns only on failure.
    pub fn exec(&self) -> LaunchError {
        let source = self.command().exec();
        LaunchError::ExecFailed {
            program: self.program.to_string_lossy().into_owned(),
            source,
        }
    }
}

/// Split the arguments after the program name at the first `--`.
///
/// Returns the mapping arguments and the command line. A missing separator
/// or an empty command is a usage error.
pub fn split_command_line(args: &[OsString]) -> Result<(&[OsString], &[OsString]), LaunchError> {
    let Some(sep) = args.iter().position(|arg| arg == "--") else {
        return Err(LaunchError::Usage("missing '--' before the command"));
    };
    let (mappings, rest) = args.split_at(sep);
    let command = &rest[1..];
    if command.is_empty() {
        return Err(LaunchError::Usage("missing command after '--'"));
    }
    Ok((mappings, command))
}

/// Validate inputs and resolve the shim path.
pub fn plan(
    cli_mappings: &[OsString],
    command: &[OsString],
    env: &LaunchEnv,
    exe_dir: &Path,
    runtime: Runtime,
    exists: impl Fn(&Path) -> bool,
) -> Result<LaunchPlan, LaunchError> {
    let merged = mappings::merge(env.overrides.as_deref(), cli_mappings)?;
    let Some((program, args)) = command.split_first() else {
        return Err(LaunchError::Usage("missing command after '--'"));
    };
    let library = preload::select_library(env.library.as_deref(), exe_dir, runtime, exists)?;
    let ld_preload = preload::prepend_preload(&library, env.ld_preload.as_deref());
    tracing::debug!(library = %library.display(), mappings = merged.len(), "launch plan ready");
    Ok(LaunchPlan {
        overrides: mappings::join(&merged),
        library,
        ld_preload,
        program: program.clone(),
        args: args.to_vec(),
    })
}

/// Directory holding the running launcher binary.
pub fn exe_dir() -> Result<PathBuf, LaunchError> {
    let exe = std::env::current_exe().map_err(LaunchError::EnvironmentUnavailable)?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Plan from the live process state and exec. Never returns on success.
pub fn run(cli_mappings: &[OsString], command: &[OsString]) -> Result<Infallible, LaunchError> {
    let env = LaunchEnv::capture();
    let dir = exe_dir()?;
    let runtime = Runtime::detect();
    tracing::debug!(?runtime, dir = %dir.display(), "detected runtime");
    let plan = plan(cli_mappings, command, &env, &dir, runtime, |p| p.exists())?;
    Err(plan.exec())
}
