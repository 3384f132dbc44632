//! Platform identity and default-shell resolution.

use std::env;
use std::path::PathBuf;

/// True when built for Windows.
pub fn is_windows() -> bool {
    cfg!(windows)
}

/// True when built for Linux.
pub fn is_linux() -> bool {
    cfg!(target_os = "linux")
}

/// True when built for macOS.
pub fn is_macos() -> bool {
    cfg!(target_os = "macos")
}

/// True when built for any Unix-like OS.
pub fn is_unix_like() -> bool {
    cfg!(unix)
}

/// The shell a delegated pipe expression is handed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultShell {
    /// Shell binary to invoke
    pub program: PathBuf,
    /// Flag that makes the shell treat the following argument as a command
    pub flag: &'static str,
}

/// Locates a shell binary on the search path.
///
/// Injectable so tests can substitute a fake resolver instead of depending
/// on the machine's environment.
pub trait ShellLocator: Send + Sync {
    /// Find `binary` on the search path, returning its full path.
    fn locate(&self, binary: &str) -> Option<PathBuf>;
}

/// Locator that scans the directories of the `PATH` environment variable.
///
/// The variable is read fresh on every call, so environment changes made
/// while the host application is running are picked up immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathLocator;

impl ShellLocator for PathLocator {
    fn locate(&self, binary: &str) -> Option<PathBuf> {
        let path = env::var_os("PATH")?;
        for dir in env::split_paths(&path) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            let candidate = dir.join(binary);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

/// Resolve the default shell for the current platform.
///
/// Unix always gets `/bin/sh -c`. Windows prefers a `pwsh.exe` found on the
/// search path and falls back to `powershell.exe`, which ships with the OS.
pub fn default_shell(locator: &dyn ShellLocator) -> DefaultShell {
    if is_windows() {
        windows_default_shell(locator)
    } else {
        DefaultShell {
            program: PathBuf::from("/bin/sh"),
            flag: "-c",
        }
    }
}

/// Windows half of the resolution, split out so it stays testable from any
/// platform: it consults only the injected locator.
pub fn windows_default_shell(locator: &dyn ShellLocator) -> DefaultShell {
    match locator.locate("pwsh.exe") {
        Some(program) => DefaultShell {
            program,
            flag: "-Command",
        },
        None => DefaultShell {
            program: PathBuf::from("powershell.exe"),
            flag: "-Command",
        },
    }
}
