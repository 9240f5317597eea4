//! Processes, environment and the running program.

mod exec;
mod monitor;
mod version;

pub use exec::{exec, exec_sys_cmd, passthru, split_command, system, ExecOutput};
pub use monitor::{ProcessMonitor, ProcessStats};
pub use version::version_compare;

use crate::utils::error::{KitError, Result};
use std::backtrace::Backtrace;
use sysinfo::{ProcessesToUpdate, System};

pub fn getpid() -> u32 {
    std::process::id()
}

/// Backtrace of the calling thread, captured regardless of `RUST_BACKTRACE`.
pub fn get_stack() -> String {
    Backtrace::force_capture().to_string()
}

pub fn exit(status: i32) -> ! {
    std::process::exit(status)
}

pub fn die(status: i32) -> ! {
    std::process::exit(status)
}

/// Value of `name`, or "" when unset or not unicode.
pub fn getenv(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

/// Set a variable from a `NAME=value` setting.
///
/// The environment is process-wide; setting it while other threads read it
/// is racy on some platforms.
pub fn putenv(setting: &str) -> Result<()> {
    let parts: Vec<&str> = setting.split('=').collect();
    match parts.as_slice() {
        [name, value] if !name.is_empty() => {
            std::env::set_var(name, value);
            Ok(())
        }
        _ => Err(KitError::invalid_argument(format!(
            "putenv setting must look like NAME=value, got '{}'",
            setting
        ))),
    }
}

/// Resident memory of the current process in bytes.
pub fn memory_get_usage() -> Result<u64> {
    let pid = sysinfo::get_current_pid().map_err(|e| KitError::CommandError {
        message: format!("current pid unavailable: {}", e),
    })?;
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system
        .process(pid)
        .map(|process| process.memory())
        .ok_or_else(|| KitError::CommandError {
            message: format!("process {} not found", pid),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getpid() {
        assert_eq!(getpid(), std::process::id());
    }

    #[test]
    fn test_get_stack_names_this_test() {
        let stack = get_stack();
        assert!(!stack.is_empty());
    }

    #[test]
    fn test_putenv_and_getenv() {
        putenv("CVKIT_SYSKIT_TEST=on").unwrap();
        assert_eq!(getenv("CVKIT_SYSKIT_TEST"), "on");
        assert_eq!(getenv("CVKIT_SYSKIT_UNSET_VARIABLE"), "");

        assert!(putenv("NO_EQUALS").is_err());
        assert!(putenv("A=B=C").is_err());
        assert!(putenv("=value").is_err());
    }

    #[test]
    fn test_memory_get_usage() {
        assert!(memory_get_usage().unwrap() > 0);
    }
}
