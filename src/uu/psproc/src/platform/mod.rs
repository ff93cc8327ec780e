// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::error::ProcessError;

#[cfg(not(any(target_os = "linux", target_os = "android")))]
mod fallback;
#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;

#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub use fallback::{ProcFs, ProcessInformation};
#[cfg(any(target_os = "linux", target_os = "android"))]
pub use linux::{ProcFs, ProcessInformation};

/// Default location of the process table
pub const PROC_ROOT: &str = "/proc";

/// Number of directory entries handled per batch while scanning the process table
pub const READ_DIR_BATCH: usize = 10;

/// Snapshot of every process currently visible in [PROC_ROOT]
pub fn processes() -> Result<Vec<ProcessInformation>, ProcessError> {
    ProcFs::default().processes()
}

/// Look up a single process in [PROC_ROOT]
pub fn find_process(pid: usize) -> Result<Option<ProcessInformation>, ProcessError> {
    ProcFs::default().process(pid)
}
