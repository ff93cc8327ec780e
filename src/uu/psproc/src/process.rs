// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::path::Path;

/// Read-only view of a process, common to every platform.
///
/// All values were captured when the record was built. Nothing here touches
/// the system again, so none of these accessors can fail: a value that could
/// not be resolved is reported as empty.
pub trait Process {
    /// Process id
    fn pid(&self) -> usize;

    /// Process id of the parent
    fn parent_pid(&self) -> u64;

    /// Process group id
    fn process_group_id(&self) -> u64;

    /// Executable name as reported by the kernel. This is not a path and
    /// may be truncated.
    fn name(&self) -> &str;

    /// Path of the running executable, empty when it could not be resolved
    fn image_path(&self) -> &Path;

    /// Current working directory, empty when it could not be resolved
    fn working_directory(&self) -> &Path;

    /// Command line arguments, `argv[0]` first
    fn command_line(&self) -> &[String];

    /// Arguments joined with single spaces. Only meant for display, the
    /// argument boundaries are lost.
    fn command_line_display(&self) -> String {
        self.command_line().join(" ")
    }
}
