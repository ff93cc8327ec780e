// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use pretty_assertions::assert_eq;
use psproc::{find_process, processes, ProcFs, Process, ProcessError, ProcessInformation};
use std::fs;
use std::os::unix::fs::{symlink, MetadataExt};
use std::path::Path;
use tempfile::TempDir;

fn write_process(root: &Path, dir_name: &str, stat: &str, cmdline: &[u8]) {
    let dir = root.join(dir_name);
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("stat"), stat).unwrap();
    fs::write(dir.join("cmdline"), cmdline).unwrap();
    symlink("/usr/lib/systemd/systemd", dir.join("exe")).unwrap();
    symlink("/", dir.join("cwd")).unwrap();
}

fn pids(processes: &[ProcessInformation]) -> Vec<usize> {
    let mut pids = processes.iter().map(Process::pid).collect::<Vec<_>>();
    pids.sort_unstable();
    pids
}

// ============================================================================
// Live process table
// ============================================================================

#[test]
fn test_processes_contains_self() {
    let own = std::process::id() as usize;
    let snapshot = processes().unwrap();
    assert!(snapshot.iter().any(|it| it.pid() == own));
}

#[test]
fn test_find_process_self() {
    let own = std::process::id() as usize;
    let process = find_process(own).unwrap().unwrap();

    assert_eq!(process.pid(), own);
    assert_eq!(
        process.parent_pid(),
        std::os::unix::process::parent_id() as u64
    );
    assert_eq!(process.image_path(), std::env::current_exe().unwrap());
    assert_eq!(
        process.command_line(),
        std::env::args().collect::<Vec<_>>()
    );
}

#[test]
fn test_find_process_absent() {
    assert!(find_process(usize::MAX).unwrap().is_none());
}

#[test]
fn test_other_users_links_are_empty() {
    let euid = uucore::process::geteuid();
    if euid == 0 {
        return;
    }

    // The records are returned, but their links cannot be read
    for process in processes().unwrap() {
        let dir = Path::new("/proc").join(process.pid().to_string());
        let Ok(metadata) = fs::metadata(&dir) else {
            continue;
        };
        if metadata.uid() == euid {
            continue;
        }

        assert_eq!(process.image_path(), Path::new(""), "pid {}", process.pid());
        assert_eq!(process.working_directory(), Path::new(""), "pid {}", process.pid());
    }
}

#[test]
fn test_current_matches_lookup() {
    let procfs = ProcFs::default();
    let current = procfs.current().unwrap();
    let looked_up = procfs.process(current.pid()).unwrap().unwrap();

    assert_eq!(current.name(), looked_up.name());
    assert_eq!(current.working_directory(), looked_up.working_directory());
}

// ============================================================================
// Synthetic process table
// ============================================================================

#[test]
fn test_pid_comes_from_directory_name() {
    let root = TempDir::new().unwrap();
    write_process(root.path(), "10", "10 (ten) S 1 10 10", b"ten\x00");
    write_process(root.path(), "20", "99 (twenty) S 1 20 20", b"twenty\x00");

    let snapshot = ProcFs::new(root.path()).processes().unwrap();
    assert_eq!(pids(&snapshot), vec![10, 20]);
    for process in &snapshot {
        let expected = if process.pid() == 10 { "ten" } else { "twenty" };
        assert_eq!(process.name(), expected);
    }
}

#[test]
fn test_vanished_and_broken_entries_are_skipped() {
    let root = TempDir::new().unwrap();
    write_process(root.path(), "1", "1 (init) S 0 1 1", b"/sbin/init\x00");
    fs::create_dir(root.path().join("2")).unwrap();
    write_process(root.path(), "3", "3 (half) S 1", b"");
    write_process(root.path(), "4", "4 (ok) S 1 4 4", b"");

    let snapshot = ProcFs::new(root.path()).processes().unwrap();
    assert_eq!(pids(&snapshot), vec![1, 4]);
}

#[test]
fn test_nul_only_command_line() {
    let root = TempDir::new().unwrap();
    write_process(root.path(), "5", "5 (zombie) Z 1 5 5", b"\x00");

    let process = ProcFs::new(root.path()).process(5).unwrap().unwrap();
    assert_eq!(process.command_line(), [""]);
}

#[test]
fn test_snapshots_compare_by_value() {
    let root = TempDir::new().unwrap();
    write_process(root.path(), "1", "1 (init) S 0 1 1", b"/sbin/init\x00");
    write_process(root.path(), "7", "7 (x) Z 9 8 7) S 1 1 1", b"");

    let procfs = ProcFs::new(root.path());
    let mut first = procfs.processes().unwrap();
    let mut second = procfs.processes().unwrap();
    first.sort_by_key(Process::pid);
    second.sort_by_key(Process::pid);

    assert_eq!(first, second);
    assert_eq!(first[1].name(), "x");
    assert_eq!(first[1].parent_pid(), 9);
    assert!(first[1].command_line().is_empty());
}

#[test]
fn test_unreadable_root_is_fatal() {
    let root = TempDir::new().unwrap();
    let result = ProcFs::new(root.path().join("proc")).processes();
    assert!(matches!(result, Err(ProcessError::ProcRoot { .. })));
}

#[test]
fn test_plain_file_root_is_fatal() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("proc"), "").unwrap();

    let result = ProcFs::new(root.path().join("proc")).processes();
    assert!(matches!(result, Err(ProcessError::ProcRoot { .. })));
}
