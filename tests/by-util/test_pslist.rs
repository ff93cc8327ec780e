// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.
// spell-checker:ignore kthreadd

use std::fs;
use std::os::unix::fs::symlink;
use tempfile::TempDir;
use uutests::new_ucmd;
use uutests::util::TestScenario;
use uutests::util_name;

fn fake_proc() -> TempDir {
    let root = TempDir::new().unwrap();
    for (pid, stat, cmdline) in [
        ("1", "1 (init) S 0 1 1", &b"/sbin/init\x00"[..]),
        ("2", "2 (kthreadd) S 0 0 0", &b""[..]),
        ("300", "300 (vim) S 1 300 300", &b"vim\x00notes with spaces.txt\x00"[..]),
    ] {
        let dir = root.path().join(pid);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("stat"), stat).unwrap();
        fs::write(dir.join("cmdline"), cmdline).unwrap();
        symlink("/usr/bin/vim", dir.join("exe")).unwrap();
        symlink("/home/user", dir.join("cwd")).unwrap();
    }
    root
}

/// Table rows with the column padding collapsed
fn rows(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

#[test]
fn test_invalid_arg() {
    new_ucmd!().arg("--definitely-invalid").fails().code_is(1);
}

#[test]
fn test_default_listing() {
    let root = fake_proc();
    let result = new_ucmd!()
        .arg("--proc-root")
        .arg(root.path())
        .succeeds();

    assert_eq!(
        rows(result.stdout_str()),
        vec![
            "PID PPID PGID CMD COMMAND",
            "1 0 1 init /sbin/init",
            "2 0 0 kthreadd [kthreadd]",
            "300 1 300 vim vim notes with spaces.txt",
        ]
    );
}

#[test]
fn test_select_pid_and_format() {
    let root = fake_proc();
    let result = new_ucmd!()
        .arg("--proc-root")
        .arg(root.path())
        .args(&["-p", "300", "-o", "pid,exe,cwd", "--no-headers"])
        .succeeds();

    assert_eq!(rows(result.stdout_str()), vec!["300 /usr/bin/vim /home/user"]);
}

#[test]
fn test_missing_pid_sets_exit_code() {
    let root = fake_proc();
    let result = new_ucmd!()
        .arg("--proc-root")
        .arg(root.path())
        .args(&["-p", "1,4242", "--no-headers", "-o", "pid"])
        .fails();

    result.code_is(1);
    assert_eq!(rows(result.stdout_str()), vec!["1"]);
}

#[test]
fn test_filter_by_parent() {
    let root = fake_proc();
    let result = new_ucmd!()
        .arg("--proc-root")
        .arg(root.path())
        .args(&["--ppid", "1", "--no-headers", "-o", "pid,comm"])
        .succeeds();

    assert_eq!(rows(result.stdout_str()), vec!["300 vim"]);
}

#[test]
fn test_unknown_format() {
    let root = fake_proc();
    new_ucmd!()
        .arg("--proc-root")
        .arg(root.path())
        .args(&["-o", "rss"])
        .fails()
        .code_is(1)
        .stderr_contains("unknown format specifier \"rss\"");
}

#[test]
fn test_missing_proc_root() {
    let root = fake_proc();
    new_ucmd!()
        .arg("--proc-root")
        .arg(root.path().join("nowhere"))
        .fails()
        .code_is(1)
        .stderr_contains("cannot open process table");
}

#[test]
fn test_proc_root_is_a_file() {
    let root = fake_proc();
    new_ucmd!()
        .arg("--proc-root")
        .arg(root.path().join("1").join("stat"))
        .fails()
        .code_is(1)
        .stderr_contains("cannot open process table");
}

#[test]
fn test_proc_root_from_env() {
    let root = fake_proc();
    let result = new_ucmd!()
        .env("PSPS_PROC_ROOT", root.path())
        .args(&["-o", "pid", "--no-headers"])
        .succeeds();

    assert_eq!(rows(result.stdout_str()), vec!["1", "2", "300"]);
}
