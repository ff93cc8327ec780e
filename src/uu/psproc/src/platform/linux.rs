// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::error::ProcessError;
use crate::platform::{PROC_ROOT, READ_DIR_BATCH};
use crate::process::Process;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Process ID and its information (Linux)
///
/// Built from one `/proc/<pid>` directory in a single pass, see
/// [ProcessInformation::try_new].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInformation {
    pid: usize,
    ppid: u64,
    pgid: u64,
    sid: u64,
    state: char,
    name: String,
    image_path: PathBuf,
    cwd: PathBuf,
    cmdline: Vec<String>,
}

impl ProcessInformation {
    /// Try new with pid path such as `/proc/1234` or `/proc/self`
    ///
    /// The pid is taken from the last path component. `stat` and `cmdline`
    /// must be readable and `stat` must parse, otherwise the whole record
    /// fails. `exe` and `cwd` are left empty when they are not symlinks or
    /// when their target cannot be read.
    ///
    /// - [The /proc Filesystem](https://docs.kernel.org/filesystems/proc.html#process-specific-subdirectories)
    pub fn try_new(value: PathBuf) -> Result<Self, ProcessError> {
        let value = resolve_self(value)?;

        let pid = value
            .file_name()
            .and_then(parse_pid)
            .ok_or_else(|| ProcessError::InvalidPidDirectory(value.clone()))?;

        let stat_path = value.join("stat");
        let stat = fs::read(&stat_path).map_err(|err| ProcessError::io(&stat_path, err))?;
        let stat = Stat::parse(pid, &String::from_utf8_lossy(&stat))?;

        let image_path = resolve_link(&value.join("exe"))?;
        let cwd = resolve_link(&value.join("cwd"))?;

        let cmdline_path = value.join("cmdline");
        let cmdline = fs::read(&cmdline_path).map_err(|err| ProcessError::io(&cmdline_path, err))?;

        Ok(Self {
            pid,
            ppid: stat.ppid,
            pgid: stat.pgid,
            sid: stat.sid,
            state: stat.state,
            name: stat.name,
            image_path,
            cwd,
            cmdline: split_cmdline(&cmdline),
        })
    }
}

impl Process for ProcessInformation {
    fn pid(&self) -> usize {
        self.pid
    }

    fn parent_pid(&self) -> u64 {
        self.ppid
    }

    fn process_group_id(&self) -> u64 {
        self.pgid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn image_path(&self) -> &Path {
        &self.image_path
    }

    fn working_directory(&self) -> &Path {
        &self.cwd
    }

    fn command_line(&self) -> &[String] {
        &self.cmdline
    }
}

impl TryFrom<DirEntry> for ProcessInformation {
    type Error = ProcessError;

    fn try_from(value: DirEntry) -> Result<Self, Self::Error> {
        Self::try_new(value.into_path())
    }
}

/// Leading fields of `/proc/<pid>/stat`
#[derive(Debug, PartialEq, Eq)]
struct Stat {
    name: String,
    state: char,
    ppid: u64,
    pgid: u64,
    sid: u64,
}

impl Stat {
    /// Parse `pid (name) state ppid pgid sid ...`
    ///
    /// The name runs from the first `(` to the first `)` after it. A name
    /// that itself contains `)` is therefore cut short, and the fields after
    /// it are usually misread, which rejects the line.
    fn parse(pid: usize, line: &str) -> Result<Self, ProcessError> {
        let malformed = |reason: &str| ProcessError::MalformedStat {
            pid,
            reason: reason.into(),
        };

        let name_start = line.find('(').ok_or_else(|| malformed("missing '('"))? + 1;
        let name_end = line[name_start..]
            .find(')')
            .ok_or_else(|| malformed("missing ')'"))?
            + name_start;
        let name = line[name_start..name_end].to_string();

        // Skip the ')' and the separator that follows it
        let mut rest = line[name_end..].chars();
        rest.next();
        if rest.next().is_none() {
            return Err(malformed("truncated after name"));
        }

        let state = rest.next().ok_or_else(|| malformed("missing state"))?;
        let mut fields = rest.as_str().split_whitespace();
        let mut number = |what: &str| {
            fields
                .next()
                .ok_or_else(|| malformed(&format!("missing {what}")))?
                .parse::<u64>()
                .map_err(|_| malformed(&format!("invalid {what}")))
        };

        let ppid = number("ppid")?;
        let pgid = number("pgid")?;
        let sid = number("sid")?;

        Ok(Self {
            name,
            state,
            ppid,
            pgid,
            sid,
        })
    }
}

/// `/proc/self` and `/proc/thread-self` are symlinks to a relative pid
fn resolve_self(value: PathBuf) -> Result<PathBuf, ProcessError> {
    if !value.is_symlink() {
        return Ok(value);
    }

    let target = fs::read_link(&value).map_err(|err| ProcessError::io(&value, err))?;
    if target.is_absolute() {
        return Ok(target);
    }

    Ok(value
        .parent()
        .map(|parent| parent.join(&target))
        .unwrap_or(target))
}

/// Read the target of a per-process symlink such as `exe` or `cwd`.
///
/// Failing to stat the link is an error. A link whose target cannot be read,
/// as for kernel threads or other users' processes, yields an empty path, and
/// so does a path that is not a link at all.
fn resolve_link(path: &Path) -> Result<PathBuf, ProcessError> {
    let metadata = fs::symlink_metadata(path).map_err(|err| ProcessError::io(path, err))?;
    if !metadata.file_type().is_symlink() {
        return Ok(PathBuf::new());
    }

    Ok(fs::read_link(path).unwrap_or_else(|err| {
        log::trace!("cannot read link '{}': {err}", path.display());
        PathBuf::new()
    }))
}

/// Split `/proc/<pid>/cmdline` into arguments
///
/// Only an empty file gives no arguments. The trailing NULs are dropped
/// before splitting, so a file of nothing but NULs gives one empty argument.
fn split_cmdline(raw: &[u8]) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    raw[..end]
        .split(|&b| b == 0)
        .map(|arg| String::from_utf8_lossy(arg).into_owned())
        .collect()
}

/// Only purely decimal names are process directories
fn parse_pid(name: &OsStr) -> Option<usize> {
    let name = name.to_str()?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    name.parse::<usize>().ok()
}

/// Process table rooted at a `/proc`-like directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Take a snapshot of every process in the table.
    ///
    /// Entries are read [READ_DIR_BATCH] at a time. A process that vanishes
    /// or cannot be read while the scan runs is left out of the result;
    /// only failing to read the table itself is an error. The order is
    /// whatever the directory listing gives.
    pub fn processes(&self) -> Result<Vec<ProcessInformation>, ProcessError> {
        self.check_root()?;

        let mut entries = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter();

        let mut result = Vec::new();
        let mut batch = Vec::with_capacity(READ_DIR_BATCH);
        loop {
            let mut read = 0;
            for entry in entries.by_ref().take(READ_DIR_BATCH) {
                read += 1;
                match entry {
                    Ok(entry) => batch.push(entry),
                    Err(err) if is_entry_error(err.depth(), err.path()) => {
                        log::debug!("skipping entry: {err}");
                    }
                    Err(err) => return Err(self.scan_error(err)),
                }
            }
            if read == 0 {
                break;
            }

            result.extend(batch.drain(..).filter_map(populate));
        }

        Ok(result)
    }

    /// Look up one process.
    ///
    /// `Ok(None)` when the table has no directory for `pid`.
    pub fn process(&self, pid: usize) -> Result<Option<ProcessInformation>, ProcessError> {
        let dir = self.root.join(pid.to_string());
        match fs::symlink_metadata(&dir) {
            Ok(metadata) if metadata.is_dir() => ProcessInformation::try_new(dir).map(Some),
            Ok(_) => Ok(None),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ProcessError::io(dir, err)),
        }
    }

    /// The calling process, through `<root>/self`
    pub fn current(&self) -> Result<ProcessInformation, ProcessError> {
        ProcessInformation::try_new(self.root.join("self"))
    }

    /// The table must be a directory that can be stat'ed
    fn check_root(&self) -> Result<(), ProcessError> {
        let metadata = fs::metadata(&self.root).map_err(|source| ProcessError::ProcRoot {
            path: self.root.clone(),
            source,
        })?;
        if metadata.is_dir() {
            return Ok(());
        }

        Err(ProcessError::ProcRoot {
            path: self.root.clone(),
            source: io::Error::from(io::ErrorKind::NotADirectory),
        })
    }

    fn scan_error(&self, err: walkdir::Error) -> ProcessError {
        if err.depth() > 0 {
            return ProcessError::ReadDir(err);
        }

        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("filesystem loop"));
        ProcessError::ProcRoot {
            path: self.root.clone(),
            source,
        }
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(PROC_ROOT)
    }
}

/// An error tied to one entry of the table, rather than to listing it.
///
/// Listing errors carry no path. Entry errors come from stat'ing a single
/// entry, which can vanish between being listed and being looked at.
fn is_entry_error(depth: usize, path: Option<&Path>) -> bool {
    depth > 0 && path.is_some()
}

fn populate(entry: DirEntry) -> Option<ProcessInformation> {
    if !entry.file_type().is_dir() {
        return None;
    }
    let pid = parse_pid(entry.file_name())?;

    match ProcessInformation::try_from(entry) {
        Ok(process) => Some(process),
        Err(err) => {
            log::debug!("skipping process {pid}: {err}");
            None
        }
    }
}
