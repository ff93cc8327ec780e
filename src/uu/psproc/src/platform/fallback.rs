// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

#![allow(unused)]

use crate::error::ProcessError;
use crate::platform::PROC_ROOT;
use crate::process::Process;
use std::env::consts::OS;
use std::path::{Path, PathBuf};

/// Process ID and its information (unsupported platforms)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInformation {
    pid: usize,
    ppid: u64,
    pgid: u64,
    name: String,
    image_path: PathBuf,
    cwd: PathBuf,
    cmdline: Vec<String>,
}

impl ProcessInformation {
    pub fn try_new(_value: PathBuf) -> Result<Self, ProcessError> {
        Err(ProcessError::Unsupported(OS))
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

/// Process table provider; every operation fails with [ProcessError::Unsupported]
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

    pub fn processes(&self) -> Result<Vec<ProcessInformation>, ProcessError> {
        Err(ProcessError::Unsupported(OS))
    }

    pub fn process(&self, _pid: usize) -> Result<Option<ProcessInformation>, ProcessError> {
        Err(ProcessError::Unsupported(OS))
    }

    pub fn current(&self) -> Result<ProcessInformation, ProcessError> {
        Err(ProcessError::Unsupported(OS))
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(PROC_ROOT)
    }
}
