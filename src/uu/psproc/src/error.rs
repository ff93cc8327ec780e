// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while enumerating or populating processes
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The process table directory itself could not be opened
    #[error("cannot open process table '{}': {source}", path.display())]
    ProcRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading entries of the process table failed mid-scan
    #[error("cannot read process table: {0}")]
    ReadDir(#[from] walkdir::Error),

    /// A per-process file could not be read or stat'ed
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `/proc/<pid>/stat` did not have the expected layout
    #[error("malformed stat for process {pid}: {reason}")]
    MalformedStat { pid: usize, reason: String },

    /// The directory name is not a decimal process id
    #[error("'{}' is not a process directory", .0.display())]
    InvalidPidDirectory(PathBuf),

    /// No provider exists for this platform
    #[error("process enumeration is not supported on {0}")]
    Unsupported(&'static str),
}

impl ProcessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error means the process is simply gone
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } | Self::ProcRoot { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}
