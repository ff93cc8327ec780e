// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Per-platform process enumeration
//!
//! This crate lists the processes running on the host and exposes, for each
//! of them, the identity, parentage, executable path, working directory and
//! command line through the [`Process`] trait. Every call takes a fresh
//! snapshot; nothing is cached between calls.
//!
//! # Example
//!
//! ```no_run
//! use uu_psproc::{processes, Process};
//!
//! for process in processes().unwrap() {
//!     println!("{} {} {:?}", process.pid(), process.name(), process.command_line());
//! }
//! ```

pub mod error;
pub mod platform;
pub mod process;

pub use error::ProcessError;
pub use platform::{find_process, processes, ProcFs, ProcessInformation};
pub use process::Process;
