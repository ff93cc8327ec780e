// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::collections::HashMap;
use uu_psproc::Process;

pub(crate) type Picker = Box<dyn Fn(&dyn Process) -> String>;

/// Column codes accepted by `--format`, with their headers
pub(crate) fn default_mapping() -> HashMap<&'static str, &'static str> {
    let mut mapping = HashMap::new();
    let mut append =
        |code: &'static str, header: &'static str| mapping.insert(code, header);

    append("pid", "PID");
    append("ppid", "PPID");
    append("pgid", "PGID");
    append("pgrp", "PGID");
    append("comm", "CMD");
    append("ucmd", "CMD");
    append("exe", "EXE");
    append("cwd", "CWD");
    append("args", "COMMAND");
    append("cmd", "COMMAND");
    append("command", "COMMAND");

    mapping
}

pub(crate) fn default_codes() -> Vec<String> {
    ["pid", "ppid", "pgid", "comm", "args"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub(crate) fn collect_pickers(code_order: &[String]) -> Vec<Picker> {
    let mut pickers = Vec::new();

    for code in code_order {
        match code.as_str() {
            "pid" => pickers.push(helper(pid)),
            "ppid" => pickers.push(helper(ppid)),
            "pgid" | "pgrp" => pickers.push(helper(pgid)),
            "comm" | "ucmd" => pickers.push(helper(comm)),
            "exe" => pickers.push(helper(exe)),
            "cwd" => pickers.push(helper(cwd)),
            "args" | "cmd" | "command" => pickers.push(helper(args)),
            _ => {}
        }
    }

    pickers
}

#[inline]
fn helper(f: impl Fn(&dyn Process) -> String + 'static) -> Picker {
    Box::new(f)
}

fn pid(process: &dyn Process) -> String {
    process.pid().to_string()
}

fn ppid(process: &dyn Process) -> String {
    process.parent_pid().to_string()
}

fn pgid(process: &dyn Process) -> String {
    process.process_group_id().to_string()
}

fn comm(process: &dyn Process) -> String {
    process.name().into()
}

/// Unresolved paths are shown as `-`
fn exe(process: &dyn Process) -> String {
    display_path(process.image_path())
}

fn cwd(process: &dyn Process) -> String {
    display_path(process.working_directory())
}

fn display_path(path: &std::path::Path) -> String {
    if path.as_os_str().is_empty() {
        "-".into()
    } else {
        path.display().to_string()
    }
}

/// Processes without a command line (kernel threads, zombies) show their name in brackets
fn args(process: &dyn Process) -> String {
    if process.command_line().iter().all(String::is_empty) {
        format!("[{}]", process.name())
    } else {
        process.command_line_display()
    }
}
