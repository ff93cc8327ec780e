// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

mod picker;

use clap::{crate_version, Arg, ArgAction, ArgMatches, Command};
use prettytable::{format::consts::FORMAT_CLEAN, Row, Table};
use std::path::PathBuf;
use uu_psproc::platform::PROC_ROOT;
use uu_psproc::{ProcFs, Process, ProcessInformation};
use uucore::error::{set_exit_code, UResult, USimpleError};
use uucore::show_error;

#[uucore::main]
pub fn uumain(args: impl uucore::Args) -> UResult<()> {
    let matches = uu_app().try_get_matches_from(args)?;
    env_logger::try_init().ok();

    let codes = collect_format(&matches)?;

    let procfs = ProcFs::new(
        matches
            .get_one::<PathBuf>("proc-root")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(PROC_ROOT)),
    );
    log::debug!("reading process table from {}", procfs.root().display());

    let mut processes = collect_processes(&procfs, &matches)?;
    filter_processes(&mut processes, &matches);
    processes.sort_by_key(|it| it.pid());

    print!(
        "{}",
        render(&processes, &codes, !matches.get_flag("no-headers"))
    );

    Ok(())
}

/// Either the pids given with `--pid`, or the whole process table
fn collect_processes(
    procfs: &ProcFs,
    matches: &ArgMatches,
) -> UResult<Vec<ProcessInformation>> {
    let Some(pids) = matches.get_many::<usize>("pid") else {
        return procfs
            .processes()
            .map_err(|err| USimpleError::new(1, err.to_string()));
    };

    let mut processes = Vec::new();
    for &pid in pids {
        match procfs.process(pid) {
            Ok(Some(process)) => processes.push(process),
            Ok(None) => set_exit_code(1),
            Err(err) if err.is_not_found() => set_exit_code(1),
            Err(err) => {
                show_error!("cannot read process {pid}: {err}");
                set_exit_code(1);
            }
        }
    }

    Ok(processes)
}

fn filter_processes(processes: &mut Vec<ProcessInformation>, matches: &ArgMatches) {
    if let Some(ppids) = matches.get_many::<u64>("ppid") {
        let ppids = ppids.copied().collect::<Vec<_>>();
        processes.retain(|it| ppids.contains(&it.parent_pid()));
    }

    if let Some(pgids) = matches.get_many::<u64>("pgid") {
        let pgids = pgids.copied().collect::<Vec<_>>();
        processes.retain(|it| pgids.contains(&it.process_group_id()));
    }
}

fn collect_format(matches: &ArgMatches) -> UResult<Vec<String>> {
    let Some(formats) = matches.get_many::<String>("format") else {
        return Ok(picker::default_codes());
    };

    let mapping = picker::default_mapping();
    let mut codes = Vec::new();
    for code in formats {
        if !mapping.contains_key(code.as_str()) {
            return Err(USimpleError::new(
                1,
                format!("unknown format specifier \"{code}\""),
            ));
        }
        codes.push(code.clone());
    }

    Ok(codes)
}

fn render<P: Process>(processes: &[P], codes: &[String], with_header: bool) -> String {
    let mapping = picker::default_mapping();
    let pickers = picker::collect_pickers(codes);

    let mut table = if with_header {
        let header = codes.iter().flat_map(|it| mapping.get(it.as_str()));
        Table::from_iter([Row::from_iter(header)])
    } else {
        Table::new()
    };
    table.set_format(*FORMAT_CLEAN);

    let rows = processes
        .iter()
        .map(|process| {
            Row::from_iter(pickers.iter().map(|f| f(process as &dyn Process)))
        })
        .collect::<Vec<_>>();
    table.extend(rows);

    table.to_string()
}

pub fn uu_app() -> Command {
    Command::new(uucore::util_name())
        .version(crate_version!())
        .about("List running processes with their executable, directory and arguments")
        .override_usage("pslist [options]")
        .infer_long_args(true)
        .arg(
            Arg::new("pid")
                .short('p')
                .long("pid")
                .help("Only show processes with these PIDs")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(usize))
                .value_name("PID"),
        )
        .arg(
            Arg::new("ppid")
                .long("ppid")
                .help("Only show children of these parent PIDs")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(u64))
                .value_name("PPID"),
        )
        .arg(
            Arg::new("pgid")
                .short('g')
                .long("pgid")
                .help("Only show members of these process groups")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(u64))
                .value_name("PGID"),
        )
        .arg(
            Arg::new("format")
                .short('o')
                .long("format")
                .help("Columns to show: pid, ppid, pgid, comm, exe, cwd, args")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .value_name("FORMAT"),
        )
        .arg(
            Arg::new("no-headers")
                .long("no-headers")
                .help("Do not print the header line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("proc-root")
                .long("proc-root")
                .help("Read the process table from DIR")
                .env("PSPS_PROC_ROOT")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(PROC_ROOT)
                .value_name("DIR"),
        )
}
