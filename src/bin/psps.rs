// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

type UtilMain = fn(std::vec::IntoIter<OsString>) -> i32;

const UTILS: &[(&str, UtilMain)] = &[(
    "pslist",
    |args: std::vec::IntoIter<OsString>| pslist::uumain(args),
)];

fn usage(name: &str) {
    println!("{name} {VERSION} (multi-call binary)\n");
    println!("Usage: {name} [function [arguments...]]\n");
    println!("Currently defined functions:\n");
    for (util, _) in UTILS {
        println!("    {util}");
    }
}

fn find_util(name: &str) -> Option<UtilMain> {
    UTILS
        .iter()
        .find(|(util, _)| *util == name)
        .map(|&(_, uumain)| uumain)
}

fn binary_path(args: &mut impl Iterator<Item = OsString>) -> PathBuf {
    match args.next() {
        Some(ref s) if !s.is_empty() => PathBuf::from(s),
        _ => std::env::current_exe().unwrap_or_default(),
    }
}

fn name(binary_path: &Path) -> Option<&str> {
    binary_path.file_stem()?.to_str()
}

fn not_found(util: &OsStr) -> ! {
    println!("{}: function/utility not found", util.to_string_lossy());
    process::exit(1);
}

fn main() {
    uucore::panic::mute_sigpipe_panic();

    let mut args = uucore::args_os();
    let binary = binary_path(&mut args);
    let Some(binary_as_util) = name(&binary) else {
        usage("<unknown binary name>");
        process::exit(0);
    };

    // Invoked through a link named after the utility
    if let Some(uumain) = find_util(binary_as_util) {
        let argv = std::iter::once(binary.clone().into_os_string())
            .chain(args)
            .collect::<Vec<_>>();
        process::exit(uumain(argv.into_iter()));
    }

    uucore::set_utility_is_second_arg();
    let Some(util_os) = args.next() else {
        usage(binary_as_util);
        process::exit(0);
    };

    match util_os.to_str() {
        Some("--help" | "-h") => {
            usage(binary_as_util);
            process::exit(0);
        }
        Some("--version" | "-V") => {
            println!("{binary_as_util} {VERSION} (multi-call binary)");
            process::exit(0);
        }
        Some(util) => match find_util(util) {
            Some(uumain) => {
                let argv = std::iter::once(util_os.clone())
                    .chain(args)
                    .collect::<Vec<_>>();
                process::exit(uumain(argv.into_iter()));
            }
            None => not_found(&util_os),
        },
        None => not_found(&util_os),
    }
}
