//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `sidedock_core` linkage and print a data summary.
//! - Offer headless backup, restore and export against the data directory.
//!
//! # Invariants
//! - `summary` only reads; it never creates or rewrites files.
//! - `restore` overwrites the data file and runs only with `--yes`.
//!
//! Usage: `sidedock [summary|backup|restore --yes|export <path>]`.
//! The data directory honours `SIDEDOCK_DATA_DIR`.

use sidedock_core::model::note::extract_tags;
use sidedock_core::{DataStore, Sidebar, SidebarError, SilentAudio, StoragePaths};
use std::collections::BTreeSet;
use std::path::Path;
use std::process::ExitCode;

const CONFIRM_FLAG: &str = "--yes";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let paths = StoragePaths::resolve();

    println!("sidedock_core ping={}", sidedock_core::ping());
    println!("sidedock_core version={}", sidedock_core::core_version());
    println!("data_dir={}", paths.root().display());

    let result = match args.first().map(String::as_str) {
        None | Some("summary") => {
            for line in summary_lines(&paths) {
                println!("{line}");
            }
            return ExitCode::SUCCESS;
        }
        Some("backup") => with_sidebar(paths, |sidebar| {
            let created = sidebar.backup_tick()?;
            println!("backup created={created}");
            Ok(())
        }),
        Some("restore") => {
            if !restore_confirmed(&args[1..]) {
                eprintln!(
                    "restore replaces {} with its backup; rerun as `sidedock restore {CONFIRM_FLAG}`",
                    paths.data_file().display()
                );
                return ExitCode::FAILURE;
            }
            with_sidebar(paths, |sidebar| {
                sidebar.restore_backup()?;
                println!("backup restored");
                Ok(())
            })
        }
        Some("export") => match args.get(1) {
            Some(target) => with_sidebar(paths, |sidebar| {
                let count = sidebar.export_notes(Path::new(target))?;
                println!("exported notes={count} path={target}");
                Ok(())
            }),
            None => {
                eprintln!("usage: sidedock export <path>");
                return ExitCode::FAILURE;
            }
        },
        Some(other) => {
            eprintln!("unknown command `{other}`; expected summary|backup|restore|export");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one file command on a hidden sidebar. The shell never opens, so
/// only the command itself touches the data file.
fn with_sidebar(
    paths: StoragePaths,
    f: impl FnOnce(&mut Sidebar) -> Result<(), SidebarError>,
) -> Result<(), SidebarError> {
    if let Err(err) = sidedock_core::init_for_paths(&paths) {
        eprintln!("logging disabled: {err}");
    }
    let mut sidebar = Sidebar::open(paths, SilentAudio);
    f(&mut sidebar)
}

fn restore_confirmed(flags: &[String]) -> bool {
    flags.iter().any(|flag| flag == CONFIRM_FLAG)
}

fn summary_lines(paths: &StoragePaths) -> Vec<String> {
    let snapshot = DataStore::new(paths.data_file()).load();
    let mut lines = vec![format!("active_list={}", snapshot.active_task_list)];
    for (name, items) in &snapshot.task_lists {
        let done = items.iter().filter(|task| task.completed).count();
        lines.push(format!(
            "list name={name} tasks={} completed={done}",
            items.len()
        ));
    }
    let tags: BTreeSet<String> = snapshot
        .notes
        .iter()
        .flat_map(|note| extract_tags(&note.text))
        .collect();
    lines.push(format!("notes={} tags={}", snapshot.notes.len(), tags.len()));
    lines
}
