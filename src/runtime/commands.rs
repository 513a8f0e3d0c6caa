use std::error::Error;
use std::io::Write;
use std::time::Duration;

use tracing::warn;

use super::cli::Command;
use crate::app::Explorer;
use crate::error::ShelfError;
use crate::library::tree_lines;
use crate::metadata::{Length, RecordHandle};

/// Run one command against the explorer, writing its output to `out`.
/// Returns whether the library changed and needs saving.
pub fn execute(
    command: &Command,
    explorer: &mut Explorer,
    out: &mut impl Write,
) -> Result<bool, Box<dyn Error>> {
    match command {
        Command::Add { dir } => match explorer.add_directory(dir) {
            Ok(0) => {
                writeln!(out, "No audio files under {}.", dir.display())?;
                Ok(false)
            }
            Ok(_) => {
                writeln!(out, "Added {} to the library.", dir.display())?;
                Ok(true)
            }
            Err(e) => {
                writeln!(out, "Failed to add {} to the library.", dir.display())?;
                Err(e.into())
            }
        },
        Command::Remove { dir } => {
            let removed = explorer.remove_directory(dir)?;
            writeln!(
                out,
                "Removed {} ({} directories) from the library.",
                dir.display(),
                removed.len()
            )?;
            Ok(true)
        }
        Command::Tree => {
            let index = explorer.index();
            if index.is_empty() {
                writeln!(out, "The library is empty.")?;
                return Ok(false);
            }
            for line in tree_lines(index) {
                writeln!(out, "{line}")?;
            }
            let roots: Vec<String> = index
                .roots()
                .map(|r| r.path.display().to_string())
                .collect();
            writeln!(
                out,
                "{} directories indexed under {}.",
                index.len(),
                roots.join(", ")
            )?;
            Ok(false)
        }
        Command::Show { dir, wait_ms } => {
            let records = match explorer.list_directory(dir) {
                Ok(records) => records,
                Err(e @ ShelfError::TooManyFiles { .. }) => {
                    writeln!(
                        out,
                        "{} has too many items to display at once.",
                        dir.display()
                    )?;
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            };
            settle(explorer, *wait_ms);
            write_table(out, &records)?;
            writeln!(out, "Showing results from {}.", dir.display())?;
            Ok(false)
        }
        Command::Search { term, wait_ms } => {
            if term.is_empty() {
                return Err("search term must not be empty".into());
            }
            let outcome = explorer.search(term);
            settle(explorer, *wait_ms);
            write_table(out, &outcome.records)?;
            writeln!(
                out,
                "Showing {} matches for {} out of {} records.",
                outcome.records.len(),
                term,
                outcome.scanned
            )?;
            Ok(false)
        }
        Command::Clear => {
            explorer.clear();
            writeln!(out, "Cleared the library.")?;
            Ok(true)
        }
    }
}

fn settle(explorer: &mut Explorer, wait_ms: u64) {
    let applied = explorer.wait_for_resolutions(Duration::from_millis(wait_ms));
    let unreadable = applied
        .iter()
        .filter(|r| r.length == Length::Unknown)
        .count();
    if unreadable > 0 {
        warn!(unreadable, "some durations could not be read");
    }
    let pending = explorer.pending_resolutions();
    if pending > 0 {
        warn!(pending, "durations still resolving, showing placeholders");
    }
}

fn write_table(out: &mut impl Write, records: &[RecordHandle]) -> std::io::Result<()> {
    for handle in records {
        let Ok(record) = handle.lock() else {
            continue;
        };
        let [name, kind, length] = record.row();
        let index = record.index.map(|i| i + 1).unwrap_or_default();
        writeln!(out, "{index:>4}  {name:<40} {kind:<6} {length:>8}")?;
    }
    Ok(())
}
