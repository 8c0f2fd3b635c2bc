//! Bulk import from pasted schedule text

use crate::error::{Result, TimetableError};
use crate::import::{ImportOptions, ImportOutcome, ImportReport};
use crate::schedule::ScheduleStore;
use anyhow::Context;
use colored::Colorize;
use std::io::Read;
use std::path::Path;

/// Read import text from a file, or from stdin when `file` is `None` or `-`
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read import text from stdin")?;
            Ok(text)
        }
    }
}

/// Import `text` into the store and print the report
///
/// # Errors
///
/// Returns an error when the text holds no groups, storage fails, a
/// schedule conflict rejects the batch, or every group failed to parse
pub fn run_import(
    store: &mut ScheduleStore,
    text: &str,
    options: ImportOptions,
) -> Result<ImportReport> {
    let report = store.import(text, options)?;
    print_report(&report);

    if let ImportOutcome::Rejected { conflicts } = &report.outcome {
        return Err(TimetableError::Import(format!(
            "import aborted: {} schedule conflict(s), nothing was added",
            conflicts.len()
        ))
        .into());
    }

    if report.added_count() == 0 && !report.errors.is_empty() {
        return Err(TimetableError::Import(format!(
            "no sessions added: all {} group(s) failed to parse",
            report.errors.len()
        ))
        .into());
    }

    Ok(report)
}

/// Print one summary of the import
pub fn print_report(report: &ImportReport) {
    for warning in &report.warnings {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }

    match &report.outcome {
        ImportOutcome::Committed { added } => {
            let summary = format!("Imported {} session(s)", added.len());
            if added.is_empty() {
                println!("{}", summary.yellow());
            } else {
                println!("{}", summary.green());
            }
        }
        ImportOutcome::Rejected { conflicts } => {
            println!("{}", "Import rejected: schedule conflicts found".red().bold());
            for conflict in conflicts {
                println!("  {}", conflict);
            }
        }
    }

    if !report.errors.is_empty() {
        println!(
            "{}",
            format!("Skipped {} group(s):", report.errors.len()).yellow()
        );
        for issue in &report.errors {
            println!("  {}", issue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CLEAN: &str = "1\nT2(S)\nTiết 1-3\n1-8\nD9-301\n1\tIT3080\tComputer Networks\tLT\n";

    #[test]
    fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", CLEAN).unwrap();
        assert_eq!(read_input(Some(file.path())).unwrap(), CLEAN);
    }

    #[test]
    fn test_read_input_missing_file() {
        assert!(read_input(Some(Path::new("/nonexistent/tkb.txt"))).is_err());
    }

    #[test]
    fn test_run_import_commits() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        let report = run_import(&mut store, CLEAN, ImportOptions::default()).unwrap();
        assert_eq!(report.added_count(), 1);
        assert_eq!(store.sessions()[0].code, "IT3080");
    }

    #[test]
    fn test_run_import_conflict_is_an_error() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        run_import(&mut store, CLEAN, ImportOptions::default()).unwrap();

        let err = run_import(&mut store, CLEAN, ImportOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TimetableError>(),
            Some(TimetableError::Import(_))
        ));
        assert_eq!(store.sessions().len(), 1);
    }

    #[test]
    fn test_run_import_all_groups_failed_is_an_error() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        let text = "1\nT9(S)\nTiết 1-3\n1-8\nD9-301\n1\tIT3080\tNetworks\n";

        let err = run_import(&mut store, text, ImportOptions::default()).unwrap_err();
        assert!(err.to_string().contains("all 1 group(s) failed to parse"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_run_import_empty_text_is_an_error() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        assert!(run_import(&mut store, "  \n", ImportOptions::default()).is_err());
    }
}
