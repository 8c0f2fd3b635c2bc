//! Timetabler - personal class timetable editor library
//!
//! This library provides the core of the Timetabler CLI: the bulk import
//! parser for pasted schedule text, conflict detection, the persisted
//! schedule store with per-course colors, and the weekly grid projection.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `timetable`: Period table, week calendar, session types and the conflict rule
//! - `import`: Bulk text parser producing session drafts and per-group issues
//! - `schedule`: The schedule store, course colors and the persisted snapshot
//! - `grid`: Pure period x day grid projection
//! - `storage`: Durable key-value storage (sled) and an in-memory backend
//! - `theme`: Light/dark preference
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```
//! use timetabler::import::ImportOptions;
//! use timetabler::storage::MemoryStore;
//! use timetabler::ScheduleStore;
//!
//! let mut store = ScheduleStore::open(MemoryStore::new());
//! let text = "1\nT2(S)\nTiết 1-3\n1-8\nD9-301\n1\tIT3080\tComputer Networks\tLT\n";
//! let report = store.import(text, ImportOptions::default()).unwrap();
//! assert_eq!(report.added_count(), 1);
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod grid;
pub mod import;
pub mod logging;
pub mod schedule;
pub mod storage;
pub mod theme;
pub mod timetable;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TimetableError};
pub use grid::{render_grid, Grid, GridCell, WeekFilter};
pub use import::{ImportOptions, ImportParser, ImportReport};
pub use schedule::ScheduleStore;
pub use storage::{KeyValueStore, MemoryStore, SledStore};
pub use theme::Theme;
pub use timetable::{Day, PeriodRange, SessionDraft, SessionRecord};
