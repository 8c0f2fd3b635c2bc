//! The schedule store
//!
//! [`ScheduleStore`] owns every session record and the course color table.
//! All mutation goes through `add`, `import`, `remove` and `reset_all`; each
//! one writes a full snapshot to storage before returning.

pub mod colors;
pub mod snapshot;

pub use colors::{CourseColors, PALETTE};
pub use snapshot::ScheduleSnapshot;

use crate::error::{Result, TimetableError};
use crate::import::{
    ConflictPair, ImportBatch, ImportOptions, ImportOutcome, ImportParser, ImportReport,
};
use crate::storage::{KeyValueStore, SCHEDULE_KEY};
use crate::timetable::conflict::{conflicts_with, drafts_overlap, has_conflict};
use crate::timetable::session::{Day, PeriodRange, SessionDraft, SessionRecord};

/// In-memory schedule backed by durable storage
pub struct ScheduleStore {
    sessions: Vec<SessionRecord>,
    colors: CourseColors,
    storage: Box<dyn KeyValueStore>,
}

impl ScheduleStore {
    /// Restore the schedule saved in `storage`
    ///
    /// A missing snapshot yields an empty schedule. An unreadable or corrupt
    /// one is logged and ignored, also yielding an empty schedule.
    pub fn open(storage: impl KeyValueStore + 'static) -> Self {
        let snapshot = match storage.get(SCHEDULE_KEY) {
            Ok(Some(bytes)) => match ScheduleSnapshot::from_json(&bytes) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!("Ignoring corrupt schedule snapshot: {}", e);
                    ScheduleSnapshot::default()
                }
            },
            Ok(None) => ScheduleSnapshot::default(),
            Err(e) => {
                tracing::warn!("Failed to read schedule snapshot: {}", e);
                ScheduleSnapshot::default()
            }
        };

        tracing::debug!(sessions = snapshot.subjects.len(), "Loaded schedule");

        Self {
            sessions: snapshot.subjects,
            colors: CourseColors::from_parts(snapshot.color_counter, snapshot.course_color_map),
            storage: Box::new(storage),
        }
    }

    /// All sessions in insertion order
    pub fn sessions(&self) -> &[SessionRecord] {
        &self.sessions
    }

    /// Whether the schedule is empty
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Session by exact id
    pub fn get(&self, id: &str) -> Option<&SessionRecord> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Resolve a full id or a unique id prefix
    ///
    /// # Errors
    ///
    /// `SessionNotFound` when nothing matches, `AmbiguousSessionId` when the
    /// prefix matches more than one session.
    pub fn resolve_id(&self, id_or_prefix: &str) -> Result<String> {
        if let Some(session) = self.get(id_or_prefix) {
            return Ok(session.id.clone());
        }

        let needle = id_or_prefix.to_uppercase();
        let matches: Vec<&SessionRecord> = self
            .sessions
            .iter()
            .filter(|s| !needle.is_empty() && s.id.starts_with(&needle))
            .collect();

        match matches.as_slice() {
            [only] => Ok(only.id.clone()),
            [] => Err(TimetableError::SessionNotFound(id_or_prefix.to_string()).into()),
            many => Err(TimetableError::AmbiguousSessionId {
                prefix: id_or_prefix.to_string(),
                count: many.len(),
            }
            .into()),
        }
    }

    /// Palette class assigned to a course code
    pub fn color_for(&self, code: &str) -> Option<&str> {
        self.colors.get(code)
    }

    /// Whether `(day, periods)` overlaps a stored session
    pub fn has_conflict(&self, day: Day, periods: PeriodRange, exclude_id: Option<&str>) -> bool {
        has_conflict(&self.sessions, day, periods, exclude_id)
    }

    /// Current state in serializable form
    pub fn snapshot(&self) -> ScheduleSnapshot {
        ScheduleSnapshot {
            subjects: self.sessions.clone(),
            color_counter: self.colors.counter(),
            course_color_map: self.colors.as_map().clone(),
        }
    }

    /// Add one session unless it overlaps an existing one
    ///
    /// # Errors
    ///
    /// `InvalidSession` for blank name or code, `ScheduleConflict` when the
    /// slot is taken, or a storage error if the snapshot cannot be written.
    pub fn add(&mut self, draft: SessionDraft) -> Result<SessionRecord> {
        if draft.name.trim().is_empty() {
            return Err(TimetableError::InvalidSession("course name is empty".to_string()).into());
        }
        if draft.code.trim().is_empty() {
            return Err(TimetableError::InvalidSession("course code is empty".to_string()).into());
        }

        if let Some(existing) = conflicts_with(&self.sessions, draft.day, draft.periods, None).next()
        {
            return Err(TimetableError::ScheduleConflict {
                candidate: draft.to_string(),
                existing: existing.to_string(),
            }
            .into());
        }

        let record = self.admit(draft);
        self.persist()?;
        tracing::info!(id = %record.id, code = %record.code, "Added session");
        Ok(record)
    }

    /// Parse pasted text and admit it as one batch
    pub fn import(&mut self, text: &str, options: ImportOptions) -> Result<ImportReport> {
        let batch = ImportParser::new(options).parse(text)?;
        self.import_batch(batch)
    }

    /// Admit parsed drafts all-or-nothing
    ///
    /// Every draft is checked against the stored sessions and against the
    /// drafts before it. A single overlap rejects the whole batch and leaves
    /// the store untouched.
    pub fn import_batch(&mut self, batch: ImportBatch) -> Result<ImportReport> {
        let ImportBatch {
            drafts,
            errors,
            warnings,
        } = batch;

        let conflicts = self.batch_conflicts(&drafts);
        if !conflicts.is_empty() {
            tracing::warn!(
                conflicts = conflicts.len(),
                "Import rejected due to schedule conflicts"
            );
            return Ok(ImportReport {
                outcome: ImportOutcome::Rejected { conflicts },
                errors,
                warnings,
            });
        }

        let added: Vec<String> = drafts
            .into_iter()
            .map(|draft| self.admit(draft).id)
            .collect();

        if !added.is_empty() {
            self.persist()?;
        }
        tracing::info!(added = added.len(), skipped = errors.len(), "Imported sessions");

        Ok(ImportReport {
            outcome: ImportOutcome::Committed { added },
            errors,
            warnings,
        })
    }

    fn batch_conflicts(&self, drafts: &[SessionDraft]) -> Vec<ConflictPair> {
        let mut pairs = Vec::new();
        for (i, draft) in drafts.iter().enumerate() {
            for existing in conflicts_with(&self.sessions, draft.day, draft.periods, None) {
                pairs.push(ConflictPair {
                    candidate: draft.to_string(),
                    other: existing.to_string(),
                    other_is_existing: true,
                });
            }
            for earlier in drafts[..i].iter().filter(|d| drafts_overlap(d, draft)) {
                pairs.push(ConflictPair {
                    candidate: draft.to_string(),
                    other: earlier.to_string(),
                    other_is_existing: false,
                });
            }
        }
        pairs
    }

    /// Delete a session by id
    ///
    /// Retires the course color when no other session of the course remains.
    /// Returns `None` when no session has that id.
    pub fn remove(&mut self, id: &str) -> Result<Option<SessionRecord>> {
        let Some(index) = self.sessions.iter().position(|s| s.id == id) else {
            return Ok(None);
        };

        let removed = self.sessions.remove(index);
        if !self.sessions.iter().any(|s| s.code == removed.code) {
            self.colors.retire(&removed.code);
        }

        self.persist()?;
        tracing::info!(id = %removed.id, code = %removed.code, "Removed session");
        Ok(Some(removed))
    }

    /// Drop every session and color assignment
    pub fn reset_all(&mut self) -> Result<()> {
        let count = self.sessions.len();
        self.sessions.clear();
        self.colors.clear();
        self.persist()?;
        tracing::info!(removed = count, "Reset schedule");
        Ok(())
    }

    fn admit(&mut self, draft: SessionDraft) -> SessionRecord {
        let color = self.colors.assign(&draft.code);
        let record = SessionRecord::from_draft(draft, color);
        self.sessions.push(record.clone());
        record
    }

    fn persist(&self) -> Result<()> {
        let bytes = self.snapshot().to_json()?;
        self.storage.put(SCHEDULE_KEY, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn draft(code: &str, day: Day, start: u8, end: u8) -> SessionDraft {
        SessionDraft {
            name: format!("Course {}", code),
            code: code.to_string(),
            day,
            periods: PeriodRange::new(start, end).unwrap(),
            room: "D9-301".to_string(),
            class_type: None,
            weeks: Vec::new(),
        }
    }

    fn group(seq: u32, marker: &str, periods: &str, code: &str) -> String {
        format!(
            "{}\n{}\n{}\n1-16\nD9-301\nx\t{}\tCourse {}\n",
            seq, marker, periods, code, code
        )
    }

    #[test]
    fn test_open_empty_storage() {
        let store = ScheduleStore::open(MemoryStore::new());
        assert!(store.is_empty());
        assert_eq!(store.snapshot(), ScheduleSnapshot::default());
    }

    #[test]
    fn test_open_corrupt_snapshot_yields_empty_store() {
        let storage = MemoryStore::new();
        storage.put(SCHEDULE_KEY, b"{broken").unwrap();
        let store = ScheduleStore::open(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_assigns_color_and_persists() {
        let storage = MemoryStore::new();
        let mut store = ScheduleStore::open(storage.clone());

        let record = store.add(draft("IT3080", Day::Monday, 1, 3)).unwrap();
        assert_eq!(record.color(), "color-1");
        assert_eq!(store.color_for("IT3080"), Some("color-1"));

        let reopened = ScheduleStore::open(storage);
        assert_eq!(reopened.sessions(), store.sessions());
    }

    #[test]
    fn test_add_same_course_reuses_color() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        store.add(draft("IT3080", Day::Monday, 1, 3)).unwrap();
        let second = store.add(draft("IT3080", Day::Friday, 1, 3)).unwrap();
        assert_eq!(second.color(), "color-1");
        assert_eq!(store.snapshot().color_counter, 1);
    }

    #[test]
    fn test_add_rejects_conflict() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        store.add(draft("IT3080", Day::Monday, 1, 3)).unwrap();

        let err = store
            .add(draft("IT3090", Day::Monday, 3, 5))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TimetableError>(),
            Some(TimetableError::ScheduleConflict { .. })
        ));
        assert_eq!(store.sessions().len(), 1);
        assert_eq!(store.color_for("IT3090"), None);
    }

    #[test]
    fn test_add_rejects_blank_code() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        let err = store.add(draft(" ", Day::Monday, 1, 3)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TimetableError>(),
            Some(TimetableError::InvalidSession(_))
        ));
    }

    #[test]
    fn test_remove_last_session_retires_color() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        store.add(draft("A", Day::Monday, 1, 2)).unwrap();
        let b = store.add(draft("B", Day::Monday, 3, 4)).unwrap();
        assert_eq!(b.color(), "color-2");

        store.remove(&b.id).unwrap().expect("session removed");
        assert_eq!(store.color_for("B"), None);

        let c = store.add(draft("C", Day::Tuesday, 1, 2)).unwrap();
        assert_eq!(c.color(), "color-2");
    }

    #[test]
    fn test_remove_non_last_session_keeps_color() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        let first = store.add(draft("A", Day::Monday, 1, 2)).unwrap();
        store.add(draft("A", Day::Tuesday, 1, 2)).unwrap();

        store.remove(&first.id).unwrap();
        assert_eq!(store.color_for("A"), Some("color-1"));
        assert_eq!(store.snapshot().color_counter, 1);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        assert!(store.remove("missing").unwrap().is_none());
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let storage = MemoryStore::new();
        let mut store = ScheduleStore::open(storage.clone());
        store.add(draft("A", Day::Monday, 1, 2)).unwrap();
        store.add(draft("B", Day::Monday, 3, 4)).unwrap();

        store.reset_all().unwrap();
        assert!(store.is_empty());
        assert_eq!(store.snapshot(), ScheduleSnapshot::default());

        let reopened = ScheduleStore::open(storage);
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_resolve_id_by_prefix() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        let record = store.add(draft("A", Day::Monday, 1, 2)).unwrap();

        assert_eq!(store.resolve_id(&record.id).unwrap(), record.id);
        let prefix = record.id[..20].to_lowercase();
        assert_eq!(store.resolve_id(&prefix).unwrap(), record.id);

        let err = store.resolve_id("ZZZZ").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TimetableError>(),
            Some(TimetableError::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_import_commits_clean_batch() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        let text = format!(
            "{}{}",
            group(1, "T2(S)", "Tiết 1-3", "IT3080"),
            group(2, "T2(C)", "Tiết 1-3", "IT3090")
        );

        let report = store.import(&text, ImportOptions::default()).unwrap();
        assert_eq!(report.added_count(), 2);
        assert!(report.errors.is_empty());
        assert_eq!(store.sessions().len(), 2);
        assert_eq!(store.color_for("IT3090"), Some("color-2"));
    }

    #[test]
    fn test_import_conflict_between_candidates_aborts_batch() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        store.add(draft("MI1111", Day::Friday, 1, 2)).unwrap();
        let before = store.snapshot();

        let text = format!(
            "{}{}",
            group(1, "T2(S)", "Tiết 1-3", "IT3080"),
            group(2, "T2(S)", "Tiết 3-4", "IT3090")
        );
        let report = store.import(&text, ImportOptions::default()).unwrap();

        match &report.outcome {
            ImportOutcome::Rejected { conflicts } => {
                assert_eq!(conflicts.len(), 1);
                assert!(!conflicts[0].other_is_existing);
                assert!(conflicts[0].candidate.contains("IT3090"));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_import_conflict_with_existing_aborts_batch() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        store.add(draft("MI1111", Day::Monday, 2, 2)).unwrap();

        let text = group(1, "T2(S)", "Tiết 1-3", "IT3080");
        let report = store.import(&text, ImportOptions::default()).unwrap();

        assert!(report.is_rejected());
        assert_eq!(store.sessions().len(), 1);
        assert_eq!(store.color_for("IT3080"), None);
    }

    #[test]
    fn test_import_keeps_good_groups_and_reports_bad_ones() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        let text = format!(
            "{}{}",
            group(1, "T2(S)", "Tiết 1-3", "IT3080"),
            group(2, "T2(S)", "7:00 - 9:10", "IT3090")
        );

        let report = store.import(&text, ImportOptions::default()).unwrap();
        assert_eq!(report.added_count(), 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].group, 2);
    }
}
