//! Serialized form of the schedule

use crate::timetable::session::{is_physical_education, SessionRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Everything written under the schedule key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    pub subjects: Vec<SessionRecord>,
    pub color_counter: usize,
    pub course_color_map: BTreeMap<String, String>,
}

impl ScheduleSnapshot {
    /// Decode a stored snapshot
    pub fn from_json(bytes: &[u8]) -> Result<Self, String> {
        let snapshot: Self = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
        snapshot.check()?;
        Ok(snapshot)
    }

    /// Encode for storage
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Structural checks serde cannot express
    fn check(&self) -> Result<(), String> {
        let mut ids = HashSet::new();
        for record in &self.subjects {
            if !record.periods.is_valid() {
                return Err(format!("session {} has invalid periods", record.id));
            }
            if !ids.insert(record.id.as_str()) {
                return Err(format!("duplicate session id {}", record.id));
            }
            match self.course_color_map.get(&record.code) {
                None => return Err(format!("course {} has no color", record.code)),
                Some(color) if color != record.color() => {
                    return Err(format!(
                        "session {} has color {} but course {} maps to {}",
                        record.id,
                        record.color(),
                        record.code,
                        color
                    ));
                }
                Some(_) => {}
            }
            if record.is_physical_education() != is_physical_education(&record.code) {
                return Err(format!(
                    "session {} has a PE flag that disagrees with code {}",
                    record.id, record.code
                ));
            }
        }
        Ok(())
    }
}
