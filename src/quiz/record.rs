use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use crate::error::{QuizError, Result};

/// Best values reached. Used both for one session and for the all-time record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    pub score: i64,
    pub round_count: u32,
    pub streak: u32,
}

impl Record {
    pub fn new(score: i64, round_count: u32, streak: u32) -> Self {
        Self {
            score,
            round_count,
            streak,
        }
    }

    /// Field-wise maximum of the two records.
    pub fn merge(&self, other: &Record) -> Record {
        Record {
            score: self.score.max(other.score),
            round_count: self.round_count.max(other.round_count),
            streak: self.streak.max(other.streak),
        }
    }
}

/// Which fields of the stored record a session beat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrokenRecords {
    pub score: bool,
    pub round_count: bool,
    pub streak: bool,
}

impl BrokenRecords {
    /// With no previous record every field counts as broken.
    pub fn compare(previous: Option<&Record>, session: &Record) -> Self {
        match previous {
            None => Self {
                score: true,
                round_count: true,
                streak: true,
            },
            Some(prev) => Self {
                score: session.score > prev.score,
                round_count: session.round_count > prev.round_count,
                streak: session.streak > prev.streak,
            },
        }
    }

    pub fn any(&self) -> bool {
        self.score || self.round_count || self.streak
    }
}

pub trait RecordStore {
    /// `None` when nothing usable is stored; unreadable and missing look the same.
    fn load(&self) -> Option<Record>;

    fn save(&self, record: &Record) -> Result<()>;
}

pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "record.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for JsonRecordStore {
    fn load(&self) -> Option<Record> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                info!("No record loaded from {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Ignoring malformed record at {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, record: &Record) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    QuizError::Record(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| QuizError::Record(format!("cannot serialize record: {}", e)))?;

        // write next to the target, then rename over it
        let temp_path = self.temp_path();
        fs::write(&temp_path, json).map_err(|e| {
            QuizError::Record(format!("cannot write {}: {}", temp_path.display(), e))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            QuizError::Record(format!("cannot replace {}: {}", self.path.display(), e))
        })?;

        info!("Saved record {:?} to {}", record, self.path.display());
        Ok(())
    }
}
