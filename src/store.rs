//! Session report persistence.
//!
//! The assessment pipeline never touches storage; callers hand finished
//! [`SessionReport`]s to a [`ReportStore`].

use crate::defaults;
use crate::error::{Result, TingshuoError};
use crate::report::SessionReport;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Key-value store of reports keyed by session id.
pub trait ReportStore: Send + Sync {
    /// Store `report` under `session_id`, replacing any previous report.
    fn save(&self, session_id: &str, report: &SessionReport) -> Result<()>;

    /// Fails with `ReportNotFound` when nothing is stored under `session_id`.
    fn load(&self, session_id: &str) -> Result<SessionReport>;

    /// Stored session ids, sorted.
    fn list(&self) -> Result<Vec<String>>;

    /// Fails with `ReportNotFound` when nothing is stored under `session_id`.
    fn delete(&self, session_id: &str) -> Result<()>;

    fn exists(&self, session_id: &str) -> Result<bool>;
}

/// Session ids are non-empty and limited to ASCII letters, digits, `_` and
/// `-`, so they are always safe as file names.
pub fn validate_session_id(session_id: &str) -> Result<()> {
    let valid = !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(TingshuoError::InvalidSessionId {
            session_id: session_id.to_string(),
        })
    }
}

/// Stores each report as pretty JSON in `<dir>/<session_id>-report.json`.
#[derive(Debug, Clone)]
pub struct FileReportStore {
    dir: PathBuf,
}

impl FileReportStore {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// ~/.local/share/tingshuo/reports on Linux
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join("tingshuo")
            .join("reports")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, session_id: &str) -> Result<PathBuf> {
        validate_session_id(session_id)?;
        Ok(self
            .dir
            .join(format!("{session_id}{}", defaults::REPORT_FILE_SUFFIX)))
    }
}

impl ReportStore for FileReportStore {
    fn save(&self, session_id: &str, report: &SessionReport) -> Result<()> {
        let path = self.path_for(session_id)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, report.to_json_pretty()?)?;
        log::info!("Saved report {session_id} to {}", path.display());
        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<SessionReport> {
        let path = self.path_for(session_id)?;
        match fs::read_to_string(&path) {
            Ok(contents) => SessionReport::from_json(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(TingshuoError::ReportNotFound {
                session_id: session_id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            if let Some(id) = name
                .to_str()
                .and_then(|n| n.strip_suffix(defaults::REPORT_FILE_SUFFIX))
                && validate_session_id(id).is_ok()
            {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        let path = self.path_for(session_id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Deleted report {session_id}");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(TingshuoError::ReportNotFound {
                session_id: session_id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, session_id: &str) -> Result<bool> {
        Ok(self.path_for(session_id)?.is_file())
    }
}

/// In-process store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: Mutex<BTreeMap<String, SessionReport>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn reports(&self) -> MutexGuard<'_, BTreeMap<String, SessionReport>> {
        // A panic mid-insert cannot leave the map half-updated.
        self.reports.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ReportStore for MemoryReportStore {
    fn save(&self, session_id: &str, report: &SessionReport) -> Result<()> {
        validate_session_id(session_id)?;
        self.reports()
            .insert(session_id.to_string(), report.clone());
        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<SessionReport> {
        validate_session_id(session_id)?;
        self.reports()
            .get(session_id)
            .cloned()
            .ok_or_else(|| TingshuoError::ReportNotFound {
                session_id: session_id.to_string(),
            })
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.reports().keys().cloned().collect())
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        validate_session_id(session_id)?;
        self.reports()
            .remove(session_id)
            .map(|_| ())
            .ok_or_else(|| TingshuoError::ReportNotFound {
                session_id: session_id.to_string(),
            })
    }

    fn exists(&self, session_id: &str) -> Result<bool> {
        validate_session_id(session_id)?;
        Ok(self.reports().contains_key(session_id))
    }
}
