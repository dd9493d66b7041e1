//! Import sessions and their persistence.
//!
//! A session remembers one upload across steps: the file, the chosen schema
//! and the mapping being edited. [`FileSessionStore`] keeps one pretty-printed
//! JSON document per session, named `{id}.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabmap_ingest::FileType;
use tabmap_model::Mapping;
use tracing::debug;
use uuid::Uuid;

use crate::error::SessionError;

pub type Result<T> = std::result::Result<T, SessionError>;

/// State of one import in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSession {
    pub id: Uuid,
    pub original_filename: String,
    pub file_type: FileType,
    #[serde(default)]
    pub target_schema: Option<String>,
    #[serde(default)]
    pub mapping: Mapping,
    /// Source headers, kept so the mapping can be re-suggested after a
    /// schema change without reading the file again.
    #[serde(default)]
    pub columns: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ImportSession {
    pub fn new(original_filename: impl Into<String>, file_type: FileType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            original_filename: original_filename.into(),
            file_type,
            target_schema: None,
            mapping: Mapping::new(),
            columns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Choose the target schema. A previous mapping no longer applies and is
    /// cleared.
    pub fn select_schema(&mut self, schema: impl Into<String>) {
        self.target_schema = Some(schema.into());
        self.mapping = Mapping::new();
        self.touch();
    }

    pub fn set_mapping(&mut self, mapping: Mapping) {
        self.mapping = mapping;
        self.touch();
    }

    /// Point `column` at `target` (or unmap it), replacing the mapping.
    pub fn update_mapping(&mut self, column: &str, target: Option<&str>) {
        self.mapping = self.mapping.with_target(column, target);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Persistence for [`ImportSession`]s.
pub trait SessionStore: Send + Sync {
    /// Insert or replace a session.
    fn save(&self, session: &ImportSession) -> Result<()>;

    /// `None` when no session has this id.
    fn load(&self, id: Uuid) -> Result<Option<ImportSession>>;

    /// Returns whether a session was removed.
    fn delete(&self, id: Uuid) -> Result<bool>;

    /// All sessions, oldest first.
    fn list(&self) -> Result<Vec<ImportSession>>;

    /// Like [`SessionStore::load`], failing when the session is absent.
    fn get(&self, id: Uuid) -> Result<ImportSession> {
        self.load(id)?.ok_or(SessionError::NotFound { id })
    }
}

// =============================================================================
// File store
// =============================================================================

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_dir: PathBuf,
}

impl FileSessionStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| SessionError::Io {
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn session_path(&self, id: Uuid) -> PathBuf {
        self.base_dir.join(format!("{id}.json"))
    }

    fn read_session(path: &Path) -> Result<ImportSession> {
        let content = fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SessionError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: &ImportSession) -> Result<()> {
        let path = self.session_path(session.id);
        let json = serde_json::to_string_pretty(session).map_err(|source| SessionError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(session = %session.id, path = %path.display(), "saved session");
        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<Option<ImportSession>> {
        let path = self.session_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let session = Self::read_session(&path)?;
        debug!(session = %id, "loaded session");
        Ok(Some(session))
    }

    fn delete(&self, id: Uuid) -> Result<bool> {
        let path = self.session_path(id);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(session = %id, "deleted session");
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(SessionError::Io { path, source }),
        }
    }

    fn list(&self) -> Result<Vec<ImportSession>> {
        let entries = fs::read_dir(&self.base_dir).map_err(|source| SessionError::Io {
            path: self.base_dir.clone(),
            source,
        })?;

        let mut sessions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SessionError::Io {
                path: self.base_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                sessions.push(Self::read_session(&path)?);
            }
        }
        sessions.sort_by_key(|s| s.created_at);
        Ok(sessions)
    }
}

// =============================================================================
// Memory store
// =============================================================================

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, ImportSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &ImportSession) -> Result<()> {
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(session.id, session.clone());
        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<Option<ImportSession>> {
        Ok(self
            .sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&id)
            .cloned())
    }

    fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&id)
            .is_some())
    }

    fn list(&self) -> Result<Vec<ImportSession>> {
        let mut sessions: Vec<ImportSession> = self
            .sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.created_at);
        Ok(sessions)
    }
}
