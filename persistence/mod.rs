/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Workspace persistence as JSON files.
//!
//! Layout under the data directory:
//! - `canvas-state.json`: the most recent session
//! - `workspaces/<name>.json`: named workspaces
//!
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write leaves the previous file intact.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use types::WorkspaceSnapshot;

pub const LATEST_FILE_NAME: &str = "canvas-state.json";
const NAMED_WORKSPACE_DIR: &str = "workspaces";
const RESERVED_WORKSPACE_NAME: &str = "latest";

pub struct WorkspaceStore {
    base_dir: PathBuf,
}

impl WorkspaceStore {
    /// Open (creating if needed) a store rooted at `base_dir`.
    pub fn open(base_dir: PathBuf) -> Result<Self, WorkspaceStoreError> {
        fs::create_dir_all(base_dir.join(NAMED_WORKSPACE_DIR)).map_err(WorkspaceStoreError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn latest_path(&self) -> PathBuf {
        self.base_dir.join(LATEST_FILE_NAME)
    }

    fn named_path(&self, name: &str) -> Result<PathBuf, WorkspaceStoreError> {
        let name = Self::validate_name(name)?;
        Ok(self
            .base_dir
            .join(NAMED_WORKSPACE_DIR)
            .join(format!("{name}.json")))
    }

    fn validate_name(name: &str) -> Result<&str, WorkspaceStoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(WorkspaceStoreError::InvalidName(
                "Workspace name must not be empty".to_string(),
            ));
        }
        if trimmed == RESERVED_WORKSPACE_NAME {
            return Err(WorkspaceStoreError::InvalidName(format!(
                "Workspace name '{RESERVED_WORKSPACE_NAME}' is reserved"
            )));
        }
        if trimmed.contains(['/', '\\']) || trimmed.starts_with('.') {
            return Err(WorkspaceStoreError::InvalidName(format!(
                "Workspace name '{trimmed}' is not a plain file name"
            )));
        }
        Ok(trimmed)
    }

    pub fn save_latest(&self, snapshot: &WorkspaceSnapshot) -> Result<(), WorkspaceStoreError> {
        write_snapshot(&self.latest_path(), snapshot)
    }

    pub fn load_latest(&self) -> Result<Option<WorkspaceSnapshot>, WorkspaceStoreError> {
        read_snapshot(&self.latest_path())
    }

    /// Save under `name`, overwriting any workspace with that name. The
    /// snapshot's own name is set to the trimmed `name`.
    pub fn save_named(
        &self,
        name: &str,
        snapshot: &WorkspaceSnapshot,
    ) -> Result<(), WorkspaceStoreError> {
        let path = self.named_path(name)?;
        let named = WorkspaceSnapshot {
            name: name.trim().to_string(),
            nodes: snapshot.nodes.clone(),
        };
        write_snapshot(&path, &named)
    }

    pub fn load_named(&self, name: &str) -> Result<Option<WorkspaceSnapshot>, WorkspaceStoreError> {
        read_snapshot(&self.named_path(name)?)
    }

    /// Names of saved workspaces, sorted.
    pub fn list_named(&self) -> Result<Vec<String>, WorkspaceStoreError> {
        let entries = fs::read_dir(self.base_dir.join(NAMED_WORKSPACE_DIR))
            .map_err(WorkspaceStoreError::Io)?;
        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(WorkspaceStoreError::Io)?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete a named workspace. Returns whether it existed.
    pub fn delete_named(&self, name: &str) -> Result<bool, WorkspaceStoreError> {
        let path = self.named_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(WorkspaceStoreError::Io(e)),
        }
    }

    /// Remove the latest session and every named workspace.
    pub fn clear_all(&self) -> Result<(), WorkspaceStoreError> {
        match fs::remove_file(self.latest_path()) {
            Ok(()) => {},
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
            Err(e) => return Err(WorkspaceStoreError::Io(e)),
        }
        for name in self.list_named()? {
            self.delete_named(&name)?;
        }
        Ok(())
    }

    /// Get the default data directory for canvasshell.
    pub fn default_data_dir() -> PathBuf {
        let mut dir = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
        dir.push("canvasshell");
        dir
    }
}

fn write_snapshot(path: &Path, snapshot: &WorkspaceSnapshot) -> Result<(), WorkspaceStoreError> {
    let json = serde_json::to_string_pretty(snapshot).map_err(WorkspaceStoreError::Parse)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(WorkspaceStoreError::Io)?;
    if let Err(e) = fs::rename(&tmp, path) {
        warn!("Failed to move {} into place: {e}", tmp.display());
        let _ = fs::remove_file(&tmp);
        return Err(WorkspaceStoreError::Io(e));
    }
    debug!(
        "Saved workspace '{}' ({} nodes) to {}",
        snapshot.name,
        snapshot.nodes.len(),
        path.display()
    );
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<Option<WorkspaceSnapshot>, WorkspaceStoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(WorkspaceStoreError::Io(e)),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(WorkspaceStoreError::Parse)
}

/// Errors from the workspace store
#[derive(Debug)]
pub enum WorkspaceStoreError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidName(String),
}

impl std::fmt::Display for WorkspaceStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkspaceStoreError::Io(e) => write!(f, "IO error: {e}"),
            WorkspaceStoreError::Parse(e) => write!(f, "Parse error: {e}"),
            WorkspaceStoreError::InvalidName(e) => write!(f, "Invalid name: {e}"),
        }
    }
}

impl std::error::Error for WorkspaceStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkspaceStoreError::Io(e) => Some(e),
            WorkspaceStoreError::Parse(e) => Some(e),
            WorkspaceStoreError::InvalidName(_) => None,
        }
    }
}
