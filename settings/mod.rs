/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! User settings stored as TOML next to the workspace files.

use std::fmt;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_HISTORY_CAPACITY;

pub const SETTINGS_FILE_NAME: &str = "settings.toml";
pub const DEFAULT_SESSION_ID: &str = "default";
pub const DEFAULT_NODE_URL: &str = "https://www.example.com";
pub const MAX_NODE_PADDING: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Session for nodes created without an explicit one.
    pub default_session_id: String,
    /// Sessions offered by the session picker, in display order.
    pub session_ids: Vec<String>,
    /// Frame padding drawn around node content, in canvas units.
    pub node_padding: f64,
    /// URL of the node created when a workspace loads empty.
    pub default_node_url: String,
    pub history_capacity: usize,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            default_session_id: DEFAULT_SESSION_ID.to_owned(),
            session_ids: vec![DEFAULT_SESSION_ID.to_owned()],
            node_padding: 5.0,
            default_node_url: DEFAULT_NODE_URL.to_owned(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Serialize(e) => write!(f, "TOML serialize error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Serialize(e) => Some(e),
        }
    }
}

impl CanvasSettings {
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(s).map_err(SettingsError::Toml)?;
        Ok(settings.normalized())
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(SettingsError::Serialize)
    }

    /// Load from `path`, treating a missing file as defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(SettingsError::Io(e)),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SettingsError::Io)?;
        }
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(SettingsError::Io)
    }

    /// Drop blank session ids, keep at least one session, point the default
    /// at a listed session, and clamp numeric ranges.
    pub fn normalize(&mut self) {
        self.session_ids = self
            .session_ids
            .iter()
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty())
            .collect();
        if self.session_ids.is_empty() {
            self.session_ids.push(DEFAULT_SESSION_ID.to_owned());
        }
        let default = self.default_session_id.trim();
        if !self.session_ids.iter().any(|id| id == default) {
            warn!(
                "default session {:?} is not listed; using {:?}",
                self.default_session_id, self.session_ids[0]
            );
            self.default_session_id = self.session_ids[0].clone();
        } else {
            self.default_session_id = default.to_owned();
        }
        self.node_padding = if self.node_padding.is_finite() {
            self.node_padding.clamp(0.0, MAX_NODE_PADDING)
        } else {
            0.0
        };
        self.history_capacity = self.history_capacity.max(1);
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// `requested` if it is a listed session, else the default session.
    pub fn resolve_session(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|id| self.session_ids.iter().any(|s| s == id))
            .unwrap_or(self.default_session_id.as_str())
            .to_owned()
    }
}
