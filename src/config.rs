//! Session options
//!
//! What a [`Gruntfile`](crate::Gruntfile) session reads and where it saves.
//! Options come from the builder methods or from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GruntfileError, Result};

/// File read when neither `file` nor `source` is given
pub const DEFAULT_GRUNTFILE: &str = "Gruntfile.js";

/// How a session reads and writes its gruntfile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Gruntfile to read, and the save target unless `dest` is set
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Text to use instead of reading `file`
    #[serde(default)]
    pub source: Option<String>,
    /// Where to save, overriding `file`; `output` in option files too
    #[serde(default, alias = "output")]
    pub dest: Option<PathBuf>,
    /// Save after every mutation that changed the text
    #[serde(default = "default_true")]
    pub autosave: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            file: None,
            source: None,
            dest: None,
            autosave: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Gruntfile path from the `GRUNTFILE` environment variable, or `Gruntfile.js`
pub fn default_gruntfile() -> PathBuf {
    std::env::var_os("GRUNTFILE")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GRUNTFILE))
}

impl SessionOptions {
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_dest(mut self, dest: impl Into<PathBuf>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Fill in the default gruntfile when there is nothing to read
    pub fn resolved(mut self) -> Self {
        if self.file.is_none() && self.source.is_none() {
            self.file = Some(default_gruntfile());
        }
        self
    }

    /// Where `save()` writes
    pub fn output_path(&self) -> Option<&Path> {
        self.dest.as_deref().or(self.file.as_deref())
    }

    /// Check the options describe a usable session
    pub fn validate(&self) -> Result<()> {
        if self.file.is_none() && self.source.is_none() {
            return Err(GruntfileError::InvalidOptions(
                "either `file` or `source` is required".to_string(),
            ));
        }
        if self.autosave && self.output_path().is_none() {
            return Err(GruntfileError::InvalidOptions(
                "`autosave` needs `file` or `dest` to write to".to_string(),
            ));
        }
        Ok(())
    }

    /// Load options from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| GruntfileError::io_error(path, e))?;
        serde_json::from_str(&content).map_err(|e| {
            GruntfileError::InvalidOptions(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}
