//! Gruntfile session
//!
//! Owns the text of one gruntfile and the parse derived from it. Every
//! mutation goes through the same cycle: a mutator edits a copy of the token
//! stream, the session replays it, parses the replayed text into a fresh
//! `Document` and only then swaps it in. A failure at any step leaves the
//! previous state untouched.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SessionOptions;
use crate::document::Document;
use crate::error::{GruntfileError, Result};
use crate::indent::detect_indent;
use crate::mutator::{add_task, register_task, remove_task, TaskConfig, TaskList};
use crate::preview::{diff_stats, unified_diff, DiffStats};
use crate::task_index::{TaskEntry, TaskIndex};
use crate::tokens::TokenStream;
use crate::tree_sitter::{JsParser, Range};

pub struct Gruntfile {
    options: SessionOptions,
    parser: JsParser,
    /// Text as loaded, for diffs
    original: String,
    /// Indentation unit detected in the loaded text
    indent: String,
    doc: Document,
}

impl Gruntfile {
    /// Start a session from options
    ///
    /// Reads `source` when given, else `file` (default `Gruntfile.js`).
    pub fn new(options: SessionOptions) -> Result<Self> {
        let options = options.resolved();
        options.validate()?;

        let original = match (&options.source, &options.file) {
            (Some(source), _) => source.clone(),
            (None, Some(file)) => read_gruntfile(file)?,
            (None, None) => return Err(GruntfileError::InvalidOptions("nothing to read".to_string())),
        };

        let mut parser = JsParser::new()?;
        let indent = detect_indent(&original);
        let doc = Document::parse(&mut parser, original.clone())?;

        tracing::debug!(
            "Loaded gruntfile ({} bytes, {} tasks, indent {:?})",
            original.len(),
            doc.tasks().len(),
            indent
        );

        Ok(Self {
            options,
            parser,
            original,
            indent,
            doc,
        })
    }

    /// Open a gruntfile on disk, saving back to it after every change
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(SessionOptions::default().with_file(path))
    }

    /// In-memory session over `source`; nothing is written unless asked
    pub fn from_source(source: impl Into<String>) -> Result<Self> {
        Self::new(
            SessionOptions::default()
                .with_source(source)
                .with_autosave(false),
        )
    }

    /// Add a task configured with `config`, unless it already exists
    pub fn add_task(&mut self, name: &str, config: impl Into<TaskConfig>) -> Result<&mut Self> {
        let config = config.into();
        let edited = add_task(&self.doc, &mut self.parser, name, &config, &self.indent)?;
        self.commit(edited, || format!("Added task '{}'", name))?;
        Ok(self)
    }

    /// Remove a task, if it exists
    pub fn remove_task(&mut self, name: &str) -> Result<&mut Self> {
        let edited = remove_task(&self.doc, name);
        self.commit(edited, || format!("Removed task '{}'", name))?;
        Ok(self)
    }

    /// Register tasks under an alias, skipping those already registered
    pub fn register_task(&mut self, alias: &str, tasks: impl Into<TaskList>) -> Result<&mut Self> {
        let edited = register_task(&self.doc, alias, &tasks.into())?;
        self.commit(edited, || format!("Registered tasks under '{}'", alias))?;
        Ok(self)
    }

    /// Re-parse an edited stream and make it current
    fn commit(&mut self, edited: Option<TokenStream>, describe: impl FnOnce() -> String) -> Result<()> {
        let Some(edited) = edited else {
            return Ok(());
        };

        let text = edited.to_text();
        if text == self.doc.source() {
            return Ok(());
        }

        let doc = Document::parse(&mut self.parser, text)?;
        self.doc = doc;
        tracing::info!("{}", describe());

        if self.options.autosave {
            self.save()?;
        }
        Ok(())
    }

    /// Write the current text to `dest`, or else back to `file`
    pub fn save(&self) -> Result<()> {
        let path = self
            .options
            .output_path()
            .ok_or(GruntfileError::NoOutputTarget)?;
        self.save_as(path)
    }

    /// Write the current text to `path`
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| GruntfileError::io_error(parent, e))?;
        }
        fs::write(path, self.code()).map_err(|e| GruntfileError::io_error(path, e))?;
        tracing::info!("Saved gruntfile to {}", path.display());
        Ok(())
    }

    /// Current source text
    pub fn code(&self) -> &str {
        self.doc.source()
    }

    /// Text the session was loaded with
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Unified diff from the loaded text to the current one
    pub fn diff(&self) -> String {
        let label = self
            .options
            .file
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Gruntfile.js".to_string());
        unified_diff(&self.original, self.code(), &label)
    }

    /// Lines added and removed since loading
    pub fn diff_stats(&self) -> DiffStats {
        diff_stats(&self.original, self.code())
    }

    pub fn tasks(&self) -> &TaskIndex {
        self.doc.tasks()
    }

    pub fn task(&self, name: &str) -> Option<&TaskEntry> {
        self.doc.tasks().get(name)
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.doc.tasks().names().collect()
    }

    pub fn has_task(&self, name: &str) -> bool {
        self.doc.tasks().contains(name)
    }

    /// Location of the config object literal
    pub fn config_range(&self) -> Range {
        self.doc.config().range
    }

    /// Location of the `grunt.initConfig(...)` call
    pub fn init_call_range(&self) -> Range {
        self.doc.config().call_range
    }

    /// Variable the config object is bound to, when passed by name
    pub fn config_binding(&self) -> Option<&str> {
        self.doc.config().binding.as_deref()
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }
}

impl std::fmt::Debug for Gruntfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gruntfile")
            .field("options", &self.options)
            .field("indent", &self.indent)
            .field("doc", &self.doc)
            .finish()
    }
}

fn read_gruntfile(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(GruntfileError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|e| GruntfileError::io_error(path, e))
}
