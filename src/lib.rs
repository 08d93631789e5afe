//! Source-preserving editing of Gruntfile.js task configuration
//!
//! Finds the `grunt.initConfig(...)` call, indexes the tasks of its config
//! object and adds, removes or registers tasks by splicing tokens, so that
//! comments and formatting outside the edit survive byte for byte.
//!
//! ```no_run
//! use gfc_lib::Gruntfile;
//! use serde_json::json;
//!
//! let mut gruntfile = Gruntfile::open("Gruntfile.js")?;
//! gruntfile
//!     .add_task("concat", json!({ "src": ["js/*.js"], "dest": "build/app.js" }))?
//!     .register_task("default", ["concat"])?;
//! # Ok::<(), gfc_lib::GruntfileError>(())
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod gruntfile;
pub mod indent;
pub mod locator;
pub mod mutator;
pub mod preview;
pub mod render;
pub mod task_index;
pub mod tokens;
pub mod tree_sitter;

pub use config::{default_gruntfile, SessionOptions, DEFAULT_GRUNTFILE};
pub use document::{ConfigObject, Document};
pub use error::{GruntfileError, Result};
pub use gruntfile::Gruntfile;
pub use mutator::{TaskConfig, TaskList};
pub use preview::{diff_stats, unified_diff, DiffStats};
pub use render::{render, QuoteStyle, RenderOptions};
pub use task_index::{TaskEntry, TaskIndex};
pub use self::tree_sitter::{ParseError, Position, Range};
