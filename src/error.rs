//! Error types for gruntfile editing
//!
//! Structural failures (locating the config object, indexing its tasks) are
//! fatal to the operation that hit them. Mutations with nothing to do are not
//! errors and never show up here.

use std::path::PathBuf;

use crate::tree_sitter::ParseError;

/// Main error type
#[derive(Debug, thiserror::Error)]
pub enum GruntfileError {
    /// Input file does not exist
    #[error("gruntfile not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// Reading or writing a file failed
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source text rejected by the parser
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No `grunt.initConfig(...)` call in the document
    #[error("invocation of {0}() not found")]
    InitCallNotFound(String),

    /// More than one `grunt.initConfig(...)` call
    #[error("too many invocations of {method}(): found {count}")]
    AmbiguousInitCall { method: String, count: usize },

    /// `grunt.initConfig()` called without arguments
    #[error("arguments of {0}() not found")]
    MissingConfigArgument(String),

    /// Config passed by name, but the name has no object binding
    #[error("config reference `{name}` does not resolve to an object literal")]
    UnresolvedConfigReference { name: String },

    /// Config argument is neither an object literal nor an identifier
    #[error("unsupported config shape: {kind}")]
    UnsupportedConfigShape { kind: String },

    /// A config property whose key is not a plain name
    #[error("unsupported task key ({kind}) at {line}:{column}")]
    UnsupportedTaskKey {
        kind: String,
        line: usize,
        column: usize,
    },

    /// `grunt.registerTask(alias)` without a task list
    #[error("registerTask('{alias}') requires a task list argument")]
    RegisterTaskMissingList { alias: String },

    /// `grunt.registerTask(alias, ...)` whose task list is not an array
    #[error("registerTask('{alias}') task list is a {kind}, not an array")]
    RegisterTaskInvalidList { alias: String, kind: String },

    /// No statement to anchor a new registration call to
    #[error("no place to register task '{alias}'")]
    RegistrationTargetNotFound { alias: String },

    /// Task configuration text does not form a single property value
    #[error("invalid task config: {0}")]
    InvalidTaskConfig(String),

    /// Session options failed validation
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Saving without `file` or `dest`
    #[error("no output path: set `file` or `dest`")]
    NoOutputTarget,

    /// A node boundary that has no matching token
    #[error("no token boundary at byte {offset}")]
    TokenNotFound { offset: usize },
}

impl GruntfileError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create unsupported key error for a node
    pub(crate) fn unsupported_key(node: &tree_sitter::Node) -> Self {
        let start = node.start_position();
        Self::UnsupportedTaskKey {
            kind: node.kind().to_string(),
            line: start.row + 1,
            column: start.column + 1,
        }
    }
}

/// Result type alias for gruntfile operations
pub type Result<T> = std::result::Result<T, GruntfileError>;
