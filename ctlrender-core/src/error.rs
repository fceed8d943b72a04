use std::path::PathBuf;
use thiserror::Error;

use crate::format::FormatContext;

/// Custom error types for ctlrender
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to parse '{token}' as a floating point number for {label} (argument {position})")]
    Parse {
        token: String,
        /// 1-based position of the token in the command stream.
        position: usize,
        label: String,
    },

    #[error("unrecognized format '{token}'{context}")]
    UnknownFormat { token: String, context: FormatContext },

    #[error("unrecognized option {0}; see -help for a list of available options")]
    UnknownOption(String),

    #[error("the {option} option requires {required} additional argument{}", if *required == 1 { "" } else { "s" })]
    MissingArgument { option: &'static str, required: usize },

    #[error("the {option} option must occur after a -ctl option")]
    MisplacedParameter { option: &'static str },

    #[error("bad destination: {0}")]
    Destination(String),

    #[error("refusing to overwrite '{}' without the -force option", .0.display())]
    Overwrite(PathBuf),

    #[error(
        "no output format for '{}': the name has no extension and no -format option was given",
        .0.display()
    )]
    AmbiguousFormat(PathBuf),

    #[error(
        "the extension of '{}' does not match the '{format}' format given with -format; \
         use -force to let -format take priority",
        output.display()
    )]
    FormatMismatch { output: PathBuf, format: String },

    #[error("invalid invocation: {0}")]
    Validation(String),

    #[error("unable to remove existing file '{}': {source}", path.display())]
    RemoveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("transform engine failed: {0}")]
    Engine(String),

    #[error("required external command '{0}' not found")]
    DependencyNotFound(String),
}

/// Result type for ctlrender operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
