//! Core library for the ctlrender batch color-transform driver.
//!
//! This crate compiles a flat command-token list into a validated job
//! descriptor, resolves output paths and formats for one or many inputs
//! against a single destination, and drives the per-file loop that hands
//! each resolved unit to an external transform engine.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use ctlrender_core::{CommandEngine, Compiled, compile, resolve, run_batch};
//!
//! let tokens: Vec<String> = std::env::args().skip(1).collect();
//! match compile(&tokens).unwrap() {
//!     Compiled::Help(section) => println!("help requested: {section:?}"),
//!     Compiled::Job { job, paths } => {
//!         let units = resolve(&job, &paths).unwrap();
//!         run_batch(&CommandEngine::from_env(), &job, &units).unwrap();
//!     }
//! }
//! ```

pub mod compile;
pub mod compression;
pub mod engine;
pub mod error;
pub mod execute;
pub mod format;
pub mod job;
pub mod numeric;
pub mod resolve;

// Re-exports for public API
pub use compile::{Compiled, compile};
pub use compression::{Compression, CompressionLookup, compression_named};
pub use engine::{
    CommandEngine, DEFAULT_ENGINE_COMMAND, ENGINE_COMMAND_VAR, TransformEngine,
    TransformRequest, check_dependency, engine_command,
};
pub use error::{CoreError, CoreResult};
pub use execute::run_batch;
pub use format::{FormatContext, FormatSpec, find_format};
pub use job::{Job, MAX_PARAM_ARITY, Operation, Parameter};
pub use resolve::{ResolvedUnit, resolve};
