//! Destination resolution: decides, per input file, where the output goes
//! and in which format.
//!
//! Resolution runs once per batch against live file-system state. The
//! destination argument's status (missing, directory, regular file, other)
//! selects the branch; the `-format` option and the destination/input
//! extensions then settle the effective format. Concurrent mutation of the
//! file system between resolution and execution is an accepted race, which
//! is why the executor re-checks overwrites before every transform.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::format::{self, FormatContext, FormatSpec};
use crate::job::Job;

/// One fully-resolved transform: where to read, where to write, and the
/// effective output format (with alpha squishing already applied).
///
/// Derived fresh per batch run; deliberately not part of [`Job`], since it
/// depends on file-system state at resolution time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUnit {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: FormatSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DestinationState {
    Missing,
    Directory,
    RegularFile,
    Other,
}

fn destination_state(path: &Path) -> CoreResult<DestinationState> {
    match fs::metadata(path) {
        Ok(meta) => {
            let file_type = meta.file_type();
            if file_type.is_dir() {
                Ok(DestinationState::Directory)
            } else if file_type.is_file() {
                Ok(DestinationState::RegularFile)
            } else {
                Ok(DestinationState::Other)
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(DestinationState::Missing),
        Err(e) => Err(CoreError::Io(e)),
    }
}

/// Resolves the positional path list (inputs, destination last) into
/// per-input units.
///
/// Resolution is idempotent for unchanged file-system state: resolving the
/// same job twice yields identical units.
pub fn resolve(job: &Job, paths: &[PathBuf]) -> CoreResult<Vec<ResolvedUnit>> {
    let Some((destination, inputs)) = paths.split_last() else {
        return Err(CoreError::Validation(
            "no destination was provided".to_string(),
        ));
    };
    if inputs.is_empty() {
        return Err(CoreError::Validation(
            "no source files were provided".to_string(),
        ));
    }

    match destination_state(destination)? {
        DestinationState::Missing => {
            if inputs.len() > 1 {
                return Err(CoreError::Destination(format!(
                    "when more than one source file is given the destination must be an \
                     existing directory, and '{}' does not exist",
                    destination.display()
                )));
            }
            let format = single_file_format(job, destination)?;
            Ok(vec![unit(job, &inputs[0], destination.clone(), format)])
        }
        DestinationState::Directory => inputs
            .iter()
            .map(|input| directory_unit(job, input, destination))
            .collect(),
        DestinationState::RegularFile => {
            if inputs.len() > 1 {
                return Err(CoreError::Destination(format!(
                    "when more than one source file is given the destination must be a \
                     directory, not the existing file '{}'",
                    destination.display()
                )));
            }
            if !job.force {
                return Err(CoreError::Overwrite(destination.clone()));
            }
            // With -force the existing file is treated as if it were absent;
            // the executor removes it just before the transform runs.
            let format = single_file_format(job, destination)?;
            Ok(vec![unit(job, &inputs[0], destination.clone(), format)])
        }
        DestinationState::Other => Err(CoreError::Destination(format!(
            "destination '{}' is neither a file nor a directory",
            destination.display()
        ))),
    }
}

/// Directory-destination mode: the output name is derived from the input's
/// base name, with the extension rewritten when `-format` was given.
fn directory_unit(job: &Job, input: &Path, dir: &Path) -> CoreResult<ResolvedUnit> {
    let base = input.file_name().ok_or_else(|| {
        CoreError::Destination(format!(
            "source '{}' has no file name component",
            input.display()
        ))
    })?;
    let mut output = dir.join(base);

    let format = match job.desired_format {
        Some(desired) => {
            output.set_extension(desired.output_extension());
            desired
        }
        None => {
            let extension = output
                .extension()
                .and_then(|e| e.to_str())
                .ok_or_else(|| CoreError::AmbiguousFormat(output.clone()))?;
            format::find_format(extension, FormatContext::FromExtension)?
        }
    };

    Ok(unit(job, input, output, format))
}

/// Format determination for a single literal destination path (the missing
/// or force-overwritten-file branches).
fn single_file_format(job: &Job, destination: &Path) -> CoreResult<FormatSpec> {
    let extension = destination.extension().and_then(|e| e.to_str());
    match (extension, job.desired_format) {
        (None, None) => Err(CoreError::AmbiguousFormat(destination.to_path_buf())),
        (Some(ext), None) => format::find_format(ext, FormatContext::FromExtension),
        (Some(ext), Some(desired)) => {
            // The name on disk is never rewritten in single-file mode; a
            // conflicting extension needs -force, which lets -format win.
            if desired.output_extension() != ext && !job.force {
                return Err(CoreError::FormatMismatch {
                    output: destination.to_path_buf(),
                    format: desired.to_string(),
                });
            }
            Ok(desired)
        }
        (None, Some(desired)) => Ok(desired),
    }
}

fn unit(job: &Job, input: &Path, output: PathBuf, mut format: FormatSpec) -> ResolvedUnit {
    format.squish = job.noalpha;
    ResolvedUnit {
        input: input.to_path_buf(),
        output,
        format,
    }
}
