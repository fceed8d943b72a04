//! Batch execution: the per-file overwrite policy and engine invocation.
//!
//! Units run strictly sequentially in input-declaration order. A fatal
//! error on one unit aborts the rest of the batch; outputs already written
//! by earlier units are kept (partial batch completion is expected, not a
//! bug).

use std::fs;
use std::io;

use log::{debug, info};

use crate::engine::{TransformEngine, TransformRequest};
use crate::error::{CoreError, CoreResult};
use crate::job::Job;
use crate::resolve::ResolvedUnit;

/// Runs every resolved unit through the engine.
///
/// Per unit: with `-force`, any pre-existing output file is removed first;
/// then, whatever the resolver concluded earlier, a file still present at
/// the output path stops the batch. The second check is authoritative
/// because directory-mode output names are only known here, and because
/// the file system may have changed since resolution.
pub fn run_batch<E: TransformEngine>(
    engine: &E,
    job: &Job,
    units: &[ResolvedUnit],
) -> CoreResult<()> {
    if job.verbosity > 1 && !job.global_params.is_empty() {
        info!("global ctl parameters:");
        for param in &job.global_params {
            let values: Vec<String> = param.values().iter().map(|v| format!("{v}")).collect();
            info!("{:>17}: {}", param.name, values.join(" "));
        }
    }

    for resolved in units {
        if job.force {
            match fs::remove_file(&resolved.output) {
                Ok(()) => debug!("removed existing file '{}'", resolved.output.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(CoreError::RemoveFailed {
                        path: resolved.output.clone(),
                        source: e,
                    });
                }
            }
        }

        if resolved.output.exists() {
            return Err(CoreError::Overwrite(resolved.output.clone()));
        }

        info!(
            "transforming '{}' -> '{}' ({})",
            resolved.input.display(),
            resolved.output.display(),
            resolved.format
        );

        engine.transform(&TransformRequest {
            input: &resolved.input,
            output: &resolved.output,
            input_scale: job.input_scale,
            output_scale: job.output_scale,
            format: resolved.format,
            compression: job.compression,
            operations: &job.operations,
            global_params: &job.global_params,
        })?;
    }

    Ok(())
}
