//! The external transform engine: contract and subprocess bridge.
//!
//! The engine reads one input image, runs the CTL operation pipeline over
//! it, and writes one output image. Everything it needs travels in a
//! [`TransformRequest`]; the [`TransformEngine`] trait keeps the executor
//! decoupled from the concrete engine so tests can substitute a mock.
//!
//! The production implementation spawns the interpreter as an external
//! command, the same way the tool's own options are spelled: `-ctl`,
//! `-param1`, `-format` and friends, followed by the input and output
//! paths.

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::compression::Compression;
use crate::error::{CoreError, CoreResult};
use crate::format::FormatSpec;
use crate::job::{Operation, Parameter};

/// Everything the engine needs to transform one file.
///
/// The scales are optional overrides: `None` means "no override", in which
/// case the engine normalizes integral formats by bit depth and passes
/// floating-point data through unchanged (see '-help scale' for the full
/// contract, including output clipping).
#[derive(Debug, Clone, Copy)]
pub struct TransformRequest<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub input_scale: Option<f64>,
    pub output_scale: Option<f64>,
    pub format: FormatSpec,
    pub compression: Compression,
    pub operations: &'a [Operation],
    pub global_params: &'a [Parameter],
}

/// The transform collaborator invoked once per resolved unit.
pub trait TransformEngine {
    fn transform(&self, request: &TransformRequest<'_>) -> CoreResult<()>;
}

/// Default external interpreter command.
pub const DEFAULT_ENGINE_COMMAND: &str = "ctl-engine";

/// Name of the environment variable that overrides the engine command.
pub const ENGINE_COMMAND_VAR: &str = "CTLRENDER_ENGINE";

/// The engine command to use: `CTLRENDER_ENGINE` when set, the default
/// otherwise.
pub fn engine_command() -> String {
    env::var(ENGINE_COMMAND_VAR).unwrap_or_else(|_| DEFAULT_ENGINE_COMMAND.to_string())
}

/// Checks that the engine command is present and executable by probing it
/// with `-version`.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            debug!("found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => Err(CoreError::Engine(format!(
            "failed to start dependency check command '{cmd_name}': {e}"
        ))),
    }
}

/// Production engine: spawns the external interpreter once per file and
/// treats a non-zero exit as failure.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    command: String,
}

impl CommandEngine {
    pub fn new(command: impl Into<String>) -> Self {
        CommandEngine {
            command: command.into(),
        }
    }

    pub fn from_env() -> Self {
        CommandEngine::new(engine_command())
    }

    fn build_args(request: &TransformRequest<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();

        for operation in request.operations {
            args.push("-ctl".into());
            args.push(operation.script.clone().into_os_string());
            for param in &operation.params {
                push_param(&mut args, "-param", param);
            }
        }
        for param in request.global_params {
            push_param(&mut args, "-global_param", param);
        }

        if let Some(scale) = request.input_scale {
            args.push("-input_scale".into());
            args.push(scale.to_string().into());
        }
        if let Some(scale) = request.output_scale {
            args.push("-output_scale".into());
            args.push(scale.to_string().into());
        }

        args.push("-format".into());
        args.push(request.format.to_string().into());
        args.push("-compression".into());
        args.push(request.compression.name().into());
        if request.format.squish {
            args.push("-noalpha".into());
        }

        args.push(request.input.as_os_str().to_os_string());
        args.push(request.output.as_os_str().to_os_string());
        args
    }
}

fn push_param(args: &mut Vec<OsString>, prefix: &str, param: &Parameter) {
    args.push(format!("{prefix}{}", param.arity()).into());
    args.push(param.name.clone().into());
    for value in param.values() {
        args.push(value.to_string().into());
    }
}

impl TransformEngine for CommandEngine {
    fn transform(&self, request: &TransformRequest<'_>) -> CoreResult<()> {
        let args = Self::build_args(request);
        debug!(
            "running {} {}",
            self.command,
            args.iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let status = Command::new(&self.command)
            .args(&args)
            .status()
            .map_err(|e| {
                CoreError::Engine(format!("failed to start '{}': {e}", self.command))
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CoreError::Engine(format!(
                "'{}' exited with {} while transforming '{}'",
                self.command,
                status,
                request.input.display()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{FormatContext, find_format};
    use std::path::PathBuf;

    #[test]
    fn request_flattens_to_the_engine_dialect() {
        let mut op = Operation::new("transform.ctl");
        op.params.push(Parameter::new("gamma", &[2.2]));
        let operations = vec![op];
        let globals = vec![Parameter::new("wp", &[0.95, 1.0])];
        let mut format = find_format("dpx10", FormatContext::ExplicitOption).unwrap();
        format.squish = true;

        let input = PathBuf::from("in.tif");
        let output = PathBuf::from("out.dpx");
        let request = TransformRequest {
            input: &input,
            output: &output,
            input_scale: Some(255.0),
            output_scale: None,
            format,
            compression: Compression::Piz,
            operations: &operations,
            global_params: &globals,
        };

        let args: Vec<String> = CommandEngine::build_args(&request)
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-ctl",
                "transform.ctl",
                "-param1",
                "gamma",
                "2.2",
                "-global_param2",
                "wp",
                "0.95",
                "1",
                "-input_scale",
                "255",
                "-format",
                "dpx10",
                "-compression",
                "PIZ",
                "-noalpha",
                "in.tif",
                "out.dpx",
            ]
        );
    }

    #[test]
    fn engine_command_defaults_without_override() {
        // The variable is not set in the test environment.
        if env::var_os(ENGINE_COMMAND_VAR).is_none() {
            assert_eq!(engine_command(), DEFAULT_ENGINE_COMMAND);
        }
    }
}
