//! Command compiler: turns the raw token list into a [`Job`].
//!
//! The compiler walks a cursor over the token list. Each head token is
//! either an option (matched with prefix abbreviation against a fixed
//! table), a positional path, or an error. Options consume a fixed number
//! of following tokens; every numeric argument goes through the strict
//! parser in [`crate::numeric`].
//!
//! Local parameters attach to the most-recently-declared `-ctl` operation,
//! which is threaded through the loop as an explicit `Option<Operation>`
//! rather than hidden mutable state, so partial token sequences stay easy
//! to test.

use std::path::PathBuf;

use log::warn;

use crate::compression::compression_named;
use crate::error::{CoreError, CoreResult};
use crate::format::{self, FormatContext};
use crate::job::{Job, Operation, Parameter};
use crate::numeric::parse_float;

/// Outcome of compiling a token list.
#[derive(Debug, Clone, PartialEq)]
pub enum Compiled {
    /// `-help` was seen; compilation short-circuited and no job exists.
    /// Carries the requested help section, if any.
    Help(Option<String>),
    /// A validated job plus the positional paths: inputs in declaration
    /// order, the destination last.
    Job { job: Job, paths: Vec<PathBuf> },
}

/// Parameter scope, for diagnostics and for deciding where a parameter
/// lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Local,
    Global,
}

impl Scope {
    fn describe(self) -> &'static str {
        match self {
            Scope::Local => "local",
            Scope::Global => "global",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opt {
    Help,
    InputScale,
    OutputScale,
    Ctl,
    Format,
    Compression,
    Param(Scope, usize),
    Verbose,
    Quiet,
    Force,
    NoAlpha,
}

impl Opt {
    /// Canonical option name used in diagnostics, regardless of whether an
    /// abbreviation or a short alias selected the option.
    fn name(self) -> &'static str {
        match self {
            Opt::Help => "-help",
            Opt::InputScale => "-input_scale",
            Opt::OutputScale => "-output_scale",
            Opt::Ctl => "-ctl",
            Opt::Format => "-format",
            Opt::Compression => "-compression",
            Opt::Param(Scope::Local, 1) => "-param1",
            Opt::Param(Scope::Local, 2) => "-param2",
            Opt::Param(Scope::Local, _) => "-param3",
            Opt::Param(Scope::Global, 1) => "-global_param1",
            Opt::Param(Scope::Global, 2) => "-global_param2",
            Opt::Param(Scope::Global, _) => "-global_param3",
            Opt::Verbose => "-verbose",
            Opt::Quiet => "-quiet",
            Opt::Force => "-force",
            Opt::NoAlpha => "-noalpha",
        }
    }
}

/// Option dispatch table: canonical name, minimum number of characters a
/// token must supply to select the row, handler tag.
///
/// Checked by ordered linear scan: a token selects a row when the canonical
/// name starts with the token and the token meets the minimum length.
/// `-format`/`-force` share the prefix `-for` and `-ctl`/`-compression`
/// share `-c`; the minimum lengths keep every pair distinguishable. The
/// parameter options and their short aliases are exact-match rows.
const OPTIONS: &[(&str, usize, Opt)] = &[
    ("-help", 2, Opt::Help),
    ("-input_scale", 2, Opt::InputScale),
    ("-output_scale", 2, Opt::OutputScale),
    ("-ctl", 3, Opt::Ctl),
    ("-format", 5, Opt::Format),
    ("-compression", 3, Opt::Compression),
    ("-param1", 7, Opt::Param(Scope::Local, 1)),
    ("-param2", 7, Opt::Param(Scope::Local, 2)),
    ("-param3", 7, Opt::Param(Scope::Local, 3)),
    ("-p1", 3, Opt::Param(Scope::Local, 1)),
    ("-p2", 3, Opt::Param(Scope::Local, 2)),
    ("-p3", 3, Opt::Param(Scope::Local, 3)),
    ("-global_param1", 14, Opt::Param(Scope::Global, 1)),
    ("-global_param2", 14, Opt::Param(Scope::Global, 2)),
    ("-global_param3", 14, Opt::Param(Scope::Global, 3)),
    ("-gp1", 4, Opt::Param(Scope::Global, 1)),
    ("-gp2", 4, Opt::Param(Scope::Global, 2)),
    ("-gp3", 4, Opt::Param(Scope::Global, 3)),
    ("-verbose", 2, Opt::Verbose),
    ("-quiet", 2, Opt::Quiet),
    ("-force", 5, Opt::Force),
    ("-noalpha", 2, Opt::NoAlpha),
];

fn lookup_option(token: &str) -> Option<Opt> {
    OPTIONS.iter().find_map(|&(name, min_len, opt)| {
        (token.len() >= min_len && name.starts_with(token)).then_some(opt)
    })
}

/// Compiles a token list into a job descriptor.
///
/// The token list is everything after the program name: options and
/// positional paths in any interleaving. On success the result is either a
/// help request or a [`Job`] plus at least one input path and a
/// destination. Any error aborts compilation; no partial job is returned.
pub fn compile(tokens: &[String]) -> CoreResult<Compiled> {
    let mut job = Job::default();
    let mut open: Option<Operation> = None;
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut cursor = 0usize;

    while cursor < tokens.len() {
        let token = tokens[cursor].as_str();

        if !token.starts_with('-') {
            paths.push(PathBuf::from(token));
            cursor += 1;
            continue;
        }

        let opt = lookup_option(token)
            .ok_or_else(|| CoreError::UnknownOption(token.to_string()))?;
        let remaining = tokens.len() - cursor - 1;

        match opt {
            Opt::Help => {
                return Ok(Compiled::Help(tokens.get(cursor + 1).cloned()));
            }
            Opt::InputScale | Opt::OutputScale => {
                require(opt, remaining, 1)?;
                let value = tokens[cursor + 1].as_str();
                let label = format!("the '{}' argument", opt.name());
                let parsed = parse_float(value, cursor + 2, &label)?;
                match opt {
                    Opt::InputScale => job.input_scale = Some(parsed),
                    _ => job.output_scale = Some(parsed),
                }
                cursor += 2;
            }
            Opt::Ctl => {
                require(opt, remaining, 1)?;
                if let Some(finished) = open.take() {
                    job.operations.push(finished);
                }
                open = Some(Operation::new(tokens[cursor + 1].as_str()));
                cursor += 2;
            }
            Opt::Format => {
                require(opt, remaining, 1)?;
                let spec =
                    format::find_format(&tokens[cursor + 1], FormatContext::ExplicitOption)?;
                // Last -format wins; an earlier choice is simply replaced.
                job.desired_format = Some(spec);
                cursor += 2;
            }
            Opt::Compression => {
                require(opt, remaining, 1)?;
                let lookup = compression_named(&tokens[cursor + 1]);
                if let Some(rejected) = &lookup.downgraded {
                    warn!("unrecognized compression scheme '{rejected}'; turning off compression");
                }
                job.compression = lookup.scheme;
                cursor += 2;
            }
            Opt::Param(scope, arity) => {
                require(opt, remaining, 1 + arity)?;
                let target = match scope {
                    Scope::Global => &mut job.global_params,
                    Scope::Local => match open.as_mut() {
                        Some(current) => &mut current.params,
                        None => {
                            return Err(CoreError::MisplacedParameter { option: opt.name() });
                        }
                    },
                };
                let name = tokens[cursor + 1].as_str();
                let mut values = [0.0; 3];
                for (i, slot) in values[..arity].iter_mut().enumerate() {
                    let index = cursor + 2 + i;
                    let label = format!(
                        "value {} of {} parameter '{}'",
                        i + 1,
                        scope.describe(),
                        name
                    );
                    *slot = parse_float(&tokens[index], index + 1, &label)?;
                }
                target.push(Parameter::new(name, &values[..arity]));
                cursor += 2 + arity;
            }
            Opt::Verbose => {
                job.verbosity += 1;
                cursor += 1;
            }
            Opt::Quiet => {
                job.verbosity -= 1;
                cursor += 1;
            }
            Opt::Force => {
                job.force = true;
                cursor += 1;
            }
            Opt::NoAlpha => {
                job.noalpha = true;
                cursor += 1;
            }
        }
    }

    if let Some(finished) = open.take() {
        job.operations.push(finished);
    }

    if paths.len() < 2 {
        return Err(CoreError::Validation(
            "one or more source files and a destination file or directory must be provided"
                .to_string(),
        ));
    }

    Ok(Compiled::Job { job, paths })
}

fn require(opt: Opt, remaining: usize, required: usize) -> CoreResult<()> {
    if remaining < required {
        Err(CoreError::MissingArgument {
            option: opt.name(),
            required,
        })
    } else {
        Ok(())
    }
}
