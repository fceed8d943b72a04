// ctlrender-cli/src/main.rs
//
// Binary entry point for ctlrender. Collects the raw argument tokens,
// compiles them into a job, resolves per-file destinations, and runs the
// batch against the external transform engine.

mod help;

use std::env;
use std::process;

use log::LevelFilter;
use owo_colors::OwoColorize;

use ctlrender_core::{
    CommandEngine, Compiled, CoreResult, check_dependency, compile, engine_command, resolve,
    run_batch,
};

fn main() {
    // The backend filter stays wide open; the effective level is driven by
    // the job's -verbose/-quiet counters once the command line has been
    // compiled. An explicit RUST_LOG setting wins over both.
    let rust_log_set = env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .format_timestamp(None)
        .format_target(false)
        .init();
    if !rust_log_set {
        log::set_max_level(LevelFilter::Warn);
    }

    let tokens: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&tokens, rust_log_set) {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn run(tokens: &[String], rust_log_set: bool) -> CoreResult<()> {
    let (job, paths) = match compile(tokens)? {
        Compiled::Help(section) => {
            print!("{}", help::section_text(section.as_deref()));
            return Ok(());
        }
        Compiled::Job { job, paths } => (job, paths),
    };

    if !rust_log_set {
        log::set_max_level(verbosity_filter(job.verbosity));
    }

    let command = engine_command();
    check_dependency(&command)?;

    let units = resolve(&job, &paths)?;
    run_batch(&CommandEngine::new(command), &job, &units)
}

/// Maps the job's -verbose/-quiet counter (default 1) onto a log level.
fn verbosity_filter(verbosity: i32) -> LevelFilter {
    match verbosity {
        i32::MIN..=0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
