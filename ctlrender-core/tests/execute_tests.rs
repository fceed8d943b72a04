// ctlrender-core/tests/execute_tests.rs
//
// Batch-executor tests with a recording engine standing in for the external
// interpreter.

use std::cell::RefCell;
use std::fs::File;
use std::path::PathBuf;

use ctlrender_core::format::{FormatContext, find_format};
use ctlrender_core::{
    CoreError, CoreResult, Job, ResolvedUnit, TransformEngine, TransformRequest, run_batch,
};
use tempfile::tempdir;

/// Records every transform call and optionally fails at a given index.
/// Successful calls create the output file, like the real engine would.
struct RecordingEngine {
    calls: RefCell<Vec<(PathBuf, PathBuf)>>,
    fail_at: Option<usize>,
}

impl RecordingEngine {
    fn new() -> Self {
        RecordingEngine {
            calls: RefCell::new(Vec::new()),
            fail_at: None,
        }
    }

    fn failing_at(index: usize) -> Self {
        RecordingEngine {
            calls: RefCell::new(Vec::new()),
            fail_at: Some(index),
        }
    }

    fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.borrow().clone()
    }
}

impl TransformEngine for RecordingEngine {
    fn transform(&self, request: &TransformRequest<'_>) -> CoreResult<()> {
        let index = self.calls.borrow().len();
        self.calls
            .borrow_mut()
            .push((request.input.to_path_buf(), request.output.to_path_buf()));
        if self.fail_at == Some(index) {
            return Err(CoreError::Engine("synthetic engine failure".to_string()));
        }
        File::create(request.output)?;
        Ok(())
    }
}

fn dpx_unit(input: &str, output: PathBuf) -> ResolvedUnit {
    ResolvedUnit {
        input: PathBuf::from(input),
        output,
        format: find_format("dpx", FormatContext::ExplicitOption).unwrap(),
    }
}

#[test]
fn units_run_in_declaration_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let units = vec![
        dpx_unit("a.dpx", dir.path().join("a.dpx")),
        dpx_unit("b.dpx", dir.path().join("b.dpx")),
    ];

    let engine = RecordingEngine::new();
    run_batch(&engine, &Job::default(), &units)?;

    let calls = engine.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, PathBuf::from("a.dpx"));
    assert_eq!(calls[1].0, PathBuf::from("b.dpx"));
    assert!(dir.path().join("a.dpx").exists());
    assert!(dir.path().join("b.dpx").exists());
    Ok(())
}

#[test]
fn existing_output_stops_the_batch_before_the_engine_runs()
-> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let blocked = dir.path().join("blocked.dpx");
    File::create(&blocked)?;

    let units = vec![
        dpx_unit("a.dpx", blocked.clone()),
        dpx_unit("b.dpx", dir.path().join("b.dpx")),
    ];

    let engine = RecordingEngine::new();
    match run_batch(&engine, &Job::default(), &units) {
        Err(CoreError::Overwrite(path)) => assert_eq!(path, blocked),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(engine.calls().is_empty());
    assert!(!dir.path().join("b.dpx").exists());
    Ok(())
}

#[test]
fn force_removes_the_existing_output_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output = dir.path().join("replace.dpx");
    File::create(&output)?;

    let units = vec![dpx_unit("a.dpx", output.clone())];
    let forced = Job {
        force: true,
        ..Job::default()
    };

    let engine = RecordingEngine::new();
    run_batch(&engine, &forced, &units)?;

    assert_eq!(engine.calls().len(), 1);
    assert!(output.exists());
    Ok(())
}

#[test]
fn force_tolerates_an_absent_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let units = vec![dpx_unit("a.dpx", dir.path().join("fresh.dpx"))];
    let forced = Job {
        force: true,
        ..Job::default()
    };

    run_batch(&RecordingEngine::new(), &forced, &units)?;
    Ok(())
}

#[test]
fn engine_failure_aborts_remaining_units_but_keeps_earlier_outputs()
-> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let units = vec![
        dpx_unit("a.dpx", dir.path().join("a.dpx")),
        dpx_unit("b.dpx", dir.path().join("b.dpx")),
        dpx_unit("c.dpx", dir.path().join("c.dpx")),
    ];

    let engine = RecordingEngine::failing_at(1);
    match run_batch(&engine, &Job::default(), &units) {
        Err(CoreError::Engine(_)) => {}
        other => panic!("unexpected result: {other:?}"),
    }

    // The first output survives, the failing unit's and later ones never
    // appear, and the third transform is never attempted.
    assert_eq!(engine.calls().len(), 2);
    assert!(dir.path().join("a.dpx").exists());
    assert!(!dir.path().join("b.dpx").exists());
    assert!(!dir.path().join("c.dpx").exists());
    Ok(())
}

#[test]
fn request_carries_job_scales_compression_and_pipeline()
-> Result<(), Box<dyn std::error::Error>> {
    struct AssertingEngine;

    impl TransformEngine for AssertingEngine {
        fn transform(&self, request: &TransformRequest<'_>) -> CoreResult<()> {
            assert_eq!(request.input_scale, Some(255.0));
            assert_eq!(request.output_scale, None);
            assert_eq!(request.compression.name(), "RLE");
            assert_eq!(request.operations.len(), 1);
            assert_eq!(request.operations[0].script, PathBuf::from("grade.ctl"));
            assert_eq!(request.global_params.len(), 1);
            assert_eq!(request.global_params[0].values(), &[6500.0]);
            Ok(())
        }
    }

    let dir = tempdir()?;
    let units = vec![dpx_unit("a.dpx", dir.path().join("a.dpx"))];

    let job = Job {
        input_scale: Some(255.0),
        compression: ctlrender_core::compression_named("rle").scheme,
        operations: vec![ctlrender_core::Operation::new("grade.ctl")],
        global_params: vec![ctlrender_core::Parameter::new("temp", &[6500.0])],
        ..Job::default()
    };

    run_batch(&AssertingEngine, &job, &units)?;
    Ok(())
}
