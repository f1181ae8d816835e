//! Sequential test runner
//!
//! Tests run one at a time in registration order. Each gets a fresh
//! framebuffer and context; the resource table is shared and mappings made by
//! one test remain for the next. A failing or panicking test never stops the
//! run.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use gfx_resources::ResourceMap;
use gfx_types::ScreenSpec;

use crate::assert::{Failure, TestResult};
use crate::context::TestContext;
use crate::framebuffer::Framebuffer;
use crate::registry::{TestRecord, TestRegistry};

/// Result of one test.
#[derive(Debug, Clone)]
pub struct TestOutcome {
    /// The test that ran
    pub record: TestRecord,
    /// `Ok` if every assertion held
    pub result: TestResult,
    /// Wall time spent in the test body
    pub elapsed: Duration,
    /// Framebuffer snapshot written for a failed test
    pub artifact: Option<PathBuf>,
}

impl TestOutcome {
    /// `true` if the test passed.
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Owns the screen description and the shared resource table.
#[derive(Debug)]
pub struct Runner {
    spec: &'static ScreenSpec,
    resources: ResourceMap,
    artifacts: Option<PathBuf>,
}

impl Runner {
    /// Run tests on `spec`-sized framebuffers against `resources`.
    pub fn new(spec: &'static ScreenSpec, resources: ResourceMap) -> Self {
        Self {
            spec,
            resources,
            artifacts: None,
        }
    }

    /// Save the framebuffer of every failed test as a PNG under `dir`.
    pub fn with_artifacts(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts = Some(dir.into());
        self
    }

    /// Shared resource table
    pub fn resources(&self) -> &ResourceMap {
        &self.resources
    }

    /// Shared resource table, e.g. to pre-map names before a run
    pub fn resources_mut(&mut self) -> &mut ResourceMap {
        &mut self.resources
    }

    /// Lazily run every test of `registry`.
    ///
    /// Each call to `next` runs exactly one test. The iterator cannot be
    /// restarted; call `run_all` again for a new pass.
    pub fn run_all<'a>(&'a mut self, registry: &'a TestRegistry) -> Run<'a> {
        tracing::info!(
            tests = registry.len(),
            display = self.spec.name,
            "starting test run"
        );
        Run {
            runner: self,
            records: registry.records().iter(),
        }
    }

    /// Run a single test.
    pub fn run_one(&mut self, record: &TestRecord) -> TestOutcome {
        let _span = tracing::info_span!("test", module = record.module, name = record.name).entered();

        let mut fb = Framebuffer::new(self.spec);
        let started = Instant::now();
        let result = {
            let mut ctx = TestContext::new(&mut self.resources);
            let func = record.func;
            panic::catch_unwind(AssertUnwindSafe(|| func(&mut fb, &mut ctx)))
                .unwrap_or_else(|payload| Err(panic_failure(record, payload.as_ref())))
        };
        let elapsed = started.elapsed();

        let artifact = match (&result, &self.artifacts) {
            (Err(_), Some(dir)) => save_artifact(dir, record, &fb),
            _ => None,
        };

        match &result {
            Ok(()) => tracing::debug!(elapsed_us = elapsed.as_micros(), "passed"),
            Err(failure) => tracing::warn!(%failure, "failed"),
        }

        TestOutcome {
            record: *record,
            result,
            elapsed,
            artifact,
        }
    }
}

/// Iterator over the outcomes of a run.
#[derive(Debug)]
pub struct Run<'a> {
    runner: &'a mut Runner,
    records: std::slice::Iter<'a, TestRecord>,
}

impl Iterator for Run<'_> {
    type Item = TestOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(self.runner.run_one(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for Run<'_> {}

fn panic_failure(record: &TestRecord, payload: &(dyn Any + Send)) -> Failure {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    Failure::detached(format!("panicked: {detail}"), record.module)
}

/// File name for a test's artifact: `<module>__<name>.png` with anything but
/// ASCII alphanumerics, `-` and `_` replaced.
pub fn artifact_name(record: &TestRecord) -> String {
    let clean = |s: &str| -> String {
        s.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect()
    };
    format!("{}__{}.png", clean(record.module), clean(record.name))
}

fn save_artifact(dir: &Path, record: &TestRecord, fb: &Framebuffer) -> Option<PathBuf> {
    let path = dir.join(artifact_name(record));
    let saved = std::fs::create_dir_all(dir)
        .map_err(|e| e.to_string())
        .and_then(|()| fb.save_png(&path).map_err(|e| e.to_string()));
    match saved {
        Ok(()) => {
            tracing::info!(path = %path.display(), "saved failure snapshot");
            Some(path)
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "could not save failure snapshot");
            None
        }
    }
}
