//! Test utilities for the agent swarm
//!
//! Scripted provider doubles and small filesystem helpers shared by unit
//! tests across modules.

use crate::error::{ProviderError, ProviderResult};
use crate::providers::{GenerationRequest, Provider, ProviderKind};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Provider double that replays a fixed script of results
///
/// Each `generate` call pops the next scripted result. An exhausted script
/// yields `EmptyResponse`. Calls are counted so tests can assert how many
/// outbound requests a code path made.
pub struct ScriptedProvider {
    kind: ProviderKind,
    configured: bool,
    script: Mutex<VecDeque<ProviderResult<String>>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl ScriptedProvider {
    /// A provider with credentials that answers from `script`
    pub fn configured(kind: ProviderKind, script: Vec<ProviderResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            kind,
            configured: true,
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// A provider without credentials
    pub fn unconfigured(kind: ProviderKind) -> Arc<Self> {
        Arc::new(Self {
            kind,
            configured: false,
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// Number of `generate` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The request passed to the most recent call
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, request: &GenerationRequest) -> ProviderResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProviderError::EmptyResponse {
                provider: self.kind,
            }))
    }
}

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Write `content` to `name` inside `dir` and return the path
///
/// # Panics
///
/// Panics if writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error's display chain contains `expected`
///
/// # Panics
///
/// Panics if the result is Ok or if no error in the chain matches
pub fn assert_error_contains<T: std::fmt::Debug>(result: crate::error::Result<T>, expected: &str) {
    match result {
        Ok(value) => panic!("Expected error containing '{}', got Ok({:?})", expected, value),
        Err(e) => {
            let message = format!("{:#}", e);
            assert!(
                message.contains(expected),
                "Expected error containing '{}', got '{}'",
                expected,
                message
            );
        }
    }
}
