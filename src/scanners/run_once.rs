// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{ScannerError, ScannerResult};

/// Per-plugin-instance "has run" flag, checked and set atomically
#[derive(Debug)]
pub struct RunOnceGuard {
    plugin: String,
    has_run: AtomicBool,
}

impl RunOnceGuard {
    pub fn new(plugin: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            has_run: AtomicBool::new(false),
        }
    }

    /// Claim the single run. Every later call fails with `AlreadyExecuted`.
    pub fn enter(&self) -> ScannerResult<()> {
        self.has_run
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| ScannerError::AlreadyExecuted {
                plugin: self.plugin.clone(),
            })
    }

    pub fn has_run(&self) -> bool {
        self.has_run.load(Ordering::Acquire)
    }
}
