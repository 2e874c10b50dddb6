// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Worker Module
 * Bounded worker pool for independent probes
 *
 * © 2026 Bountyy Oy
 */

pub mod probe_pool;

pub use probe_pool::{ProbeOutcome, ProbePool};
