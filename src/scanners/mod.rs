// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Probe Consumers
 * Plugins that dispatch independent probes over the worker pool
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod run_once;
pub mod waf_fingerprint;

pub use run_once::RunOnceGuard;
pub use waf_fingerprint::{WafCheck, WafFingerprinter};
