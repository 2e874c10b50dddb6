// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Mutation Engine Library
 * Exposes the request model, mutation engine and probe consumers
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod config;
pub mod errors;
pub mod types;

// Structured request model
pub mod request;

// Mutation engine
pub mod fuzzer;

// Probe dispatch
pub mod http_client;
pub mod worker;
pub mod scanners;

pub use errors::{MutationError, MutationResult, ScannerError, ScannerResult};
pub use fuzzer::{CapabilitySet, Mutant, MutantFactory, MutantKind};
pub use request::FuzzableRequest;
