// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! - `label_algebra`: intersection laws and deterministic value selection
//! - `path_invariants`: simplicity, connectivity and swap rules of returned paths
//! - `backoff`: the fetch interval sequence

mod backoff;
mod label_algebra;
mod path_invariants;
