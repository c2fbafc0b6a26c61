//! CellTower Integration Tests
//!
//! End-to-end tests for the admission engine.
//!
//! ## Test Categories
//!
//! - `admission`: admission order, ledger exhaustion and removal scenarios
//! - `registry`: per-generation allocator ownership
//! - `bulk_load`: file-mode load and verbatim rewrite
//! - `property`: property-based tests across all generations

pub mod common;

pub mod admission;
pub mod bulk_load;
pub mod registry;
