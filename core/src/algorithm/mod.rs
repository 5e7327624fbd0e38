//! VERITAS reference implementations, grouped by category.
//!
//! These are the trusted halves of every differential comparison: small,
//! pure, and written from the algorithm descriptions, never from the buggy
//! snippets that motivated this harness.

pub mod cipher;
pub mod graph;
pub mod numeric;
pub mod scheduling;
pub mod searching;
pub mod sorting;
