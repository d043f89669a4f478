//! Shared test helpers for `corebac-core` integration tests.
//!
//! `scenario` builds a small hand-written organisation that most behavioural
//! tests start from; `graphs` builds seeded random organisations together
//! with an independent model of what the engine should report.

#![allow(dead_code)]

pub mod graphs;
pub mod scenario;
