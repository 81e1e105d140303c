//! # Batch Composition
//!
//! Orchestrates a full run: pool building, edit-list generation, and the
//! sequential render loop.

pub mod engine;

pub use engine::MixEngine;
