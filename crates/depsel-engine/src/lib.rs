//! Dependency selection engine: narrows a project's resolved dependency
//! artifacts to the subset chosen by coordinate filter rules, optionally
//! re-resolving transitively, and merges the rule results.

pub mod engine;
pub mod merge;
pub mod processor;
pub mod report;
pub mod strategy;

pub use engine::{Selection, SelectionEngine};
