//! Core data types for depsel.
//!
//! This crate defines the artifact model the selection engine works on:
//! artifact coordinates and scopes, coordinate patterns, the artifact
//! filters built from them, filter rules, and configuration files.
//!
//! This crate is intentionally free of repository access and I/O beyond
//! reading configuration files.

pub mod artifact;
pub mod config;
pub mod matcher;
pub mod pattern;
pub mod rule;
