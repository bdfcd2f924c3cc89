//! Top-level commands

pub mod batch;
