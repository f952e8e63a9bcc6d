//! Job files: the JSON description of one overlay run.

pub mod config;
