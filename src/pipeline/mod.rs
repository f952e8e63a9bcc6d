//! The end-to-end run: probe, sync, decode, render, composite, encode.

pub mod run;
