//! Rock–Paper–Scissors Agent Runtime
//!
//! Everything around the session state machine that depends on the process
//! it runs in: configuration, the console connector standing in for the
//! robot, and summary storage. The `rps-agent` binary is a thin wrapper
//! around this library.

pub mod config;
pub mod console;
pub mod summary_store;
