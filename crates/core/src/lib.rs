//! Domain types and pure logic for the pomodoro tracker.
//!
//! This crate has no I/O. The database and HTTP layers build on it.

pub mod error;
pub mod history;
pub mod interval;
pub mod types;
