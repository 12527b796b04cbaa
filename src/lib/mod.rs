//! Shared library modules providing error types, file utilities, shell quoting, and telemetry initialization.

pub mod errors;
pub mod fs;
pub mod paths;
pub mod shell;
pub mod telemetry;
