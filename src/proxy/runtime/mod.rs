//! Supervised launch and process exit handling.
mod startup;
mod supervisor;

pub use startup::RuntimeExit;
pub use supervisor::{run_supervised, run_supervised_until, run_supervised_with, SessionEnd};
