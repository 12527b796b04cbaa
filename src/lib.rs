//! Library crate root re-exporting launch, proxy and CLI modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod launch;
pub mod proxy;
