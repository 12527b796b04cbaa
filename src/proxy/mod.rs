//! Proxy-side configuration and supervised runtime.
pub mod config;
pub mod runtime;
