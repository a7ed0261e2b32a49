//! Shared helpers: logging setup.

pub mod logger;
