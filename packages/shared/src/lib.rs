//! Utilities shared by the support relay packages.

pub mod logger;
pub mod time;
