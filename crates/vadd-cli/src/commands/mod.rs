//! Command implementations

pub mod add;
pub mod build;
pub mod info;
