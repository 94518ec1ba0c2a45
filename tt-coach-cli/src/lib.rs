// Library exports for the TT Coach CLI
// This allows testing of internal modules

pub mod commands;
pub mod config;
pub mod input;
pub mod output;
