// ReadAssist shared type definitions
// Each submodule defines types used across the enhancer.

pub mod command;
pub mod errors;
pub mod page;
pub mod reader;
pub mod settings;
pub mod speech;
