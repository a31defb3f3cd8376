//! Core types, stage traits, and the conversion pipeline for the DHV deck converter.

pub mod assemble;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod plugin;
pub mod record;
