//! Command implementations for the querylab CLI.

pub mod config;
pub mod label;
pub mod synonyms;
