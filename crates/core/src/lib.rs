//! Domain logic for the PromptForge generation pipeline.
//!
//! Everything in this crate is pure: no I/O, no database, no clock other
//! than timestamps passed in by callers. The api and db crates depend on
//! these types and functions; nothing here depends on them.

pub mod draft;
pub mod error;
pub mod feedback;
pub mod generation;
pub mod quota;
pub mod structured;
pub mod types;
