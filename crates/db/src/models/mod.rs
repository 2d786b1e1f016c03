pub mod generation_log;
pub mod prompt;
pub mod usage;
