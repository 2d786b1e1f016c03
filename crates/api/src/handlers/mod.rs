pub mod feedback;
pub mod generate;
pub mod prompts;
pub mod usage;
