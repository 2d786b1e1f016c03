pub mod generation_log_repo;
pub mod prompt_repo;
pub mod quota_repo;

pub use generation_log_repo::GenerationLogRepo;
pub use prompt_repo::PromptRepo;
pub use quota_repo::QuotaRepo;
