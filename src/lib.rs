pub mod core;
pub mod lenses;
pub mod orchestrator;
pub mod prompts;
pub mod providers;
pub mod work;
