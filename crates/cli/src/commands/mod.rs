//! Command handlers for the docgen CLI.

pub mod generate;
pub mod models;

pub use generate::GenerateArgs;
pub use models::ModelsCommand;
