/// Database connection management and table creation
pub mod database;

/// Application settings loaded from `marcomdesk.toml` and the environment
pub mod settings;

pub use settings::{Letterhead, Settings};
