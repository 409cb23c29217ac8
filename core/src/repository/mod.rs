pub mod file;
pub mod traits;

// Re-export
pub use file::{default_data_dir, FileAppDataRepository};
pub use traits::AppDataRepository;
