pub mod directory_repo;
pub use directory_repo::{DirectoryRepository, PgDirectoryRepository};
pub mod memory_repo;
pub use memory_repo::InMemoryDirectoryRepository;
pub mod seed;
