pub mod repository;
pub mod sqlite;

pub use repository::PrefsRepository;
pub use sqlite::{PrefsDb, PrefsDbError};
