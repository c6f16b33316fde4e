//! Git repository access and commit history loading.

pub mod bots;
pub mod commit;
pub mod repository;

pub use bots::is_bot_author;
pub use commit::{load_history, RawCommit};
pub use repository::GitRepository;
