pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{MIGRATOR, connect, connect_options, run_migrations};
pub use error::{DbError, Result};
pub use repositories::session_repository::SessionRepository;
pub use repositories::user_repository::UserRepository;
pub use repositories::user_token_repository::UserTokenRepository;
