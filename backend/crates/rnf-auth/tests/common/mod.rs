pub mod doubles;
pub mod test_db;

pub use doubles::*;
pub use test_db::*;
