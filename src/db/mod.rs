pub mod connection;
pub mod schools;

pub use connection::{init_db, Database};
