pub mod handlers;
pub mod repo;

pub use repo::Record;
