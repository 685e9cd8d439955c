mod dto;
pub mod handlers;
pub mod repo;

pub use repo::Category;
