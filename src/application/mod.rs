pub mod cache;
pub mod repos;
pub mod todos;
