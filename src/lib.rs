//! Todo CRUD service with a cache-aside read layer.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
