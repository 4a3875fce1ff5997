//! API route handlers

pub mod articles;
pub mod categories;
pub mod health;
pub mod posts;
pub mod resources;
pub mod session;
